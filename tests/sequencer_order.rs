use std::path::PathBuf;

use mandelzoom::{
    FrameIndex, FrameRange, PngFlag, ProcessRenderer, QuadraticRun, RenderInvocation,
    RendererSpec, RunRenderer, Zoom, default_segments, run_polynomial, run_quadratic,
};

#[derive(Default)]
struct Recorder {
    invocations: Vec<RenderInvocation>,
}

impl RunRenderer for Recorder {
    fn run(&mut self, invocation: &RenderInvocation) {
        self.invocations.push(invocation.clone());
    }
}

fn quad_spec(binary: &str) -> RendererSpec {
    RendererSpec {
        binary: PathBuf::from(binary),
        multi: 4,
        bailout: 2048,
        png_flag: PngFlag::ImgPng,
        xcoord: 484.0,
        ycoord: 444.0,
        rgb_base: None,
        rgb_freq: Some([0.0, 16.0, 2.0]),
        rgb_phase: None,
    }
}

#[test]
fn first_five_quadratic_frames_are_all_baseline_zoom() {
    let cfg = QuadraticRun {
        frames: FrameRange::new(FrameIndex(1), FrameIndex(6)).unwrap(),
        suffix: "_mandelvid484_444".into(),
        pulse: false,
    };
    let mut rec = Recorder::default();
    let zooms = run_quadratic(&quad_spec("geomandel"), &cfg, &mut rec).unwrap();

    assert_eq!(zooms, vec![Zoom::Integer(1); 5]);

    let stems: Vec<String> = rec
        .invocations
        .iter()
        .map(|inv| {
            inv.args
                .iter()
                .find_map(|a| a.strip_prefix("--image-file="))
                .unwrap()
                .to_string()
        })
        .collect();
    assert_eq!(
        stems,
        vec![
            "00001_mandelvid484_444",
            "00002_mandelvid484_444",
            "00003_mandelvid484_444",
            "00004_mandelvid484_444",
            "00005_mandelvid484_444",
        ]
    );
}

#[test]
fn failed_renderer_launches_do_not_stop_the_loop() {
    let cfg = QuadraticRun {
        frames: FrameRange::new(FrameIndex(1), FrameIndex(8)).unwrap(),
        suffix: "_x".into(),
        pulse: false,
    };
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // Binary does not exist: every launch fails, the run still completes.
    let mut renderer = ProcessRenderer;
    let zooms = run_quadratic(
        &quad_spec("/nonexistent/mandelzoom-test-renderer"),
        &cfg,
        &mut renderer,
    )
    .unwrap();
    assert_eq!(zooms.len(), 7);
}

#[test]
fn cubic_calibration_segments_interpolate_their_points() {
    let table = default_segments();
    let mut rec = Recorder::default();
    // Segments 4..=6 are the cubic ones; each fits exactly through its four
    // calibration points.
    let zooms = run_polynomial(&quad_spec("geomandel"), &table[3..], "_poly", &mut rec).unwrap();

    assert_eq!(zooms.len() as u64, 3000 - 600);
    assert!(zooms.iter().all(|z| z.as_f64() >= 1.0));

    for seg in &table[3..] {
        let fitted = seg.fit().unwrap();
        for &(x, y) in &seg.points {
            let got = fitted.zoom(FrameIndex(x as u64)).as_f64();
            assert!(
                (got - y).abs() <= 1e-6 * y.abs().max(1.0),
                "segment point ({x}, {y}) evaluated to {got}"
            );
        }
    }
}
