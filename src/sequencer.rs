//! The frame loop: one renderer invocation per frame, strictly sequential.
//!
//! Each driver walks its frame range in order, derives the zoom magnitude
//! for the frame, hands the assembled invocation to a [`RunRenderer`], and
//! moves on regardless of what happened to the child process. The computed
//! zoom values are returned so callers can log or assert on them.

use crate::calibration::{Segment, validate_segments};
use crate::error::{ZoomError, ZoomResult};
use crate::frame::{FrameIndex, FrameRange};
use crate::invoke::{RendererSpec, RunRenderer};
use crate::progression::{ColorCycle, Zoom, decay, grow, quadratic_zoom};

/// Quadratic progression run: `floor(f^2 / 20)` zooms over a frame range,
/// optionally pulsing the base color as a triangle wave.
#[derive(Clone, Debug)]
pub struct QuadraticRun {
    pub frames: FrameRange,
    pub suffix: String,
    pub pulse: bool,
}

#[tracing::instrument(skip(spec, renderer))]
pub fn run_quadratic(
    spec: &RendererSpec,
    cfg: &QuadraticRun,
    renderer: &mut dyn RunRenderer,
) -> ZoomResult<Vec<Zoom>> {
    spec.validate()?;

    let mut cycle = ColorCycle::default();
    let mut zooms = Vec::with_capacity(cfg.frames.len_frames() as usize);
    for frame in cfg.frames.iter() {
        let zoom = quadratic_zoom(frame);
        let base = cfg.pulse.then(|| {
            let v = cycle.next();
            [v, v, v]
        });
        renderer.run(&spec.invocation(&frame.stem(&cfg.suffix), zoom, base));
        zooms.push(zoom);
    }
    Ok(zooms)
}

/// Polynomial-fit run: each segment is fitted once, then evaluated at every
/// frame it covers.
#[tracing::instrument(skip(spec, segments, renderer))]
pub fn run_polynomial(
    spec: &RendererSpec,
    segments: &[Segment],
    suffix: &str,
    renderer: &mut dyn RunRenderer,
) -> ZoomResult<Vec<Zoom>> {
    spec.validate()?;
    validate_segments(segments)?;

    let mut zooms = Vec::new();
    for segment in segments {
        let fitted = segment.fit()?;
        for frame in fitted.frames.iter() {
            let zoom = fitted.zoom(frame);
            renderer.run(&spec.invocation(&frame.stem(suffix), zoom, None));
            zooms.push(zoom);
        }
    }
    Ok(zooms)
}

/// Geometric growth/decay run: zoom in by a fixed percentage per frame, then
/// zoom back out, landing on exactly 1.0 for the final frame.
#[derive(Clone, Debug)]
pub struct CycleRun {
    pub growth_frames: u64,
    /// Multiplicative growth per zoom-in frame, e.g. 0.015 for 1.5%.
    pub growth_rate: f64,
    pub decay_frames: u64,
    /// Percentage removed per zoom-out frame, e.g. 8.5456.
    pub decay_rate: f64,
    pub suffix_in: String,
    pub suffix_out: String,
}

impl CycleRun {
    pub fn validate(&self) -> ZoomResult<()> {
        if self.growth_frames == 0 {
            return Err(ZoomError::validation("cycle needs at least one growth frame"));
        }
        if !(0.0..100.0).contains(&self.decay_rate) {
            return Err(ZoomError::validation(
                "decay rate must be a percentage in [0, 100)",
            ));
        }
        if !self.growth_rate.is_finite() || self.growth_rate <= -1.0 {
            return Err(ZoomError::validation("growth rate must be > -1"));
        }
        Ok(())
    }
}

#[tracing::instrument(skip(spec, renderer))]
pub fn run_growth_decay(
    spec: &RendererSpec,
    cfg: &CycleRun,
    renderer: &mut dyn RunRenderer,
) -> ZoomResult<Vec<Zoom>> {
    spec.validate()?;
    cfg.validate()?;

    let mut zooms = Vec::with_capacity((cfg.growth_frames + cfg.decay_frames) as usize);

    // Zoom-in phase: frame 1 is the 1.0 baseline, every later frame scales
    // the running accumulator.
    let mut current = 1.0f64;
    for f in 1..=cfg.growth_frames {
        if f != 1 {
            current = grow(current, cfg.growth_rate);
        }
        let frame = FrameIndex(f);
        let zoom = Zoom::Real(current);
        renderer.run(&spec.invocation(&frame.stem(&cfg.suffix_in), zoom, None));
        zooms.push(zoom);
    }

    // Zoom-out phase: frame numbering continues past the growth frames so
    // the image files sort into one sequence. The final frame is pinned to
    // exactly 1.0 so the run always returns to baseline.
    for f in 1..=cfg.decay_frames {
        current = decay(current, cfg.decay_rate);
        let value = if f == cfg.decay_frames { 1.0 } else { current };
        let frame = FrameIndex(cfg.growth_frames + f);
        let zoom = Zoom::Real(value);
        renderer.run(&spec.invocation(&frame.stem(&cfg.suffix_out), zoom, None));
        zooms.push(zoom);
    }

    Ok(zooms)
}
