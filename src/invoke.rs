//! Building and launching renderer invocations.
//!
//! The heavy lifting (fractal iteration, coloring, PNG encoding) lives in an
//! external renderer binary; this module only assembles its `--name=value`
//! argument list and spawns it. Numeric arguments are formatted with Rust's
//! default `Display`, which for floats is the shortest roundtrip form; that
//! choice is deliberate so filenames and zoom arguments are reproducible
//! across runs.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{ZoomError, ZoomResult};
use crate::progression::Zoom;

/// Spelling of the PNG output flag; the renderer accepted both over its
/// lifetime and the recorded runs use both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PngFlag {
    ImgPng,
    ImagePng,
}

impl PngFlag {
    pub fn as_arg(self) -> &'static str {
        match self {
            Self::ImgPng => "--img-png",
            Self::ImagePng => "--image-png",
        }
    }
}

/// Static renderer configuration shared by every frame of a run.
#[derive(Clone, Debug)]
pub struct RendererSpec {
    pub binary: PathBuf,
    pub multi: u32,
    pub bailout: u32,
    pub png_flag: PngFlag,
    pub xcoord: f64,
    pub ycoord: f64,
    pub rgb_base: Option<[u8; 3]>,
    pub rgb_freq: Option<[f64; 3]>,
    pub rgb_phase: Option<[f64; 3]>,
}

impl RendererSpec {
    pub fn validate(&self) -> ZoomResult<()> {
        if self.binary.as_os_str().is_empty() {
            return Err(ZoomError::validation("renderer binary path is empty"));
        }
        if self.bailout == 0 {
            return Err(ZoomError::validation("bailout must be non-zero"));
        }
        if self.multi == 0 {
            return Err(ZoomError::validation("multi must be non-zero"));
        }
        Ok(())
    }

    /// Assemble the argument list for one frame. `rgb_base_override` lets a
    /// per-frame color oscillation replace the static base color.
    pub fn invocation(
        &self,
        stem: &str,
        zoom: Zoom,
        rgb_base_override: Option<[u8; 3]>,
    ) -> RenderInvocation {
        let mut args = vec![
            format!("--multi={}", self.multi),
            format!("--bailout={}", self.bailout),
            self.png_flag.as_arg().to_string(),
            format!("--xcoord={}", self.xcoord),
            format!("--ycoord={}", self.ycoord),
            format!("--image-file={stem}"),
        ];

        if let Some([r, g, b]) = rgb_base_override.or(self.rgb_base) {
            args.push(format!("--rgb-base={r},{g},{b}"));
        }
        if let Some([f1, f2, f3]) = self.rgb_freq {
            args.push(format!("--rgb-freq={f1},{f2},{f3}"));
        }
        if let Some([p1, p2, p3]) = self.rgb_phase {
            args.push(format!("--rgb-phase={p1},{p2},{p3}"));
        }
        args.push(format!("--zoom={zoom}"));

        RenderInvocation {
            program: self.binary.clone(),
            args,
        }
    }
}

/// The fully assembled command for one frame. Immutable once built; the
/// sequencer never consumes anything the renderer produces.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl RenderInvocation {
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Seam between the frame loop and the external process, so tests can record
/// invocations and the CLI can dry-run them.
pub trait RunRenderer {
    fn run(&mut self, invocation: &RenderInvocation);
}

/// Launches the renderer and waits for it to exit. Failures (missing binary,
/// non-zero exit) are logged and otherwise ignored; a broken frame must not
/// stop the rest of the sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRenderer;

impl RunRenderer for ProcessRenderer {
    fn run(&mut self, invocation: &RenderInvocation) {
        match Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
        {
            Ok(status) if !status.success() => {
                tracing::warn!(%status, cmd = %invocation.command_line(), "renderer exited with failure");
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(%err, program = %invocation.program.display(), "failed to launch renderer");
            }
        }
    }
}

/// Prints each command line to stdout instead of spawning anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct DryRunRenderer;

impl RunRenderer for DryRunRenderer {
    fn run(&mut self, invocation: &RenderInvocation) {
        println!("{}", invocation.command_line());
    }
}

/// Cheap availability probe so the CLI can warn up front instead of logging
/// one launch failure per frame.
pub fn renderer_available(binary: &Path) -> bool {
    Command::new(binary)
        .arg("--help")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_spec() -> RendererSpec {
        RendererSpec {
            binary: PathBuf::from("src/geomandel"),
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
    fn quadratic_style_args_match_recorded_run() {
        let inv = quad_spec().invocation("00001_mandelvid484_444", Zoom::Integer(1), None);
        assert_eq!(
            inv.args,
            vec![
                "--multi=4",
                "--bailout=2048",
                "--img-png",
                "--xcoord=484",
                "--ycoord=444",
                "--image-file=00001_mandelvid484_444",
                "--rgb-freq=0,16,2",
                "--zoom=1",
            ]
        );
    }

    #[test]
    fn full_color_args_are_emitted_in_order() {
        let spec = RendererSpec {
            binary: PathBuf::from("geomandel"),
            multi: 4,
            bailout: 4096,
            png_flag: PngFlag::ImagePng,
            xcoord: 501.70535,
            ycoord: 450.64976,
            rgb_base: Some([200, 200, 200]),
            rgb_freq: Some([0.02, 0.016, 0.012]),
            rgb_phase: Some([4.0, 2.0, 1.0]),
        };
        let inv = spec.invocation("00100_poly", Zoom::Real(12.504116745216058), None);
        assert_eq!(inv.args[2], "--image-png");
        assert_eq!(inv.args[3], "--xcoord=501.70535");
        assert_eq!(inv.args[6], "--rgb-base=200,200,200");
        assert_eq!(inv.args[7], "--rgb-freq=0.02,0.016,0.012");
        assert_eq!(inv.args[8], "--rgb-phase=4,2,1");
        assert_eq!(inv.args.last().unwrap(), "--zoom=12.504116745216058");
    }

    #[test]
    fn base_override_replaces_static_base() {
        let mut spec = quad_spec();
        spec.rgb_base = Some([200, 200, 200]);
        let inv = spec.invocation("s", Zoom::Integer(1), Some([7, 7, 7]));
        assert!(inv.args.contains(&"--rgb-base=7,7,7".to_string()));
        assert!(!inv.args.iter().any(|a| a.contains("200,200,200")));
    }

    #[test]
    fn command_line_joins_program_and_args() {
        let inv = quad_spec().invocation("x", Zoom::Integer(2), None);
        let line = inv.command_line();
        assert!(line.starts_with("src/geomandel --multi=4"));
        assert!(line.ends_with("--zoom=2"));
    }

    #[test]
    fn spec_validation_catches_bad_values() {
        let mut spec = quad_spec();
        spec.bailout = 0;
        assert!(spec.validate().is_err());

        let mut spec = quad_spec();
        spec.multi = 0;
        assert!(spec.validate().is_err());

        let mut spec = quad_spec();
        spec.binary = PathBuf::new();
        assert!(spec.validate().is_err());
    }

    #[test]
    fn process_renderer_survives_missing_binary() {
        let mut spec = quad_spec();
        spec.binary = PathBuf::from("/nonexistent/geomandel-test-binary");
        let inv = spec.invocation("00001", Zoom::Integer(1), None);
        // Must not panic or propagate; the loop keeps going.
        ProcessRenderer.run(&inv);
    }
}
