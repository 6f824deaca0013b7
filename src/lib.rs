//! mandelzoom drives an external fractal renderer through a sequence of
//! zoom values, producing numbered image frames that a separate tool (e.g.
//! ffmpeg) can assemble into a video.
//!
//! The crate itself renders nothing. It knows three zoom progressions
//! (quadratic, segmented polynomial fit, geometric growth/decay), how to
//! format the renderer's `--name=value` argument list, and how to launch
//! the renderer once per frame, sequentially, without caring whether any
//! individual launch succeeded.
#![forbid(unsafe_code)]

pub mod calibration;
pub mod error;
pub mod frame;
pub mod invoke;
pub mod polyfit;
pub mod progression;
pub mod sequencer;

pub use calibration::{
    DEFAULT_SEGMENT_SELECTION, FittedSegment, Segment, default_segments, select_segments,
    validate_segments,
};
pub use error::{ZoomError, ZoomResult};
pub use frame::{FrameIndex, FrameRange, STEM_PAD_WIDTH};
pub use invoke::{
    DryRunRenderer, PngFlag, ProcessRenderer, RenderInvocation, RendererSpec, RunRenderer,
    renderer_available,
};
pub use progression::{ColorCycle, Zoom, decay, grow, quadratic_zoom};
pub use sequencer::{CycleRun, QuadraticRun, run_growth_decay, run_polynomial, run_quadratic};
