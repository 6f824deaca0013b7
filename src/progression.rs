//! Per-frame zoom progression rules.
//!
//! Every rule is a pure function of the frame index plus whatever loop state
//! it carries; state is threaded through explicitly by the caller rather
//! than held in globals, so the same inputs always reproduce the same
//! sequence of magnitudes.

use crate::frame::FrameIndex;

/// A zoom magnitude as it will appear on the renderer command line.
///
/// The quadratic rule produces floored integers and the remaining rules
/// produce floats; keeping them distinct pins the textual formatting:
/// integers render without a decimal point, floats use Rust's
/// shortest-roundtrip `Display`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Zoom {
    Integer(u64),
    Real(f64),
}

impl Zoom {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(v) => v as f64,
            Self::Real(v) => v,
        }
    }
}

impl std::fmt::Display for Zoom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
        }
    }
}

/// Quadratic rule: `floor(f^2 / 20)`, never formatted below 1.
pub fn quadratic_zoom(frame: FrameIndex) -> Zoom {
    Zoom::Integer((frame.0.saturating_mul(frame.0) / 20).max(1))
}

/// One multiplicative zoom-in step: `zoom + zoom * rate`.
pub fn grow(zoom: f64, rate: f64) -> f64 {
    zoom + zoom * rate
}

/// One percentage zoom-out step: `zoom - (zoom / 100) * decay_rate_pct`.
pub fn decay(zoom: f64, decay_rate_pct: f64) -> f64 {
    zoom - (zoom / 100.0) * decay_rate_pct
}

/// Triangle-wave color channel: starts at 255, walks down by 2 to 0, back up
/// by 2 to 255, and repeats. The emitted value is always within [0, 255].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorCycle {
    value: i16,
    rising: bool,
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self {
            value: 255,
            rising: false,
        }
    }
}

impl ColorCycle {
    const STEP: i16 = 2;

    /// Emit the current channel value and advance one frame, reversing
    /// direction whenever a bound is hit.
    pub fn next(&mut self) -> u8 {
        let out = self.value as u8;

        if self.rising {
            self.value += Self::STEP;
        } else {
            self.value -= Self::STEP;
        }
        if self.value <= 0 {
            self.value = 0;
            self.rising = true;
        } else if self.value >= 255 {
            self.value = 255;
            self.rising = false;
        }

        out
    }
}
