//! Calibration tables for the polynomial-fit progression.
//!
//! A segment covers a half-open range of frame indices and carries the
//! handful of hand-picked `(frame, zoom)` points its polynomial is fitted
//! through. Tables are plain serde data so alternative calibrations can be
//! loaded from JSON instead of being baked in.

use crate::error::{ZoomError, ZoomResult};
use crate::frame::{FrameIndex, FrameRange};
use crate::polyfit::{polyfit, polyval};
use crate::progression::Zoom;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub frames: FrameRange,
    /// Calibration points as `(frame, zoom)` pairs.
    pub points: Vec<(f64, f64)>,
    /// Fitted polynomial degree, 2 or 3.
    pub degree: usize,
}

impl Segment {
    pub fn validate(&self) -> ZoomResult<()> {
        if !matches!(self.degree, 2 | 3) {
            return Err(ZoomError::calibration(format!(
                "segment degree must be 2 or 3, got {}",
                self.degree
            )));
        }
        if self.points.len() < self.degree + 1 {
            return Err(ZoomError::calibration(format!(
                "segment needs at least {} calibration points for degree {}, got {}",
                self.degree + 1,
                self.degree,
                self.points.len()
            )));
        }
        if self.frames.is_empty() {
            return Err(ZoomError::calibration("segment frame range is empty"));
        }
        Ok(())
    }

    /// Fit this segment's polynomial through its calibration points.
    pub fn fit(&self) -> ZoomResult<FittedSegment> {
        self.validate()?;
        let xs: Vec<f64> = self.points.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = self.points.iter().map(|p| p.1).collect();
        let coefs = polyfit(&xs, &ys, self.degree)?;
        Ok(FittedSegment {
            frames: self.frames,
            coefs,
        })
    }
}

/// A segment whose polynomial coefficients have been computed once up front.
#[derive(Clone, Debug)]
pub struct FittedSegment {
    pub frames: FrameRange,
    pub coefs: Vec<f64>,
}

impl FittedSegment {
    /// Zoom magnitude for a frame in this segment, clamped to a minimum of 1
    /// (values below that are not useful renderer input).
    pub fn zoom(&self, frame: FrameIndex) -> Zoom {
        let value = polyval(&self.coefs, frame.0 as f64);
        Zoom::Real(if value < 1.0 { 1.0 } else { value })
    }
}

/// Segments must be ordered and non-overlapping so each frame index belongs
/// to exactly one segment.
pub fn validate_segments(segments: &[Segment]) -> ZoomResult<()> {
    if segments.is_empty() {
        return Err(ZoomError::calibration("no calibration segments selected"));
    }
    for seg in segments {
        seg.validate()?;
    }
    for pair in segments.windows(2) {
        if pair[1].frames.start.0 < pair[0].frames.end.0 {
            return Err(ZoomError::calibration(format!(
                "segments overlap or are out of order around frame {}",
                pair[1].frames.start.0
            )));
        }
    }
    Ok(())
}

/// The six calibration tables from the original zoom runs. Which of them a
/// run exercises is up to the caller; see [`DEFAULT_SEGMENT_SELECTION`].
pub fn default_segments() -> Vec<Segment> {
    fn seg(start: u64, end: u64, points: [(f64, f64); 4], degree: usize) -> Segment {
        Segment {
            frames: FrameRange {
                start: FrameIndex(start),
                end: FrameIndex(end),
            },
            points: points.to_vec(),
            degree,
        }
    }

    vec![
        seg(1, 100, [(1.0, 1.0), (10.0, 2.0), (50.0, 4.0), (100.0, 10.0)], 2),
        seg(
            100,
            300,
            [(100.0, 10.0), (160.0, 25.0), (230.0, 60.0), (300.0, 160.0)],
            2,
        ),
        seg(
            300,
            600,
            [
                (300.0, 160.0),
                (380.0, 400.0),
                (470.0, 850.0),
                (600.0, 20_000.0),
            ],
            2,
        ),
        seg(
            600,
            1500,
            [
                (600.0, 20_000.0),
                (750.0, 250_000.0),
                (1100.0, 1_000_000.0),
                (1500.0, 2_500_000.0),
            ],
            3,
        ),
        seg(
            1500,
            2250,
            [
                (1500.0, 2_500_000.0),
                (1750.0, 6_000_000.0),
                (2000.0, 17_000_000.0),
                (2250.0, 41_000_000.0),
            ],
            3,
        ),
        seg(
            2250,
            3000,
            [
                (2250.0, 41_000_000.0),
                (2500.0, 170_000_000.0),
                (2750.0, 500_000_000.0),
                (3000.0, 1_500_000_000.0),
            ],
            3,
        ),
    ]
}

/// 1-based indices into [`default_segments`] that the original run enabled.
pub const DEFAULT_SEGMENT_SELECTION: [usize; 2] = [2, 3];

/// Pick segments out of a table by 1-based index, preserving order.
pub fn select_segments(table: &[Segment], selection: &[usize]) -> ZoomResult<Vec<Segment>> {
    let mut out = Vec::with_capacity(selection.len());
    for &idx in selection {
        let seg = idx
            .checked_sub(1)
            .and_then(|i| table.get(i))
            .ok_or_else(|| {
                ZoomError::calibration(format!(
                    "segment index {} out of range (table has {})",
                    idx,
                    table.len()
                ))
            })?;
        out.push(seg.clone());
    }
    validate_segments(&out)?;
    Ok(out)
}
