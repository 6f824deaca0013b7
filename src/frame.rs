use crate::error::{ZoomError, ZoomResult};

/// Width the frame index is zero-padded to in output filenames, so that a
/// glob over the produced images sorts in frame order.
pub const STEM_PAD_WIDTH: usize = 5;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Output filename stem for this frame: the zero-padded index followed by
    /// a descriptive suffix, e.g. `00042_mandelvid484_444`.
    pub fn stem(self, suffix: &str) -> String {
        format!("{:0width$}{}", self.0, suffix, width = STEM_PAD_WIDTH)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> ZoomResult<Self> {
        if start.0 > end.0 {
            return Err(ZoomError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    pub fn iter(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_rejects_inverted_bounds() {
        assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    }

    #[test]
    fn range_contains_boundaries() {
        let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
        assert!(!r.contains(FrameIndex(1)));
        assert!(r.contains(FrameIndex(2)));
        assert!(r.contains(FrameIndex(4)));
        assert!(!r.contains(FrameIndex(5)));
    }

    #[test]
    fn range_iterates_in_order() {
        let r = FrameRange::new(FrameIndex(1), FrameIndex(4)).unwrap();
        let got: Vec<u64> = r.iter().map(|f| f.0).collect();
        assert_eq!(got, vec![1, 2, 3]);
    }

    #[test]
    fn stem_is_zero_padded_to_width_5() {
        assert_eq!(FrameIndex(1).stem("_mandelvid484_444"), "00001_mandelvid484_444");
        assert_eq!(FrameIndex(499).stem(""), "00499");
        assert_eq!(FrameIndex(123456).stem(""), "123456"); // never truncated
    }
}
