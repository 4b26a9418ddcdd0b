use std::ops::Range;

use image::Rgb;

/// Named anatomical subsets of the 68-point landmark layout.
///
/// The index ranges are fixed offsets defined by the predictor's point
/// ordering and are never recomputed from data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacialRegion {
    Mouth,
    RightEyebrow,
    LeftEyebrow,
    RightEye,
    LeftEye,
    Nose,
    Jaw,
}

impl FacialRegion {
    /// All regions, in the order they are rendered onto the overlay.
    pub const DRAW_ORDER: [FacialRegion; 7] = [
        FacialRegion::Mouth,
        FacialRegion::RightEyebrow,
        FacialRegion::LeftEyebrow,
        FacialRegion::RightEye,
        FacialRegion::LeftEye,
        FacialRegion::Nose,
        FacialRegion::Jaw,
    ];

    /// Half-open index range of this region within the 68-point sequence.
    pub fn index_range(self) -> Range<usize> {
        match self {
            FacialRegion::Mouth => 48..68,
            FacialRegion::RightEyebrow => 17..22,
            FacialRegion::LeftEyebrow => 22..27,
            FacialRegion::RightEye => 36..42,
            FacialRegion::LeftEye => 42..48,
            // The nose range stops one short of 36; kept as-is for
            // compatibility with existing consumers of the grids.
            FacialRegion::Nose => 27..35,
            FacialRegion::Jaw => 0..17,
        }
    }

    /// Fill (or, for the jaw, line) color used on the overlay canvas.
    pub fn color(self) -> Rgb<u8> {
        match self {
            FacialRegion::Mouth => Rgb([245, 10, 10]),
            FacialRegion::RightEyebrow => Rgb([10, 245, 245]),
            FacialRegion::LeftEyebrow => Rgb([70, 245, 245]),
            FacialRegion::RightEye => Rgb([10, 10, 245]),
            FacialRegion::LeftEye => Rgb([10, 10, 245]),
            FacialRegion::Nose => Rgb([245, 245, 10]),
            FacialRegion::Jaw => Rgb([199, 71, 133]),
        }
    }

    /// The jaw is the only open contour; every other region is drawn as a
    /// filled convex hull.
    pub fn is_open_contour(self) -> bool {
        matches!(self, FacialRegion::Jaw)
    }

    pub fn name(self) -> &'static str {
        match self {
            FacialRegion::Mouth => "mouth",
            FacialRegion::RightEyebrow => "right_eyebrow",
            FacialRegion::LeftEyebrow => "left_eyebrow",
            FacialRegion::RightEye => "right_eye",
            FacialRegion::LeftEye => "left_eye",
            FacialRegion::Nose => "nose",
            FacialRegion::Jaw => "jaw",
        }
    }
}

/// Whether an overlay pixel color belongs to any facial region.
pub(crate) fn is_region_color(color: Rgb<u8>) -> bool {
    FacialRegion::DRAW_ORDER.iter().any(|r| r.color() == color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_stay_within_the_landmark_sequence() {
        for region in FacialRegion::DRAW_ORDER {
            let range = region.index_range();
            assert!(range.start < range.end, "{} is empty", region.name());
            assert!(range.end <= crate::LANDMARK_COUNT);
        }
    }

    #[test]
    fn jaw_is_the_only_open_contour() {
        for region in FacialRegion::DRAW_ORDER {
            assert_eq!(
                region.is_open_contour(),
                region == FacialRegion::Jaw,
                "{}",
                region.name()
            );
        }
    }

    #[test]
    fn background_and_face_fill_are_not_region_colors() {
        assert!(!is_region_color(crate::rasterize::BACKGROUND));
        assert!(!is_region_color(crate::rasterize::FACE_FILL));
        assert!(is_region_color(FacialRegion::Mouth.color()));
    }
}
