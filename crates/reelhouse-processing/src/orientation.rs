use reelhouse_core::models::OrientationBucket;

/// Classify a frame size as 16:9 landscape, 9:16 portrait or anything else.
///
/// A dimension pair matches a ratio when the expected height differs from the
/// actual height by less than one pixel.
pub fn classify_orientation(width: u32, height: u32) -> OrientationBucket {
    let width = f64::from(width);
    let height = f64::from(height);

    if (width * 9.0 / 16.0 - height).abs() < 1.0 {
        return OrientationBucket::Landscape;
    }
    if (width * 16.0 / 9.0 - height).abs() < 1.0 {
        return OrientationBucket::Portrait;
    }
    OrientationBucket::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_resolutions() {
        assert_eq!(classify_orientation(1920, 1080), OrientationBucket::Landscape);
        assert_eq!(classify_orientation(1280, 720), OrientationBucket::Landscape);
        assert_eq!(classify_orientation(1080, 1920), OrientationBucket::Portrait);
        assert_eq!(classify_orientation(720, 1280), OrientationBucket::Portrait);
        assert_eq!(classify_orientation(1000, 1000), OrientationBucket::Other);
        assert_eq!(classify_orientation(640, 480), OrientationBucket::Other);
    }

    #[test]
    fn test_sub_pixel_tolerance() {
        // 854 * 9 / 16 = 480.375
        assert_eq!(classify_orientation(854, 480), OrientationBucket::Landscape);
        // 480 * 16 / 9 = 853.33
        assert_eq!(classify_orientation(480, 854), OrientationBucket::Portrait);
        // Exactly one pixel off is outside the tolerance.
        assert_eq!(classify_orientation(1920, 1081), OrientationBucket::Other);
    }

    #[test]
    fn test_deterministic() {
        for (w, h) in [(1, 1), (16, 9), (9, 16), (u32::MAX, u32::MAX)] {
            assert_eq!(classify_orientation(w, h), classify_orientation(w, h));
        }
        assert_eq!(classify_orientation(16, 9), OrientationBucket::Landscape);
        assert_eq!(classify_orientation(9, 16), OrientationBucket::Portrait);
    }
}
