//! Aisle-facing access point of a pick location.

use crate::core::{PixelPoint, Rect};

/// Access point of a location rectangle, `delta` pixels out into the aisle.
///
/// Wide locations (width >= height) are approached from the middle of the
/// top edge, tall ones from the middle of the left edge. This assumes the
/// conventional rack orientation; it is not a nearest-aisle search.
pub fn compute_front_point(rect: &Rect, delta: f64) -> PixelPoint {
    if rect.width() >= rect.height() {
        PixelPoint::new((rect.x1 + rect.x2) / 2.0, rect.y1 - delta)
    } else {
        PixelPoint::new(rect.x1 - delta, (rect.y1 + rect.y2) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_location_uses_top_edge() {
        let rect = Rect::new(100.0, 200.0, 160.0, 220.0);
        assert_eq!(compute_front_point(&rect, 10.0), PixelPoint::new(130.0, 190.0));
    }

    #[test]
    fn test_tall_location_uses_left_edge() {
        let rect = Rect::new(50.0, 50.0, 70.0, 80.0);
        assert_eq!(compute_front_point(&rect, 5.0), PixelPoint::new(45.0, 65.0));
        assert_eq!(compute_front_point(&rect, 10.0), PixelPoint::new(40.0, 65.0));
    }

    #[test]
    fn test_square_counts_as_wide() {
        let rect = Rect::new(0.0, 40.0, 20.0, 60.0);
        assert_eq!(compute_front_point(&rect, 5.0), PixelPoint::new(10.0, 35.0));
    }
}
