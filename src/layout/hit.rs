use super::squarify::PlacedRect;

/// Find the placed rectangle under a point.
/// Treemap rectangles never overlap, so the first hit is the only one.
pub fn hit_test<T>(rects: &[PlacedRect<T>], x: f64, y: f64) -> Option<&PlacedRect<T>> {
    rects.iter().find(|r| r.rect.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{squarify, LayoutItem, Rect};

    #[test]
    fn finds_rect_under_point() {
        let items = [
            LayoutItem { value: 100.0, item: 'a' },
            LayoutItem { value: 80.0, item: 'b' },
            LayoutItem { value: 10.0, item: 'c' },
            LayoutItem { value: 10.0, item: 'd' },
        ];
        let rects = squarify(&items, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(hit_test(&rects, 10.0, 10.0).map(|r| r.item), Some('a'));
        assert_eq!(hit_test(&rects, 75.0, 40.0).map(|r| r.item), Some('b'));
        assert_eq!(hit_test(&rects, 60.0, 90.0).map(|r| r.item), Some('c'));
        assert_eq!(hit_test(&rects, 90.0, 90.0).map(|r| r.item), Some('d'));
        assert!(hit_test(&rects, 100.0, 50.0).is_none());
        assert!(hit_test(&rects, -1.0, 50.0).is_none());
    }
}
