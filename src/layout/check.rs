use super::squarify::{PlacedRect, Rect};

/// Geometry diagnostics for a finished layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilingReport {
    pub rects: usize,
    /// Sum of rectangle areas over the bounds' area
    pub coverage: f64,
    /// Total pairwise intersection area
    pub overlap: f64,
    /// Rectangles poking outside the bounds
    pub out_of_bounds: usize,
    pub worst_aspect: f64,
    pub mean_aspect: f64,
}

impl TilingReport {
    /// Coverage within `tolerance` of 1 and overlap below `tolerance` of the bounds' area.
    pub fn is_exact(&self, tolerance: f64) -> bool {
        (self.coverage - 1.0).abs() <= tolerance && self.overlap <= tolerance && self.out_of_bounds == 0
    }
}

fn intersection(a: &Rect, b: &Rect) -> f64 {
    let w = (a.x + a.w).min(b.x + b.w) - a.x.max(b.x);
    let h = (a.y + a.h).min(b.y + b.h) - a.y.max(b.y);
    if w > 0.0 && h > 0.0 {
        w * h
    } else {
        0.0
    }
}

/// Check a layout against its bounds. Pairwise overlap makes this O(n²); meant for diagnostics.
pub fn check_tiling<T>(rects: &[PlacedRect<T>], bounds: Rect) -> TilingReport {
    let area = bounds.area();
    let eps = 1e-9 * area.max(1.0);
    let covered: f64 = rects.iter().map(|r| r.rect.area()).sum();

    let mut overlap = 0.0;
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            overlap += intersection(&a.rect, &b.rect);
        }
    }

    let out_of_bounds = rects
        .iter()
        .filter(|r| {
            let slack = eps.sqrt();
            r.rect.x < bounds.x - slack
                || r.rect.y < bounds.y - slack
                || r.rect.x + r.rect.w > bounds.x + bounds.w + slack
                || r.rect.y + r.rect.h > bounds.y + bounds.h + slack
        })
        .count();

    let aspects: Vec<f64> = rects.iter().map(|r| r.rect.aspect_ratio()).collect();
    let worst_aspect = aspects.iter().copied().fold(0.0, f64::max);
    let mean_aspect = if aspects.is_empty() {
        0.0
    } else {
        aspects.iter().sum::<f64>() / aspects.len() as f64
    };

    TilingReport {
        rects: rects.len(),
        coverage: if area > 0.0 { covered / area } else { 0.0 },
        overlap: if area > 0.0 { overlap / area } else { 0.0 },
        out_of_bounds,
        worst_aspect,
        mean_aspect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{squarify, LayoutItem};

    #[test]
    fn squarified_layout_passes() {
        let items: Vec<LayoutItem<u32>> = (1..=40)
            .map(|i| LayoutItem { value: (i * i) as f64, item: i })
            .collect();
        let bounds = Rect::new(2.0, 2.0, 796.0, 396.0);
        let report = check_tiling(&squarify(&items, bounds), bounds);
        assert_eq!(report.rects, 40);
        assert!(report.is_exact(1e-6), "{report:?}");
        assert!(report.worst_aspect >= 1.0);
    }

    #[test]
    fn detects_overlap_and_gaps() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let rects = [
            PlacedRect { rect: Rect::new(0.0, 0.0, 6.0, 10.0), value: 1.0, item: () },
            PlacedRect { rect: Rect::new(5.0, 0.0, 5.0, 5.0), value: 1.0, item: () },
        ];
        let report = check_tiling(&rects, bounds);
        assert!((report.coverage - 0.85).abs() < 1e-12);
        assert!((report.overlap - 0.05).abs() < 1e-12);
        assert!(!report.is_exact(1e-6));
    }
}
