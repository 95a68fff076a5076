pub mod check;
pub mod hit;
pub mod squarify;

pub use check::{check_tiling, TilingReport};
pub use hit::hit_test;
pub use squarify::{squarify, LayoutItem, PlacedRect, Rect};

/// How much text a rectangle has room for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LabelLevel {
    None,
    Ticker,
    TickerAndValue,
}

/// Configuration for treemap layout.
#[derive(Debug, Clone)]
pub struct TreemapConfig {
    /// Gap between the viewport edge and the treemap (caller units)
    pub padding: f64,
    /// Minimum rect size (w, h) to show the ticker
    pub ticker_label_min: (f64, f64),
    /// Minimum rect size (w, h) to also show the formatted value
    pub value_label_min: (f64, f64),
    /// Run the O(n²) tiling check after every layout and log the result
    pub validate: bool,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            padding: 2.0,
            ticker_label_min: (40.0, 24.0),
            value_label_min: (50.0, 36.0),
            validate: cfg!(debug_assertions),
        }
    }
}

impl TreemapConfig {
    /// Area the treemap may occupy inside a `width` x `height` viewport.
    pub fn content_bounds(&self, width: f64, height: f64) -> Rect {
        Rect::new(0.0, 0.0, width, height).inset(self.padding)
    }

    pub fn label_level(&self, rect: &Rect) -> LabelLevel {
        let fits = |(min_w, min_h): (f64, f64)| rect.w > min_w && rect.h > min_h;
        if fits(self.value_label_min) {
            LabelLevel::TickerAndValue
        } else if fits(self.ticker_label_min) {
            LabelLevel::Ticker
        } else {
            LabelLevel::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_bounds_apply_padding() {
        let cfg = TreemapConfig::default();
        assert_eq!(cfg.content_bounds(300.0, 180.0), Rect::new(2.0, 2.0, 296.0, 176.0));
        assert!(cfg.content_bounds(3.0, 100.0).is_empty());
    }

    #[test]
    fn label_levels_by_size() {
        let cfg = TreemapConfig::default();
        assert_eq!(cfg.label_level(&Rect::new(0.0, 0.0, 60.0, 40.0)), LabelLevel::TickerAndValue);
        assert_eq!(cfg.label_level(&Rect::new(0.0, 0.0, 45.0, 40.0)), LabelLevel::Ticker);
        assert_eq!(cfg.label_level(&Rect::new(0.0, 0.0, 40.0, 40.0)), LabelLevel::None);
    }
}
