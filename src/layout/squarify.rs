use serde::Serialize;

/// Axis-aligned rectangle in caller units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn is_empty(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    /// Half-open containment: the right and bottom edges belong to the neighbour.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    /// Long side over short side; 1.0 is a square.
    pub fn aspect_ratio(&self) -> f64 {
        self.w.max(self.h) / self.w.min(self.h)
    }

    /// Shrink by `pad` on every side, clamping at zero size.
    pub fn inset(&self, pad: f64) -> Self {
        Self {
            x: self.x + pad,
            y: self.y + pad,
            w: (self.w - 2.0 * pad).max(0.0),
            h: (self.h - 2.0 * pad).max(0.0),
        }
    }
}

/// A weight to place and whatever the caller wants back with it.
#[derive(Debug, Clone, Copy)]
pub struct LayoutItem<T> {
    pub value: f64,
    pub item: T,
}

/// A positioned rectangle in the treemap layout.
#[derive(Debug, Clone, Copy)]
pub struct PlacedRect<T> {
    pub rect: Rect,
    pub value: f64,
    pub item: T,
}

/// Item with its target area, fixed against the original rectangle.
#[derive(Clone, Copy)]
struct Weighted<T> {
    area: f64,
    value: f64,
    item: T,
}

/// Squarified treemap layout.
///
/// Items with `value <= 0` are dropped. The rest are ordered largest first
/// (stable, so equal values keep input order) and that order is kept for the
/// whole layout. Each item's area is `value / total * bounds.area()`.
///
/// Strips run along the shorter side of the remaining rectangle and grow while
/// adding the next item does not worsen the strip's worst aspect ratio. When a
/// single item is left it takes the whole remaining rectangle.
///
/// `bounds` must have finite coordinates; non-positive width or height gives an
/// empty layout.
pub fn squarify<T: Copy>(items: &[LayoutItem<T>], bounds: Rect) -> Vec<PlacedRect<T>> {
    debug_assert!(
        bounds.x.is_finite() && bounds.y.is_finite() && bounds.w.is_finite() && bounds.h.is_finite(),
        "squarify bounds must be finite: {:?}",
        bounds
    );

    let mut kept: Vec<&LayoutItem<T>> = items.iter().filter(|i| i.value > 0.0).collect();
    if kept.is_empty() || bounds.is_empty() {
        return Vec::new();
    }
    debug_assert!(kept.iter().all(|i| i.value.is_finite()), "layout values must be finite");

    kept.sort_by(|a, b| b.value.total_cmp(&a.value));

    let total: f64 = kept.iter().map(|i| i.value).sum();
    let full_area = bounds.area();
    let weighted: Vec<Weighted<T>> = kept
        .iter()
        .map(|i| Weighted {
            area: i.value / total * full_area,
            value: i.value,
            item: i.item,
        })
        .collect();

    let mut result = Vec::with_capacity(weighted.len());
    layout_strips(&weighted, bounds, &mut result);
    result
}

/// Lay strips out until every item is placed. Each pass is one step of the
/// recursion on the remaining rectangle, unrolled so deep inputs do not grow the stack.
fn layout_strips<T: Copy>(items: &[Weighted<T>], bounds: Rect, out: &mut Vec<PlacedRect<T>>) {
    let Rect {
        mut x,
        mut y,
        mut w,
        mut h,
    } = bounds;
    let mut rest = items;

    loop {
        match rest {
            [] => return,
            [last] => {
                out.push(PlacedRect {
                    rect: Rect::new(x, y, w, h),
                    value: last.value,
                    item: last.item,
                });
                return;
            }
            _ => {}
        }

        // Wide rectangles get a column on the left, tall ones a row on top.
        let wide = w >= h;
        let side = if wide { h } else { w };

        let mut count = 0;
        let mut strip_area = 0.0;
        let mut best = f64::INFINITY;
        for item in rest {
            let test_area = strip_area + item.area;
            let ratio = worst_ratio(&rest[..=count], test_area, side);
            if ratio > best {
                break;
            }
            count += 1;
            strip_area = test_area;
            best = ratio;
        }

        let (strip, remaining) = rest.split_at(count);
        let strip_len = strip_area / side;
        place_strip(strip, x, y, strip_len, wide, out);

        if remaining.is_empty() {
            return;
        }

        if wide {
            x += strip_len;
            w = (w - strip_len).max(0.0);
        } else {
            y += strip_len;
            h = (h - strip_len).max(0.0);
        }

        if w <= 0.0 || h <= 0.0 {
            tracing::warn!(
                "Squarify: remaining rectangle collapsed ({}x{}) with {} items left, dropping them",
                w,
                h,
                remaining.len()
            );
            return;
        }

        rest = remaining;
    }
}

/// Emit one rectangle per strip member, sharing the strip's length by area.
fn place_strip<T: Copy>(
    strip: &[Weighted<T>],
    x: f64,
    y: f64,
    strip_len: f64,
    wide: bool,
    out: &mut Vec<PlacedRect<T>>,
) {
    let mut offset = 0.0;
    for s in strip {
        let seg_len = s.area / strip_len;
        let rect = if wide {
            Rect::new(x, y + offset, strip_len, seg_len)
        } else {
            Rect::new(x + offset, y, seg_len, strip_len)
        };
        out.push(PlacedRect {
            rect,
            value: s.value,
            item: s.item,
        });
        offset += seg_len;
    }
}

/// Worst aspect ratio the strip would have laid along `side` with total area `strip_area`.
fn worst_ratio<T>(strip: &[Weighted<T>], strip_area: f64, side: f64) -> f64 {
    let strip_len = strip_area / side;
    strip
        .iter()
        .map(|s| {
            let seg_len = s.area / strip_len;
            (strip_len / seg_len).max(seg_len / strip_len)
        })
        .fold(0.0, f64::max)
}
