use serde::Serialize;

/// How treemap rectangles are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ColorMode {
    /// Continuous blue ramp by relative market cap
    #[default]
    Scale,
    /// Categorical palette by primary exchange
    Exchange,
}

#[derive(Debug, Clone, Copy)]
pub struct ColorSettings {
    pub mode: ColorMode,
    /// Exponent of the sub-linear transform `t = (value / max)^exponent`
    pub scale_exponent: f64,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            mode: ColorMode::Scale,
            scale_exponent: 0.4,
        }
    }
}

/// Our custom color representation, components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From a packed `0xRRGGBB` literal.
    pub fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as f32 / 255.0,
            g: ((rgb >> 8) & 0xFF) as f32 / 255.0,
            b: (rgb & 0xFF) as f32 / 255.0,
        }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// CSS-style `#rrggbb`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl Serialize for AppColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Fallback for exchanges outside the palette.
pub const OTHER_EXCHANGE_RGB: u32 = 0x6366f1;
/// Choropleth fill for states with nothing in them.
pub const EMPTY_STATE_RGB: u32 = 0x1e293b;

/// Categorical palette keyed by primary exchange MIC.
pub fn exchange_color(exchange: Option<&str>) -> AppColor {
    match exchange {
        Some("XNYS") => AppColor::from_hex(0x3b82f6),
        Some("XNAS") => AppColor::from_hex(0x22c55e),
        Some("XASE") => AppColor::from_hex(0xeab308),
        Some("BATS") => AppColor::from_hex(0xf97316),
        Some("OTC") => AppColor::from_hex(0xa855f7),
        _ => AppColor::from_hex(OTHER_EXCHANGE_RGB),
    }
}

/// Human name for an exchange code.
pub fn exchange_name(exchange: Option<&str>) -> &str {
    match exchange {
        Some("XNYS") => "NYSE",
        Some("XNAS") => "NASDAQ",
        Some("XASE") => "NYSE American",
        Some("BATS") => "Cboe BZX",
        Some("OTC") => "OTC",
        Some(other) if !other.is_empty() => other,
        _ => "—",
    }
}

/// Continuous ramp: small values stay dark desaturated blue, the largest is bright.
/// The power transform keeps the long tail from collapsing into one shade.
pub fn scale_color(value: f64, max: f64, exponent: f64) -> AppColor {
    let t = if max > 0.0 {
        (value / max).clamp(0.0, 1.0).powf(exponent) as f32
    } else {
        0.0
    };
    let hue = 210.0 + (1.0 - t) * 30.0;
    let sat = 0.60 + t * 0.30;
    let light = 0.20 + t * 0.35;
    hsl_to_rgb(hue / 360.0, sat, light)
}

/// Treemap fill for one rectangle under the current settings.
pub fn treemap_color(value: f64, max: f64, exchange: Option<&str>, settings: &ColorSettings) -> AppColor {
    match settings.mode {
        ColorMode::Scale => scale_color(value, max, settings.scale_exponent),
        ColorMode::Exchange => exchange_color(exchange),
    }
}

/// Choropleth fill: square-root ramp from slate to blue.
pub fn choropleth_color(value: f64, max: f64) -> AppColor {
    if value <= 0.0 || max <= 0.0 {
        return AppColor::from_hex(EMPTY_STATE_RGB);
    }
    let t = (value / max).clamp(0.0, 1.0).sqrt() as f32;
    let r = 30.0 + (59.0 - 30.0) * (1.0 - t);
    let g = 41.0 + (130.0 - 41.0) * t * 0.5;
    let b = 59.0 + (246.0 - 59.0) * t;
    AppColor::new(r.round() / 255.0, g.round() / 255.0, b.round() / 255.0)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> AppColor {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = (h * 6.0).rem_euclid(6.0);
    let x = c * (1.0 - (h6.rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h6.floor() as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    AppColor::new(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5).to_rgb8(), [255, 0, 0]);
        assert_eq!(hsl_to_rgb(120.0 / 360.0, 1.0, 0.5).to_rgb8(), [0, 255, 0]);
        assert_eq!(hsl_to_rgb(240.0 / 360.0, 1.0, 0.5).to_rgb8(), [0, 0, 255]);
        assert_eq!(hsl_to_rgb(0.3, 0.0, 1.0).to_rgb8(), [255, 255, 255]);
    }

    #[test]
    fn scale_gets_brighter_with_value() {
        let lum = |c: AppColor| c.r + c.g + c.b;
        let small = scale_color(1.0, 1000.0, 0.4);
        let mid = scale_color(100.0, 1000.0, 0.4);
        let top = scale_color(1000.0, 1000.0, 0.4);
        assert!(lum(small) < lum(mid) && lum(mid) < lum(top));
        // max value lands on hsl(210, 90%, 55%)
        assert_eq!(top.to_hex(), hsl_to_rgb(210.0 / 360.0, 0.9, 0.55).to_hex());
    }

    #[test]
    fn sub_linear_transform_separates_small_values() {
        let a = scale_color(1.0, 10_000.0, 0.4);
        let b = scale_color(10.0, 10_000.0, 0.4);
        assert_ne!(a.to_hex(), b.to_hex());
    }

    #[test]
    fn palette_and_fallback() {
        assert_eq!(exchange_color(Some("XNYS")).to_hex(), "#3b82f6");
        assert_eq!(exchange_color(Some("XNAS")).to_hex(), "#22c55e");
        assert_eq!(exchange_color(Some("LSE")), AppColor::from_hex(OTHER_EXCHANGE_RGB));
        assert_eq!(exchange_color(None).to_hex(), "#6366f1");
        assert_eq!(exchange_name(Some("XNAS")), "NASDAQ");
        assert_eq!(exchange_name(Some("ARCX")), "ARCX");
    }

    #[test]
    fn treemap_color_follows_mode() {
        let scale = ColorSettings::default();
        let exchange = ColorSettings { mode: ColorMode::Exchange, ..scale };
        assert_eq!(treemap_color(5.0, 10.0, Some("XASE"), &exchange).to_hex(), "#eab308");
        assert_eq!(treemap_color(5.0, 10.0, Some("XASE"), &scale), scale_color(5.0, 10.0, 0.4));
    }

    #[test]
    fn choropleth_ramp() {
        assert_eq!(choropleth_color(0.0, 10.0).to_hex(), "#1e293b");
        assert_eq!(choropleth_color(10.0, 10.0).to_rgb8(), [30, 86, 246]);
        assert_eq!(choropleth_color(1.0, 1.0e12).to_rgb8()[0], 59);
    }
}
