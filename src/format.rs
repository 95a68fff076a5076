/// Placeholder for a missing figure.
pub const MISSING: &str = "—";

/// Format dollars into a short human-readable string ("$2.91T", "$512.0M").
pub fn format_cap(dollars: Option<f64>) -> String {
    const K: f64 = 1e3;
    const M: f64 = 1e6;
    const B: f64 = 1e9;
    const T: f64 = 1e12;

    let Some(n) = dollars else {
        return MISSING.to_string();
    };
    if n >= T {
        format!("${:.2}T", n / T)
    } else if n >= B {
        format!("${:.2}B", n / B)
    } else if n >= M {
        format!("${:.1}M", n / M)
    } else if n >= K {
        format!("${:.0}K", n / K)
    } else {
        format!("${}", n)
    }
}

/// Integer with thousands separators ("1,234,567").
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fraction as a one-decimal percentage ("12.5%").
pub fn format_pct(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}
