//! CSS length values

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Length {
    Px(f64),
    /// Relative to the element's font size
    Em(f64),
    /// Relative to the root font size
    Rem(f64),
    Percent(f64),
}

impl Length {
    /// Parse a single CSS length token such as `10px`, `1.5em` or `0`.
    ///
    /// Unitless numbers other than zero are rejected, as in CSS.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        let (number, ctor): (&str, fn(f64) -> Length) = if let Some(n) = value.strip_suffix("px")
        {
            (n, Length::Px)
        } else if let Some(n) = value.strip_suffix("rem") {
            (n, Length::Rem)
        } else if let Some(n) = value.strip_suffix("em") {
            (n, Length::Em)
        } else if let Some(n) = value.strip_suffix('%') {
            (n, Length::Percent)
        } else {
            return match value.parse::<f64>() {
                Ok(n) if n == 0.0 => Some(Length::Px(0.0)),
                _ => None,
            };
        };

        let number = number.trim_end();
        if number.is_empty() {
            return None;
        }
        number
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(ctor)
    }

    /// Resolve to pixels. Percentages resolve against `percent_base`, or
    /// not at all when there is none.
    pub fn to_px(self, font_size: f64, root_font_size: f64, percent_base: Option<f64>) -> Option<f64> {
        match self {
            Length::Px(n) => Some(n),
            Length::Em(n) => Some(n * font_size),
            Length::Rem(n) => Some(n * root_font_size),
            Length::Percent(n) => percent_base.map(|base| n * base / 100.0),
        }
    }
}
