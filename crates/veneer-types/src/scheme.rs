//! Light/dark color scheme hints.

use serde::{Deserialize, Serialize};

/// The color scheme a skin is designed for, or that the system prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Unknown,
    Light,
    Dark,
}

impl ColorScheme {
    /// Parse a scheme hint. Matching is case-insensitive; anything that is
    /// not `light` or `dark` is [`ColorScheme::Unknown`].
    pub fn from_hint(hint: &str) -> Self {
        if hint.eq_ignore_ascii_case("light") {
            ColorScheme::Light
        } else if hint.eq_ignore_ascii_case("dark") {
            ColorScheme::Dark
        } else {
            ColorScheme::Unknown
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorScheme::Unknown => "unknown",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

/// Query for the color scheme currently active in the runtime.
///
/// Consulted while probing plugins: skins matching the active scheme are
/// listed first among their factory's names.
pub trait ColorSchemeSource {
    fn color_scheme(&self) -> ColorScheme;
}

/// A fixed scheme is its own source.
impl ColorSchemeSource for ColorScheme {
    fn color_scheme(&self) -> ColorScheme {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_parsing_is_case_insensitive() {
        assert_eq!(ColorScheme::from_hint("Light"), ColorScheme::Light);
        assert_eq!(ColorScheme::from_hint("DARK"), ColorScheme::Dark);
        assert_eq!(ColorScheme::from_hint(""), ColorScheme::Unknown);
        assert_eq!(ColorScheme::from_hint("sepia"), ColorScheme::Unknown);
    }

    #[test]
    fn fixed_scheme_is_a_source() {
        let source: &dyn ColorSchemeSource = &ColorScheme::Dark;
        assert_eq!(source.color_scheme(), ColorScheme::Dark);
    }

    #[test]
    fn serde_uses_lowercase_labels() {
        #[derive(Deserialize)]
        struct Holder {
            scheme: ColorScheme,
        }
        let h: Holder = toml::from_str(r#"scheme = "dark""#).unwrap();
        assert_eq!(h.scheme, ColorScheme::Dark);
        assert_eq!(h.scheme.label(), "dark");
    }
}
