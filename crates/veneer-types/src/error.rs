//! Error types for Veneer.

use std::io;

/// Errors produced by the Veneer crates.
///
/// Most failure paths in the skin registry degrade silently to "no skin
/// found"; these errors surface from the places that do report problems
/// (configuration, theme packs, plugin resolution) and are otherwise
/// logged and discarded.
#[derive(Debug, thiserror::Error)]
pub enum VeneerError {
    #[error("config error: {0}")]
    Config(String),

    #[error("plugin error: {0}")]
    Plugin(String),

    #[error("skin error: {0}")]
    Skin(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, VeneerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let e = VeneerError::Config("missing key".into());
        assert_eq!(format!("{e}"), "config error: missing key");
    }

    #[test]
    fn plugin_error_display() {
        let e = VeneerError::Plugin("no resolver for nord".into());
        assert_eq!(format!("{e}"), "plugin error: no resolver for nord");
    }

    #[test]
    fn skin_error_display() {
        let e = VeneerError::Skin("duplicate palette".into());
        assert_eq!(format!("{e}"), "skin error: duplicate palette");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: VeneerError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: VeneerError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: VeneerError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(VeneerError::Plugin("oops".into()));
        assert!(r.is_err());
    }
}
