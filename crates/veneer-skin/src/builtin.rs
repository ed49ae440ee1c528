//! The skins shipped with Veneer.

use veneer_types::Result;

use crate::theme::ThemeFactory;

/// Id under which the built-in factory is normally registered.
pub const DEFAULT_FACTORY_ID: &str = "veneer";

const DEFAULT_PACK: &str = include_str!("../themes/default.toml");

/// The embedded "Veneer Light" / "Veneer Dark" pack.
pub fn default_factory() -> Result<ThemeFactory> {
    ThemeFactory::from_toml(DEFAULT_PACK, "themes/default.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::SkinFactory;
    use veneer_types::ColorScheme;

    #[test]
    fn default_pack_parses() {
        let factory = default_factory().unwrap();
        assert_eq!(factory.factory_id(), DEFAULT_FACTORY_ID);
        assert_eq!(factory.skin_names(), vec!["Veneer Light", "Veneer Dark"]);
    }

    #[test]
    fn default_skins_style_common_elements() {
        let factory = default_factory().unwrap();
        for name in factory.skin_names() {
            let skin = factory.create_skin(&name).unwrap();
            assert_ne!(skin.color_scheme(), ColorScheme::Unknown);
            assert!(skin.color("background").is_some());
            for element in ["button", "panel", "focus_ring"] {
                assert!(skin.box_style(element).is_some(), "{name} lacks {element}");
            }
        }
    }

    #[test]
    fn dark_button_needs_split_geometry() {
        let factory = default_factory().unwrap();
        let skin = factory.create_skin("Veneer Dark").unwrap();
        let button = skin.box_style("button").unwrap();
        assert!(!button.gradient.is_monochrome());
        assert!(!button.gradient.kind.is_axis_aligned());
    }
}
