//! The factory and skin interfaces.

use std::fmt::Debug;

use veneer_types::{BoxStyle, Color, ColorScheme};

/// Produces named skins.
///
/// A factory advertises the skins it can create through [`skin_names`];
/// the registry uses that list to decide which factory owns which name.
///
/// [`skin_names`]: SkinFactory::skin_names
pub trait SkinFactory {
    /// Names of the skins this factory can create, in the factory's
    /// preferred order.
    fn skin_names(&self) -> Vec<String>;

    /// Create the skin called `name`, or `None` if this factory does not
    /// know it.
    fn create_skin(&self, name: &str) -> Option<Box<dyn Skin>>;
}

/// A named visual theme.
pub trait Skin: Debug {
    fn name(&self) -> &str;

    /// The scheme this skin was designed for.
    fn color_scheme(&self) -> ColorScheme {
        ColorScheme::Unknown
    }

    /// A named palette color such as `background` or `accent`.
    fn color(&self, _role: &str) -> Option<Color> {
        None
    }

    /// Every palette entry, sorted by role.
    fn palette(&self) -> Vec<(String, Color)> {
        Vec::new()
    }

    /// The box style for a UI element such as `button` or `panel`.
    fn box_style(&self, _element: &str) -> Option<&BoxStyle> {
        None
    }

    /// Elements this skin has box styles for, sorted.
    fn styled_elements(&self) -> Vec<String> {
        Vec::new()
    }
}
