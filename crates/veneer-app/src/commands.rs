//! `veneer-skins` subcommands.

use std::io::Write;

use anyhow::{Context, Result, bail};

use veneer_sg::{BoxChild, BoxNode, RectangleContent};
use veneer_skin::{Skin, SkinManager};
use veneer_types::{BoxStyle, Rect};

const USAGE: &str = "usage: veneer-skins [--config <file>] [list | factories | paths | \
                     show <skin> | compose <skin> <element> <width> <height>]";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Factories,
    Paths,
    Show {
        skin: String,
    },
    Compose {
        skin: String,
        element: String,
        width: f32,
        height: f32,
    },
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match args.as_slice() {
            [] | ["list"] => Ok(Command::List),
            ["factories"] => Ok(Command::Factories),
            ["paths"] => Ok(Command::Paths),
            ["show", skin] => Ok(Command::Show {
                skin: skin.to_string(),
            }),
            ["compose", skin, element, width, height] => Ok(Command::Compose {
                skin: skin.to_string(),
                element: element.to_string(),
                width: parse_extent("width", width)?,
                height: parse_extent("height", height)?,
            }),
            _ => bail!("{USAGE}"),
        }
    }
}

fn parse_extent(label: &str, value: &str) -> Result<f32> {
    let v: f32 = value
        .parse()
        .with_context(|| format!("{label} '{value}' is not a number"))?;
    if !v.is_finite() || v < 0.0 {
        bail!("{label} must be a non-negative number, got {value}");
    }
    Ok(v)
}

pub fn run(command: &Command, manager: &mut SkinManager, out: &mut impl Write) -> Result<()> {
    match command {
        Command::List => {
            for name in manager.skin_names() {
                writeln!(out, "{name}")?;
            }
        },
        Command::Factories => {
            for info in manager.factories() {
                let state = if info.instantiated { "live" } else { "pending" };
                write!(out, "{:<20} {:<8} {:<7}", info.id, info.kind.label(), state)?;
                if let Some(path) = &info.path {
                    write!(out, " {}", path.display())?;
                }
                writeln!(out, "  [{}]", info.skin_names.join(", "))?;
            }
            let stats = manager.scan_stats();
            writeln!(
                out,
                "scanned {} dir(s): {} probed, {} registered, {} rejected, {} skipped",
                stats.directories, stats.probed, stats.registered, stats.rejected, stats.skipped
            )?;
        },
        Command::Paths => {
            for path in manager.plugin_paths() {
                writeln!(out, "{}", path.display())?;
            }
        },
        Command::Show { skin } => {
            let skin = create(manager, skin)?;
            show_skin(skin.as_ref(), out)?;
        },
        Command::Compose {
            skin,
            element,
            width,
            height,
        } => {
            let skin = create(manager, skin)?;
            let style = skin.box_style(element).with_context(|| {
                format!("skin '{}' has no style for '{element}'", skin.name())
            })?;
            compose(style, Rect::new(0.0, 0.0, *width, *height), out)?;
        },
    }
    Ok(())
}

fn create(manager: &mut SkinManager, name: &str) -> Result<Box<dyn Skin>> {
    let skin = manager
        .create_skin(name)
        .with_context(|| format!("no skin available for '{name}'"))?;
    if skin.name() != name {
        log::warn!("skin '{name}' not found, using '{}'", skin.name());
    }
    Ok(skin)
}

fn show_skin(skin: &dyn Skin, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{} ({})", skin.name(), skin.color_scheme().label())?;
    let palette = skin.palette();
    if !palette.is_empty() {
        writeln!(out, "palette:")?;
        for (role, color) in palette {
            writeln!(out, "  {role:<12} {color}")?;
        }
    }
    let elements = skin.styled_elements();
    if !elements.is_empty() {
        writeln!(out, "boxes:")?;
        for element in elements {
            if let Some(style) = skin.box_style(&element) {
                writeln!(out, "  {element:<12} {}", describe_style(style))?;
            }
        }
    }
    Ok(())
}

fn describe_style(style: &BoxStyle) -> String {
    let mut parts = Vec::new();
    if !style.shape.is_rectangle() {
        parts.push(format!("radius {}", style.shape.top_left));
    }
    if !style.border_metrics.is_null() && style.border_colors.is_visible() {
        parts.push(format!("border {}", style.border_metrics.left));
    }
    if style.gradient.is_visible() {
        let gradient = &style.gradient;
        let shading = if gradient.is_monochrome() {
            "solid"
        } else if gradient.kind.is_linear() {
            "linear"
        } else {
            "non-linear"
        };
        parts.push(format!(
            "{shading} {:?} fill ({} stops)",
            gradient.kind,
            gradient.stops.len()
        ));
    }
    if !style.shadow_metrics.is_null() && style.shadow_color.is_visible() {
        parts.push(format!("shadow blur {}", style.shadow_metrics.blur_radius()));
    }
    if parts.is_empty() {
        "empty".to_string()
    } else {
        parts.join(", ")
    }
}

fn compose(style: &BoxStyle, rect: Rect, out: &mut impl Write) -> Result<()> {
    let mut node = BoxNode::new();
    node.update_from_style(rect, style);
    if node.children().is_empty() {
        writeln!(out, "(no children)")?;
    }
    for (role, child) in node.children().iter() {
        match child {
            BoxChild::Rectangle(rectangle) => {
                let kind = rectangle.content().map_or("empty", RectangleContent::kind);
                let area = rectangle
                    .content()
                    .map(RectangleContent::rect)
                    .unwrap_or_default();
                writeln!(out, "{role:?}: {} {kind} {}", child.id(), describe_rect(area))?;
            },
            BoxChild::Shadow(shadow) => {
                writeln!(
                    out,
                    "{role:?}: {} shadow {} blur {} {}",
                    child.id(),
                    describe_rect(shadow.rect()),
                    shadow.blur_radius(),
                    shadow.color()
                )?;
            },
        }
    }
    Ok(())
}

fn describe_rect(r: Rect) -> String {
    format!("{}x{}+{}+{}", r.width, r.height, r.x, r.y)
}
