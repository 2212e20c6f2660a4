//! Theme configuration options for folder-search
//!
//! This module defines the `[theme]` table of the config file. The resulting [Theme] is
//! handed to the renderer as a plain value; nothing reads colors from global state.
//!
//! # Examples
//! ```toml
//! [theme]
//! selection_icon = "> "
//! [theme.selection]
//! fg = "#d75fd7"
//! [theme.error]
//! fg = "red"
//! ```

use crate::utils::parse_color;

use ratatui::style::{Color, Style};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    title: ColorPair,
    item: ColorPair,
    selection: ColorPair,
    error: ColorPair,
    help: ColorPair,
    filter: ColorPair,
    selection_icon: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            title: ColorPair {
                fg: Color::Indexed(230),
                bg: Color::Indexed(62),
            },
            item: ColorPair::default(),
            selection: ColorPair {
                fg: Color::Indexed(170),
                ..ColorPair::default()
            },
            error: ColorPair {
                fg: Color::Indexed(196),
                ..ColorPair::default()
            },
            help: ColorPair {
                fg: Color::Indexed(241),
                ..ColorPair::default()
            },
            filter: ColorPair {
                fg: Color::Yellow,
                ..ColorPair::default()
            },
            selection_icon: "> ".into(),
        }
    }
}

impl Theme {
    #[inline]
    pub fn title_style(&self) -> Style {
        self.title.as_style()
    }

    #[inline]
    pub fn item_style(&self) -> Style {
        self.item.as_style()
    }

    #[inline]
    pub fn selection_style(&self) -> Style {
        self.selection.as_style()
    }

    #[inline]
    pub fn error_style(&self) -> Style {
        self.error.as_style()
    }

    #[inline]
    pub fn help_style(&self) -> Style {
        self.help.as_style()
    }

    #[inline]
    pub fn filter_style(&self) -> Style {
        self.filter.as_style()
    }

    #[inline]
    pub fn selection_icon(&self) -> &str {
        &self.selection_icon
    }
}

/// Foreground and background color of one UI element.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

/// Both colors default to Color::Reset (terminal default)
impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    pub fn as_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
