//! Helpers for folder-search.
//!
//! Small utility functions used across the crate:
//! - Color parsing from names, palette indices or hex codes
//! - Displaying the home directory as "~" in paths
//! - Resolving the directory given on the command line

use crate::core::paths;
use crate::error::InitError;

use ratatui::style::Color;
use std::env;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Parses a string (color name, palette index or hex) into a ratatui::style::Color
///
/// Supports standard names (red, green, etc.), 256-color palette indices ("170")
/// as well as hex values (#RRGGBB or #RGB). Anything else is Color::Reset.
pub fn parse_color(s: &str) -> Color {
    let s = s.trim();
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => {
            if let Ok(idx) = s.parse::<u8>() {
                return Color::Indexed(idx);
            }
            if let Some(color) = s.strip_prefix('#') {
                let expanded = match color.len() {
                    6 => color.to_string(),
                    3 => color.chars().flat_map(|c| [c, c]).collect(),
                    _ => return Color::Reset,
                };
                if let Ok(rgb) = u32::from_str_radix(&expanded, 16) {
                    return Color::Rgb(
                        ((rgb >> 16) & 0xFF) as u8,
                        ((rgb >> 8) & 0xFF) as u8,
                        (rgb & 0xFF) as u8,
                    );
                }
            }
            // fallback
            Color::Reset
        }
    }
}

/// The user's home directory, if it can be determined.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Util function to shorten the home directory to ~.
/// Used for the title bar.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    shorten_with_home(path.as_ref(), get_home().as_deref())
}

fn shorten_with_home(path: &Path, home: Option<&Path>) -> String {
    if let Some(home_dir) = home
        && let Ok(stripped) = path.strip_prefix(home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}

/// Turns the `-dir` argument into an absolute, normalized start directory.
///
/// Relative paths (including the default ".") are resolved against the working
/// directory. Whether the directory can be listed is left to the initial scan.
pub fn resolve_initial_dir(arg: &str) -> Result<PathBuf, InitError> {
    let path = Path::new(arg);
    if path.is_absolute() {
        return Ok(paths::normalize(path));
    }
    let cwd = env::current_dir().map_err(InitError::CurrentDir)?;
    Ok(paths::absolutize(path, &cwd))
}
