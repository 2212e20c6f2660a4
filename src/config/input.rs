//! Keybinding configuration for folder-search
//!
//! This module defines the `[keys]` table read from the config file. Each action takes
//! a list of key strings, parsed by [crate::app::keymap].

use serde::Deserialize;

/// Keys bound to each action
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    go_up: Vec<String>,
    go_down: Vec<String>,
    go_parent: Vec<String>,
    go_into_dir: Vec<String>,
    select: Vec<String>,
    quit: Vec<String>,
    filter: Vec<String>,
    clear_filter: Vec<String>,
    toggle_case: Vec<String>,
    refresh: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    go_up,
    go_down,
    go_parent,
    go_into_dir,
    select,
    quit,
    filter,
    clear_filter,
    toggle_case,
    refresh,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            go_up: vec!["k".into(), "Up".into()],
            go_down: vec!["j".into(), "Down".into()],
            go_parent: vec!["h".into(), "Left".into(), "Backspace".into()],
            go_into_dir: vec!["l".into(), "Right".into()],
            select: vec!["Enter".into()],

            quit: vec!["q".into(), "Esc".into(), "Ctrl+c".into()],

            filter: vec!["/".into()],
            clear_filter: vec!["Ctrl+f".into()],
            toggle_case: vec!["c".into()],
            refresh: vec!["r".into()],
        }
    }
}
