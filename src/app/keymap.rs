//! Key mapping and action dispatch for folder-search
//!
//! Maps key strings from the config onto [Action] variants. Key strings accept
//! several spellings: `"Ctrl+c"`, `"<c-c>"`, `"Up"`, `"F5"`, `"space"`, or a single
//! character.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action the browser reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Nav(NavAction),
    Search(SearchAction),
    System(SystemAction),
}

/// Cursor movement and directory changes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NavAction {
    GoUp,
    GoDown,
    GoParent,
    GoIntoDir,
    Refresh,
}

/// Actions that replace the search options
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SearchAction {
    Filter,
    ClearFilter,
    ToggleCase,
}

/// Actions that end the session
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SystemAction {
    Select,
    Quit,
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub(crate) struct Key {
    pub(crate) code: KeyCode,
    pub(crate) modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, which is built from the config
pub(crate) struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the `[keys]` settings
    #[rustfmt::skip]
    pub(crate) fn from_keys(keys: &crate::config::Keys) -> Self {
        let mut map = HashMap::new();

        use NavAction as N;
        use SearchAction as S;
        use SystemAction as Sys;

        bind(keys.go_up(),          Action::Nav(N::GoUp),           &mut map);
        bind(keys.go_down(),        Action::Nav(N::GoDown),         &mut map);
        bind(keys.go_parent(),      Action::Nav(N::GoParent),       &mut map);
        bind(keys.go_into_dir(),    Action::Nav(N::GoIntoDir),      &mut map);
        bind(keys.refresh(),        Action::Nav(N::Refresh),        &mut map);

        bind(keys.filter(),         Action::Search(S::Filter),      &mut map);
        bind(keys.clear_filter(),   Action::Search(S::ClearFilter), &mut map);
        bind(keys.toggle_case(),    Action::Search(S::ToggleCase),  &mut map);

        bind(keys.select(),         Action::System(Sys::Select),    &mut map);
        bind(keys.quit(),           Action::System(Sys::Quit),      &mut map);

        Keymap { map }
    }

    /// Looks up the action for a given key event
    pub(crate) fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        // terminals report shifted characters with SHIFT set, config strings don't
        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>') && s.len() > 2;
    let mut input = if is_bracketed {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    };

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    // a lone separator character is a key of its own
    if input == "+" || input == "-" {
        return Some(Key {
            code: KeyCode::Char(input.chars().next()?),
            modifiers,
        });
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, ?action, "ignoring unparsable key binding"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Keys;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parse_key_spellings() {
        let ctrl_c = Key {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(parse_key("Ctrl+c"), Some(ctrl_c));
        assert_eq!(parse_key("<c-c>"), Some(ctrl_c));
        assert_eq!(parse_key("Up").map(|k| k.code), Some(KeyCode::Up));
        assert_eq!(parse_key("F5").map(|k| k.code), Some(KeyCode::F(5)));
        assert_eq!(parse_key("space").map(|k| k.code), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("/").map(|k| k.code), Some(KeyCode::Char('/')));
        assert_eq!(parse_key("-").map(|k| k.code), Some(KeyCode::Char('-')));
        assert_eq!(parse_key("Hyper+x"), None);
    }

    #[test]
    fn default_keys_resolve() {
        let keymap = Keymap::from_keys(&Keys::default());
        assert_eq!(
            keymap.lookup(press(KeyCode::Right, KeyModifiers::NONE)),
            Some(Action::Nav(NavAction::GoIntoDir))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Left, KeyModifiers::NONE)),
            Some(Action::Nav(NavAction::GoParent))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::System(SystemAction::Select))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::System(SystemAction::Quit))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::System(SystemAction::Quit))
        );
        assert_eq!(keymap.lookup(press(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn shifted_char_falls_back_to_plain_binding() {
        let keymap = Keymap::from_keys(&Keys::default());
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('/'), KeyModifiers::SHIFT)),
            Some(Action::Search(SearchAction::Filter))
        );
    }
}
