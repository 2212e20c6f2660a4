//! Input action handler methods for folder-search.
//!
//! This module implements [AppState] methods that process key events for each
//! action group and for the filter input mode.

use crate::app::keymap::{Action, NavAction, SearchAction, SystemAction};
use crate::app::state::{AppState, InputMode, KeypressResult};
use crate::core::paths;
use crate::error::NavError;

use crossterm::event::{KeyCode::*, KeyEvent, KeyModifiers};

/// AppState input and action handlers
impl<'a> AppState<'a> {
    /// Handles key events while the filter pattern is being edited.
    ///
    /// Every edit replaces the search options and rescans. Enter and Esc leave the
    /// mode and keep the pattern.
    pub(super) fn handle_input_mode(&mut self, key: KeyEvent) -> Result<KeypressResult, NavError> {
        match key.code {
            Enter | Esc => {
                self.mode = InputMode::Normal;
            }
            Backspace => {
                if self.filter_buffer.pop().is_some() {
                    self.apply_filter()?;
                }
            }
            Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.handle_sys_action(SystemAction::Quit);
            }
            Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.filter_buffer.push(c);
                self.apply_filter()?;
            }
            _ => {}
        }
        Ok(KeypressResult::Consumed)
    }

    /// Strict policy after a failed scan: everything but quit is swallowed.
    pub(super) fn handle_halted(&mut self, key: KeyEvent) -> Result<KeypressResult, NavError> {
        match self.keymap.lookup(key) {
            Some(Action::System(SystemAction::Quit)) => {
                self.handle_sys_action(SystemAction::Quit)
            }
            _ => Ok(KeypressResult::Consumed),
        }
    }

    /// Handles cursor movement and directory changes.
    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> Result<KeypressResult, NavError> {
        match action {
            NavAction::GoUp => {
                self.move_up();
            }
            NavAction::GoDown => {
                self.move_down();
            }
            NavAction::GoParent => {
                let current = self.nav.current_path().to_path_buf();
                if let Some(name) = current.file_name() {
                    let parent = paths::parent(&current);
                    self.focus = Some((parent, name.to_string_lossy().into_owned()));
                }
                self.nav.go_parent()?;
            }
            NavAction::GoIntoDir => {
                let Some(name) = self.selected_name().map(str::to_owned) else {
                    return Ok(KeypressResult::Continue);
                };
                self.nav.enter_child(&name)?;
            }
            NavAction::Refresh => self.nav.refresh()?,
        }
        Ok(KeypressResult::Continue)
    }

    /// Handles actions that change the search options.
    pub(super) fn handle_search_action(
        &mut self,
        action: SearchAction,
    ) -> Result<KeypressResult, NavError> {
        match action {
            SearchAction::Filter => {
                self.filter_buffer = self.nav.options().pattern().to_string();
                self.mode = InputMode::Filter;
                return Ok(KeypressResult::Consumed);
            }
            SearchAction::ClearFilter => {
                self.filter_buffer.clear();
                self.apply_filter()?;
            }
            SearchAction::ToggleCase => {
                let toggled = !self.nav.options().case_sensitive();
                let options = self.nav.options().with_case_sensitive(toggled);
                self.nav.set_options(options)?;
            }
        }
        Ok(KeypressResult::Continue)
    }

    pub(super) fn handle_sys_action(&mut self, action: SystemAction) -> Result<KeypressResult, NavError> {
        match action {
            SystemAction::Quit => {
                self.nav.quit()?;
                Ok(KeypressResult::Quit)
            }
            SystemAction::Select => {
                let Some(name) = self.selected_name().map(str::to_owned) else {
                    return Ok(KeypressResult::Consumed);
                };
                let chosen = self.nav.select(&name)?;
                Ok(KeypressResult::Selected(chosen))
            }
        }
    }

    // Handlers

    fn apply_filter(&mut self) -> Result<(), NavError> {
        let options = self.nav.options().with_pattern(self.filter_buffer.as_str());
        self.nav.set_options(options)
    }

    /// Moves the cursor up by one entry, wrapping around at the top.
    fn move_up(&mut self) -> bool {
        let len = self.nav.items().len();
        if len == 0 {
            return false;
        }

        if self.selected == 0 {
            self.selected = len - 1;
        } else {
            self.selected -= 1;
        }
        true
    }

    /// Moves the cursor down by one entry, wrapping around at the bottom.
    fn move_down(&mut self) -> bool {
        let len = self.nav.items().len();
        if len == 0 {
            return false;
        }

        self.selected = (self.selected + 1) % len;
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::app::ErrorPolicy;
    use crate::app::state::tests::{app_at, key, settle};
    use crate::app::state::{InputMode, KeypressResult};
    use crate::config::Config;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn typing_a_filter_rescans_each_edit() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        for name in ["src", "scripts", "target"] {
            fs::create_dir(temp.path().join(name))?;
        }

        let mut app = app_at(&config, temp.path(), ErrorPolicy::Lenient)?;
        assert_eq!(app.handle_keypress(key(KeyCode::Char('/')))?, KeypressResult::Consumed);
        assert_eq!(app.mode(), InputMode::Filter);

        app.handle_keypress(key(KeyCode::Char('S')))?;
        app.handle_keypress(key(KeyCode::Char('c')))?;
        settle(&mut app)?;
        assert_eq!(app.filter_buffer(), "Sc");
        assert_eq!(app.nav().items(), ["scripts".to_string()]);

        app.handle_keypress(key(KeyCode::Backspace))?;
        settle(&mut app)?;
        assert_eq!(app.nav().items(), ["scripts".to_string(), "src".to_string()]);

        app.handle_keypress(key(KeyCode::Enter))?;
        assert_eq!(app.mode(), InputMode::Normal);
        assert_eq!(app.nav().options().pattern(), "S");

        app.handle_keypress(key(KeyCode::Char('q')))?;
        Ok(())
    }

    #[test]
    fn toggle_case_and_clear_filter() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::create_dir(temp.path().join("Test"))?;
        fs::create_dir(temp.path().join("test"))?;

        let mut app = app_at(&config, temp.path(), ErrorPolicy::Lenient)?;
        app.handle_keypress(key(KeyCode::Char('/')))?;
        for c in "test".chars() {
            app.handle_keypress(key(KeyCode::Char(c)))?;
        }
        app.handle_keypress(key(KeyCode::Esc))?;
        settle(&mut app)?;
        assert_eq!(app.nav().items().len(), 2);

        app.handle_keypress(key(KeyCode::Char('c')))?;
        settle(&mut app)?;
        assert!(app.nav().options().case_sensitive());
        assert_eq!(app.nav().items(), ["test".to_string()]);

        let clear = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL);
        app.handle_keypress(clear)?;
        settle(&mut app)?;
        assert_eq!(app.nav().options().pattern(), "");
        assert_eq!(app.filter_buffer(), "");

        app.handle_keypress(key(KeyCode::Char('q')))?;
        Ok(())
    }

    #[test]
    fn select_returns_chosen_path() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::create_dir(temp.path().join("alpha"))?;
        fs::create_dir(temp.path().join("beta"))?;

        let mut app = app_at(&config, temp.path(), ErrorPolicy::Lenient)?;
        app.handle_keypress(key(KeyCode::Down))?;
        let result = app.handle_keypress(key(KeyCode::Enter))?;
        assert_eq!(result, KeypressResult::Selected(temp.path().join("beta")));
        Ok(())
    }

    #[test]
    fn select_in_empty_dir_is_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;

        let mut app = app_at(&config, temp.path(), ErrorPolicy::Lenient)?;
        assert_eq!(app.handle_keypress(key(KeyCode::Enter))?, KeypressResult::Consumed);
        assert_eq!(app.handle_keypress(key(KeyCode::Right))?, KeypressResult::Continue);
        assert!(!app.nav().is_pending());
        assert_eq!(app.handle_keypress(key(KeyCode::Char('q')))?, KeypressResult::Quit);
        Ok(())
    }

    #[test]
    fn ctrl_c_quits_from_filter_mode() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;

        let mut app = app_at(&config, temp.path(), ErrorPolicy::Lenient)?;
        app.handle_keypress(key(KeyCode::Char('/')))?;
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_keypress(ctrl_c)?, KeypressResult::Quit);
        Ok(())
    }
}
