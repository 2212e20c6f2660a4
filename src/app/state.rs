//! Application state and key dispatch for folder-search.
//!
//! [AppState] wraps the [Navigator] with everything that only matters to an
//! interactive session:
//! - the selection cursor and the remembered cursor position per directory
//! - the filter input mode and its edit buffer
//! - the keymap built from the config
//!
//! It is the state object handed to the terminal loop and the renderer.

use crate::app::keymap::{Action, Keymap};
use crate::app::nav::{NavPhase, Navigator};
use crate::config::Config;
use crate::error::NavError;

use crossterm::event::KeyEvent;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Result of a single processed keypress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum KeypressResult {
    Continue,
    Consumed,
    Quit,
    Selected(PathBuf),
}

/// Whether keys drive navigation or edit the filter pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum InputMode {
    #[default]
    Normal,
    Filter,
}

/// Interactive session state.
pub(crate) struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,
    pub(super) nav: Navigator,

    pub(super) selected: usize,
    pub(super) positions: HashMap<PathBuf, usize>,
    /// Directory the cursor currently belongs to.
    pub(super) shown: PathBuf,
    /// Name to focus once the given directory is shown.
    pub(super) focus: Option<(PathBuf, String)>,

    pub(super) mode: InputMode,
    pub(super) filter_buffer: String,
}

impl<'a> AppState<'a> {
    /// Wraps a navigator whose initial scan has already been applied.
    pub(crate) fn new(config: &'a Config, nav: Navigator) -> Self {
        let filter_buffer = nav.options().pattern().to_string();
        let shown = nav.current_path().to_path_buf();
        Self {
            config,
            keymap: Keymap::from_keys(config.keys()),
            nav,
            selected: 0,
            positions: HashMap::new(),
            shown,
            focus: None,
            mode: InputMode::Normal,
            filter_buffer,
        }
    }

    // Getters / accessors

    #[inline]
    pub(crate) fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub(crate) fn nav(&self) -> &Navigator {
        &self.nav
    }

    #[inline]
    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    #[inline]
    pub(crate) fn mode(&self) -> InputMode {
        self.mode
    }

    #[inline]
    pub(crate) fn filter_buffer(&self) -> &str {
        &self.filter_buffer
    }

    pub(crate) fn selected_name(&self) -> Option<&str> {
        self.nav.items().get(self.selected).map(String::as_str)
    }

    /// Applies a finished scan if one is waiting. Returns true when a redraw is due.
    pub(crate) fn tick(&mut self) -> Result<bool, NavError> {
        let changed = self.nav.poll()?;
        if changed {
            self.sync_selection();
        }
        Ok(changed)
    }

    /// Central key handler
    pub(crate) fn handle_keypress(&mut self, key: KeyEvent) -> Result<KeypressResult, NavError> {
        let result = self.dispatch(key);
        // navigation calls may have applied a pending response while settling
        self.sync_selection();
        result
    }

    fn dispatch(&mut self, key: KeyEvent) -> Result<KeypressResult, NavError> {
        if self.nav.phase() == &NavPhase::Halted {
            return self.handle_halted(key);
        }

        if self.mode == InputMode::Filter {
            return self.handle_input_mode(key);
        }

        match self.keymap.lookup(key) {
            Some(Action::Nav(act)) => {
                // the cursor has to belong to the directory the action runs in
                if self.nav.settle_pending()? {
                    self.sync_selection();
                    if self.nav.phase() == &NavPhase::Halted {
                        return Ok(KeypressResult::Consumed);
                    }
                }
                self.handle_nav_action(act)
            }
            Some(Action::Search(act)) => self.handle_search_action(act),
            Some(Action::System(act)) => self.handle_sys_action(act),
            None => Ok(KeypressResult::Continue),
        }
    }

    /// Moves the cursor to the right entry after the shown directory or its listing changed.
    pub(super) fn sync_selection(&mut self) {
        let current = self.nav.current_path().to_path_buf();

        if current != self.shown {
            self.positions.insert(self.shown.clone(), self.selected);
            self.selected = self
                .focus_index(&current)
                .or_else(|| self.positions.get(&current).copied())
                .unwrap_or(0);
            self.shown = current;
        }

        if !self.nav.is_pending() {
            self.focus = None;
        }

        let len = self.nav.items().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn focus_index(&self, current: &Path) -> Option<usize> {
        let (dir, name) = self.focus.as_ref()?;
        if dir != current {
            return None;
        }
        self.nav.items().iter().position(|item| item == name)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::ErrorPolicy;
    use crate::core::worker::ScanWorker;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::fs;
    use tempfile::tempdir;

    pub(crate) fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub(crate) fn app_at<'a>(
        config: &'a Config,
        path: &Path,
        policy: ErrorPolicy,
    ) -> Result<AppState<'a>, Box<dyn std::error::Error>> {
        let worker = ScanWorker::spawn()?;
        let mut nav = Navigator::start(
            path.to_path_buf(),
            config.general().search_options(),
            policy,
            worker,
        )?;
        nav.await_initial()?;
        Ok(AppState::new(config, nav))
    }

    /// Drives the app until no scan is pending.
    pub(crate) fn settle(app: &mut AppState) -> Result<(), Box<dyn std::error::Error>> {
        while app.nav().is_pending() {
            app.tick()?;
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        Ok(())
    }

    #[test]
    fn unbound_key_continues() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        let mut app = app_at(&config, temp.path(), ErrorPolicy::Lenient)?;
        let result = app.handle_keypress(key(KeyCode::Null))?;
        assert_eq!(result, KeypressResult::Continue);
        app.handle_keypress(key(KeyCode::Char('q')))?;
        Ok(())
    }

    #[test]
    fn parent_focuses_dir_just_left() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        for name in ["a", "b", "c"] {
            fs::create_dir(temp.path().join(name))?;
        }
        fs::create_dir(temp.path().join("c").join("inner"))?;

        let mut app = app_at(&config, temp.path(), ErrorPolicy::Lenient)?;
        app.handle_keypress(key(KeyCode::Up))?; // wraps to the last entry
        assert_eq!(app.selected_name(), Some("c"));

        app.handle_keypress(key(KeyCode::Right))?;
        settle(&mut app)?;
        assert_eq!(app.nav().current_path(), temp.path().join("c"));
        assert_eq!(app.selected(), 0);

        app.handle_keypress(key(KeyCode::Left))?;
        settle(&mut app)?;
        assert_eq!(app.nav().current_path(), temp.path());
        assert_eq!(app.selected_name(), Some("c"));

        app.handle_keypress(key(KeyCode::Char('q')))?;
        Ok(())
    }

    #[test]
    fn halted_accepts_only_quit() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::create_dir(temp.path().join("gone"))?;

        let mut app = app_at(&config, temp.path(), ErrorPolicy::Strict)?;
        fs::remove_dir(temp.path().join("gone"))?;
        app.handle_keypress(key(KeyCode::Right))?;
        settle(&mut app)?;
        assert_eq!(app.nav().phase(), &NavPhase::Halted);

        assert_eq!(app.handle_keypress(key(KeyCode::Enter))?, KeypressResult::Consumed);
        assert_eq!(app.handle_keypress(key(KeyCode::Char('r')))?, KeypressResult::Consumed);
        assert_eq!(app.handle_keypress(key(KeyCode::Char('q')))?, KeypressResult::Quit);
        assert_eq!(app.nav().phase(), &NavPhase::Quit);
        Ok(())
    }

    #[test]
    fn cursor_clamps_when_listing_shrinks() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        for name in ["one", "two", "three"] {
            fs::create_dir(temp.path().join(name))?;
        }

        let mut app = app_at(&config, temp.path(), ErrorPolicy::Lenient)?;
        app.handle_keypress(key(KeyCode::Up))?;
        assert_eq!(app.selected(), 2);

        fs::remove_dir(temp.path().join("two"))?;
        fs::remove_dir(temp.path().join("three"))?;
        app.handle_keypress(key(KeyCode::Char('r')))?;
        settle(&mut app)?;
        assert_eq!(app.selected(), 0);

        app.handle_keypress(key(KeyCode::Char('q')))?;
        Ok(())
    }

    #[test]
    fn double_enter_descends_from_new_dir() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::create_dir_all(temp.path().join("c").join("x"))?;

        let mut app = app_at(&config, temp.path(), ErrorPolicy::Strict)?;
        assert_eq!(app.selected_name(), Some("c"));

        app.handle_keypress(key(KeyCode::Right))?;
        app.handle_keypress(key(KeyCode::Right))?;
        settle(&mut app)?;

        assert_ne!(app.nav().phase(), &NavPhase::Halted);
        assert!(app.nav().error().is_none());
        assert_eq!(app.nav().current_path(), temp.path().join("c").join("x"));

        app.handle_keypress(key(KeyCode::Char('q')))?;
        Ok(())
    }
}
