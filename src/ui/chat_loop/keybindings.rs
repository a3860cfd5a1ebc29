//! Mode-aware keybinding registry.
//!
//! Keys resolve in three steps: bindings for the active context, then
//! global bindings (unless the context is modal), then free text for
//! contexts that own a text field.

use std::collections::HashMap;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::Input as TAInput;

use crate::core::app::{App, AppAction, UiFocus};

const PAGE_LINES: i32 = 10;

/// Result of resolving a key event.
#[derive(Debug, Clone)]
pub enum KeyResult {
    Dispatch(AppAction),
    NotHandled,
}

/// Pattern for matching key events
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyPattern {
    pub fn simple(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn alt(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::ALT,
        }
    }

    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code && self.modifiers == key.modifiers
    }
}

impl From<&KeyEvent> for KeyPattern {
    fn from(key: &KeyEvent) -> Self {
        Self {
            code: key.code,
            modifiers: key.modifiers,
        }
    }
}

/// Which part of the screen owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Input,
    Transcript,
    Actions,
    Dashboard,
    Picker,
}

impl KeyContext {
    /// Overlays take precedence over pane focus.
    pub fn from_app(app: &App) -> Self {
        if app.is_picker_open() {
            return KeyContext::Picker;
        }
        if app.ui.dashboard_open {
            return KeyContext::Dashboard;
        }
        match app.ui.focus {
            UiFocus::Input => KeyContext::Input,
            UiFocus::Transcript => KeyContext::Transcript,
            UiFocus::Actions => KeyContext::Actions,
        }
    }

    fn allows_globals(self) -> bool {
        self != KeyContext::Picker
    }
}

#[derive(Default)]
pub struct ModeAwareRegistry {
    global: HashMap<KeyPattern, AppAction>,
    handlers: HashMap<KeyContext, HashMap<KeyPattern, AppAction>>,
}

impl ModeAwareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_global(&mut self, pattern: KeyPattern, action: AppAction) {
        self.global.insert(pattern, action);
    }

    pub fn register_for_context(&mut self, context: KeyContext, pattern: KeyPattern, action: AppAction) {
        self.handlers
            .entry(context)
            .or_default()
            .insert(pattern, action);
    }

    pub fn resolve(&self, app: &App, key: &KeyEvent) -> KeyResult {
        let context = KeyContext::from_app(app);
        let pattern = KeyPattern::from(key);

        // Masked key fields take printable characters before any binding
        if context == KeyContext::Dashboard
            && app.ui.dashboard.focused.is_text()
            && is_text_key(key)
        {
            return KeyResult::Dispatch(AppAction::DashboardInput {
                input: TAInput::from(*key),
            });
        }

        if let Some(action) = self
            .handlers
            .get(&context)
            .and_then(|bindings| bindings.get(&pattern))
        {
            return KeyResult::Dispatch(action.clone());
        }

        if context.allows_globals() || pattern == KeyPattern::ctrl(KeyCode::Char('c')) {
            if let Some(action) = self.global.get(&pattern) {
                return KeyResult::Dispatch(action.clone());
            }
        }

        match context {
            KeyContext::Input if is_editing_key(key) => KeyResult::Dispatch(AppAction::EditInput {
                input: TAInput::from(*key),
            }),
            // Typing from a pane jumps back to the input box
            KeyContext::Transcript | KeyContext::Actions if is_text_key(key) => {
                KeyResult::Dispatch(AppAction::EditInput {
                    input: TAInput::from(*key),
                })
            }
            KeyContext::Dashboard if is_editing_key(key) => {
                KeyResult::Dispatch(AppAction::DashboardInput {
                    input: TAInput::from(*key),
                })
            }
            _ => KeyResult::NotHandled,
        }
    }
}

fn is_text_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(_))
        && !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn is_editing_key(key: &KeyEvent) -> bool {
    is_text_key(key)
        || matches!(
            key.code,
            KeyCode::Backspace
                | KeyCode::Delete
                | KeyCode::Left
                | KeyCode::Right
                | KeyCode::Up
                | KeyCode::Down
                | KeyCode::Home
                | KeyCode::End
        )
        || (key.modifiers == KeyModifiers::CONTROL
            && matches!(key.code, KeyCode::Char('a' | 'e' | 'w' | 'u' | 'k')))
}

pub fn build_mode_aware_registry() -> ModeAwareRegistry {
    let mut registry = ModeAwareRegistry::new();

    registry.register_global(KeyPattern::ctrl(KeyCode::Char('c')), AppAction::Quit);
    registry.register_global(KeyPattern::simple(KeyCode::Tab), AppAction::CycleFocus);
    registry.register_global(KeyPattern::ctrl(KeyCode::Char('t')), AppAction::ToggleTheme);
    registry.register_global(KeyPattern::ctrl(KeyCode::Char('p')), AppAction::OpenAgentPicker);
    registry.register_global(KeyPattern::ctrl(KeyCode::Char('g')), AppAction::ToggleDashboard);
    registry.register_global(KeyPattern::simple(KeyCode::F(5)), AppAction::ToggleFullChat);
    registry.register_global(
        KeyPattern::simple(KeyCode::F(6)),
        AppAction::ToggleFullVisualization,
    );
    registry.register_global(
        KeyPattern::simple(KeyCode::PageUp),
        AppAction::ScrollFocused { lines: -PAGE_LINES },
    );
    registry.register_global(
        KeyPattern::simple(KeyCode::PageDown),
        AppAction::ScrollFocused { lines: PAGE_LINES },
    );

    let input = KeyContext::Input;
    registry.register_for_context(input, KeyPattern::simple(KeyCode::Enter), AppAction::SubmitMessage);
    for pattern in [
        KeyPattern::alt(KeyCode::Enter),
        KeyPattern::with_modifiers(KeyCode::Enter, KeyModifiers::SHIFT),
        KeyPattern::ctrl(KeyCode::Char('j')),
    ] {
        registry.register_for_context(
            input,
            pattern,
            AppAction::InsertIntoInput { text: "\n".into() },
        );
    }

    let transcript = KeyContext::Transcript;
    registry.register_for_context(
        transcript,
        KeyPattern::simple(KeyCode::Up),
        AppAction::SelectPreviousMessage,
    );
    registry.register_for_context(
        transcript,
        KeyPattern::simple(KeyCode::Down),
        AppAction::SelectNextMessage,
    );
    for code in [KeyCode::Enter, KeyCode::Char(' ')] {
        registry.register_for_context(
            transcript,
            KeyPattern::simple(code),
            AppAction::ToggleMessageExpanded,
        );
    }

    let actions = KeyContext::Actions;
    registry.register_for_context(
        actions,
        KeyPattern::simple(KeyCode::Up),
        AppAction::ScrollFocused { lines: -1 },
    );
    registry.register_for_context(
        actions,
        KeyPattern::simple(KeyCode::Down),
        AppAction::ScrollFocused { lines: 1 },
    );

    let picker = KeyContext::Picker;
    registry.register_for_context(picker, KeyPattern::simple(KeyCode::Up), AppAction::PickerMoveUp);
    registry.register_for_context(picker, KeyPattern::simple(KeyCode::Down), AppAction::PickerMoveDown);
    registry.register_for_context(
        picker,
        KeyPattern::simple(KeyCode::Enter),
        AppAction::PickerApplySelection,
    );
    registry.register_for_context(picker, KeyPattern::simple(KeyCode::Esc), AppAction::CloseAgentPicker);
    registry.register_for_context(
        picker,
        KeyPattern::ctrl(KeyCode::Char('p')),
        AppAction::CloseAgentPicker,
    );

    let dashboard = KeyContext::Dashboard;
    registry.register_for_context(dashboard, KeyPattern::simple(KeyCode::Esc), AppAction::CloseDashboard);
    registry.register_for_context(
        dashboard,
        KeyPattern::simple(KeyCode::Tab),
        AppAction::DashboardNextField,
    );
    for modifiers in [KeyModifiers::NONE, KeyModifiers::SHIFT] {
        registry.register_for_context(
            dashboard,
            KeyPattern::with_modifiers(KeyCode::BackTab, modifiers),
            AppAction::DashboardPreviousField,
        );
    }
    for code in [KeyCode::Char(' '), KeyCode::Enter] {
        registry.register_for_context(
            dashboard,
            KeyPattern::simple(code),
            AppAction::DashboardTogglePreference,
        );
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::DashboardField;
    use crate::utils::test_utils::create_test_app;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn resolve(app: &App, event: KeyEvent) -> Option<AppAction> {
        match build_mode_aware_registry().resolve(app, &event) {
            KeyResult::Dispatch(action) => Some(action),
            KeyResult::NotHandled => None,
        }
    }

    #[test]
    fn pattern_matching_is_exact() {
        let pattern = KeyPattern::ctrl(KeyCode::Char('t'));
        assert!(pattern.matches(&ctrl('t')));
        assert!(!pattern.matches(&key(KeyCode::Char('t'))));
    }

    #[test]
    fn enter_submits_and_alt_enter_inserts_newline() {
        let app = create_test_app();
        assert!(matches!(resolve(&app, key(KeyCode::Enter)), Some(AppAction::SubmitMessage)));
        let alt_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT);
        assert!(matches!(
            resolve(&app, alt_enter),
            Some(AppAction::InsertIntoInput { ref text }) if text == "\n"
        ));
    }

    #[test]
    fn global_shortcuts_resolve_from_any_pane() {
        let mut app = create_test_app();
        app.ui.focus = UiFocus::Actions;
        assert!(matches!(resolve(&app, ctrl('t')), Some(AppAction::ToggleTheme)));
        assert!(matches!(resolve(&app, ctrl('g')), Some(AppAction::ToggleDashboard)));
        assert!(matches!(resolve(&app, key(KeyCode::F(5))), Some(AppAction::ToggleFullChat)));
        assert!(matches!(
            resolve(&app, key(KeyCode::F(6))),
            Some(AppAction::ToggleFullVisualization)
        ));
        assert!(matches!(resolve(&app, ctrl('c')), Some(AppAction::Quit)));
    }

    #[test]
    fn transcript_keys_select_and_expand() {
        let mut app = create_test_app();
        app.ui.focus = UiFocus::Transcript;
        assert!(matches!(resolve(&app, key(KeyCode::Up)), Some(AppAction::SelectPreviousMessage)));
        assert!(matches!(
            resolve(&app, key(KeyCode::Char(' '))),
            Some(AppAction::ToggleMessageExpanded)
        ));
        assert!(matches!(
            resolve(&app, key(KeyCode::Char('x'))),
            Some(AppAction::EditInput { .. })
        ));
    }

    #[test]
    fn escape_is_unbound_in_the_main_panes() {
        let mut app = create_test_app();
        app.session.is_thinking = true;
        for focus in [UiFocus::Input, UiFocus::Transcript, UiFocus::Actions] {
            app.ui.focus = focus;
            assert!(resolve(&app, key(KeyCode::Esc)).is_none());
        }
    }

    #[test]
    fn picker_blocks_globals_except_quit() {
        let mut app = create_test_app();
        app.open_agent_picker();
        assert!(matches!(resolve(&app, key(KeyCode::Down)), Some(AppAction::PickerMoveDown)));
        assert!(matches!(resolve(&app, key(KeyCode::Esc)), Some(AppAction::CloseAgentPicker)));
        assert!(resolve(&app, ctrl('t')).is_none());
        assert!(matches!(resolve(&app, ctrl('c')), Some(AppAction::Quit)));
    }

    #[test]
    fn dashboard_routes_text_to_key_fields() {
        let mut app = create_test_app();
        app.ui.toggle_dashboard();
        assert_eq!(app.ui.dashboard.focused, DashboardField::OpenAiKey);
        assert!(matches!(
            resolve(&app, key(KeyCode::Char(' '))),
            Some(AppAction::DashboardInput { .. })
        ));
        assert!(matches!(resolve(&app, key(KeyCode::Tab)), Some(AppAction::DashboardNextField)));

        app.ui.dashboard.focused = DashboardField::SaveChatHistory;
        assert!(matches!(
            resolve(&app, key(KeyCode::Char(' '))),
            Some(AppAction::DashboardTogglePreference)
        ));
        assert!(matches!(resolve(&app, key(KeyCode::Esc)), Some(AppAction::CloseDashboard)));
    }
}
