//! Typed adapter for keyboard shortcuts. A rendering surface converts its
//! native key event into a [`KeyEvent`] and asks each [`KeyboardShortcut`]
//! whether it matches.

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum KeyModifier {
    /// Satisfied by either Ctrl or Meta, so one binding covers Ctrl+K and Cmd+K.
    Ctrl,
    Shift,
    Alt,
    Meta,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    fn has(&self, modifier: KeyModifier) -> bool {
        match modifier {
            KeyModifier::Ctrl => self.ctrl || self.meta,
            KeyModifier::Shift => self.shift,
            KeyModifier::Alt => self.alt,
            KeyModifier::Meta => self.meta,
        }
    }
}

/// A key plus the modifiers that must be held. Extra modifiers on the event
/// do not prevent a match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyboardShortcut {
    key: String,
    modifiers: Vec<KeyModifier>,
    prevent_default: bool,
}

impl KeyboardShortcut {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Vec::new(),
            prevent_default: true,
        }
    }

    pub fn modifier(mut self, modifier: KeyModifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    /// Defaults to `true`.
    pub fn prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn modifiers(&self) -> &[KeyModifier] {
        &self.modifiers
    }

    /// Keys compare case-insensitively, so Shift+`A` matches a shortcut on `a`.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.key.to_lowercase() == self.key.to_lowercase()
            && self.modifiers.iter().all(|&modifier| event.has(modifier))
    }

    /// Runs `on_press` when the event matches, preventing the default action
    /// first unless disabled. Returns whether the shortcut fired.
    pub fn handle(&self, event: &mut KeyEvent, on_press: impl FnOnce()) -> bool {
        if !self.matches(event) {
            return false;
        }
        if self.prevent_default {
            event.prevent_default();
        }
        on_press();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_shortcut_also_matches_meta() {
        let save = KeyboardShortcut::new("s").modifier(KeyModifier::Ctrl);

        assert!(save.matches(&KeyEvent::new("s").ctrl()));
        assert!(save.matches(&KeyEvent::new("s").meta()));
        assert!(!save.matches(&KeyEvent::new("s")));
        assert!(!save.matches(&KeyEvent::new("d").ctrl()));
    }

    #[test]
    fn meta_shortcut_does_not_match_ctrl() {
        let shortcut = KeyboardShortcut::new("k").modifier(KeyModifier::Meta);
        assert!(!shortcut.matches(&KeyEvent::new("k").ctrl()));
        assert!(shortcut.matches(&KeyEvent::new("k").meta()));
    }

    #[test]
    fn key_comparison_ignores_case() {
        let shortcut = KeyboardShortcut::new("a").modifier(KeyModifier::Shift);
        assert!(shortcut.matches(&KeyEvent::new("A").shift()));
    }

    #[test]
    fn every_listed_modifier_is_required() {
        let shortcut = KeyboardShortcut::new("p")
            .modifier(KeyModifier::Ctrl)
            .modifier(KeyModifier::Shift);

        assert!(!shortcut.matches(&KeyEvent::new("p").ctrl()));
        assert!(!shortcut.matches(&KeyEvent::new("p").shift()));
        assert!(shortcut.matches(&KeyEvent::new("p").ctrl().shift()));
    }

    #[test]
    fn shortcut_without_modifiers_ignores_held_modifiers() {
        let shortcut = KeyboardShortcut::new("Escape");
        assert!(shortcut.matches(&KeyEvent::new("Escape")));
        assert!(shortcut.matches(&KeyEvent::new("escape").alt()));
    }

    #[test]
    fn handle_prevents_default_before_running_callback() {
        let shortcut = KeyboardShortcut::new("s").modifier(KeyModifier::Ctrl);
        let mut pressed = 0;

        let mut event = KeyEvent::new("s").ctrl();
        assert!(shortcut.handle(&mut event, || pressed += 1));
        assert!(event.is_default_prevented());

        let mut other = KeyEvent::new("x").ctrl();
        assert!(!shortcut.handle(&mut other, || pressed += 1));
        assert!(!other.is_default_prevented());
        assert_eq!(pressed, 1);
    }

    #[test]
    fn prevent_default_can_be_disabled() {
        let shortcut = KeyboardShortcut::new("/").prevent_default(false);
        let mut event = KeyEvent::new("/");
        let mut pressed = false;

        assert!(shortcut.handle(&mut event, || pressed = true));
        assert!(pressed);
        assert!(!event.is_default_prevented());
    }
}
