//! Keyboard mapping.
//!
//! The window only reacts to one action: Escape quits.

use winit::event::ElementState;
use winit::keyboard;

/// Actions the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppKey {
    /// Stop the frame loop (Escape).
    Quit,
}

/// Converts a winit [`keyboard::Key`] to an [`AppKey`] if it is mapped.
pub fn winit_key_to_app_key(key: &keyboard::Key) -> Option<AppKey> {
    match key {
        keyboard::Key::Named(keyboard::NamedKey::Escape) => Some(AppKey::Quit),
        _ => None,
    }
}

/// Whether a key transition should stop the frame loop. Only presses count.
pub fn is_quit_key(key: &keyboard::Key, state: ElementState) -> bool {
    state == ElementState::Pressed && winit_key_to_app_key(key) == Some(AppKey::Quit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{Key, NamedKey};

    #[test]
    fn escape_press_quits() {
        assert!(is_quit_key(&Key::Named(NamedKey::Escape), ElementState::Pressed));
    }

    #[test]
    fn escape_release_does_not_quit() {
        assert!(!is_quit_key(&Key::Named(NamedKey::Escape), ElementState::Released));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(winit_key_to_app_key(&Key::Named(NamedKey::Enter)), None);
        assert_eq!(winit_key_to_app_key(&Key::Character("q".into())), None);
        assert!(!is_quit_key(&Key::Character("`".into()), ElementState::Pressed));
    }
}
