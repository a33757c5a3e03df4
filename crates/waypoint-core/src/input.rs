#![forbid(unsafe_code)]

//! Keyboard input types and the tour's shortcut map.
//!
//! Hosts translate their native key events into [`KeyEvent`] and hand them
//! to the engine while a session is open. Only three shortcuts are owned:
//!
//! | Key                | Command     |
//! |--------------------|-------------|
//! | `Escape`           | close       |
//! | `Right` / `Enter`  | next        |
//! | `Left`             | previous    |
//!
//! Release events and chords with Ctrl, Alt or Super are never claimed, so
//! host-level shortcuts keep working underneath the overlay.

use bitflags::bitflags;

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A plain key press.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Key codes the engine can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

/// Press, repeat or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

/// What a shortcut asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourCommand {
    Close,
    Next,
    Previous,
}

/// Map a key event to a tour command.
///
/// Shift is tolerated; any other modifier means the key belongs to the host.
pub fn command_for(event: &KeyEvent) -> Option<TourCommand> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event
        .modifiers
        .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER)
    {
        return None;
    }
    match event.code {
        KeyCode::Escape => Some(TourCommand::Close),
        KeyCode::Right | KeyCode::Enter => Some(TourCommand::Next),
        KeyCode::Left => Some(TourCommand::Previous),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_shortcuts() {
        assert_eq!(
            command_for(&KeyEvent::new(KeyCode::Escape)),
            Some(TourCommand::Close)
        );
        assert_eq!(
            command_for(&KeyEvent::new(KeyCode::Right)),
            Some(TourCommand::Next)
        );
        assert_eq!(
            command_for(&KeyEvent::new(KeyCode::Enter)),
            Some(TourCommand::Next)
        );
        assert_eq!(
            command_for(&KeyEvent::new(KeyCode::Left)),
            Some(TourCommand::Previous)
        );
    }

    #[test]
    fn other_keys_are_not_claimed() {
        for code in [KeyCode::Char('n'), KeyCode::Up, KeyCode::Tab, KeyCode::Home] {
            assert_eq!(command_for(&KeyEvent::new(code)), None, "{code:?}");
        }
    }

    #[test]
    fn release_is_ignored_and_repeat_is_not() {
        let release = KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Release);
        assert_eq!(command_for(&release), None);
        let repeat = KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Repeat);
        assert_eq!(command_for(&repeat), Some(TourCommand::Next));
    }

    #[test]
    fn chords_belong_to_the_host() {
        let ctrl = KeyEvent::new(KeyCode::Left).with_modifiers(Modifiers::CTRL);
        assert_eq!(command_for(&ctrl), None);
        let alt = KeyEvent::new(KeyCode::Enter).with_modifiers(Modifiers::ALT);
        assert_eq!(command_for(&alt), None);
        let shift = KeyEvent::new(KeyCode::Enter).with_modifiers(Modifiers::SHIFT);
        assert_eq!(command_for(&shift), Some(TourCommand::Next));
    }
}
