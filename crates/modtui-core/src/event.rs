#![forbid(unsafe_code)]

//! Input events delivered through the widget tree.
//!
//! Terminal backends produce these; `WidgetTree::user_input` hands them to
//! widgets along with the area the widget occupies. Resizes are not events
//! here: the host simply dispatches with the new area.
//!
//! # Cancel gestures
//!
//! Modal widgets dismiss themselves on Escape and on the interrupt chord
//! (Ctrl+C, which raw-mode terminals report as a key press rather than a
//! signal). See [`Event::is_cancel`].

use bitflags::bitflags;

/// One input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Bracketed paste.
    Paste(PasteEvent),
    /// The terminal window gained (`true`) or lost (`false`) focus.
    Focus(bool),
}

impl Event {
    /// A plain key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// The interrupt chord, Ctrl+C.
    #[must_use]
    pub const fn interrupt() -> Self {
        Self::Key(KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL))
    }

    /// The key event unless this is a release.
    ///
    /// Terminals with the kitty protocol report both edges of a keystroke;
    /// widgets act on the press (or repeat) only.
    #[must_use]
    pub fn key_press(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(key) if key.kind != KeyEventKind::Release => Some(key),
            _ => None,
        }
    }

    /// Escape or Ctrl+C, pressed.
    #[must_use]
    pub fn is_cancel(&self) -> bool {
        self.key_press().is_some_and(KeyEvent::is_cancel)
    }

    /// Cell under the pointer, for mouse events.
    #[must_use]
    pub const fn mouse_position(&self) -> Option<(u16, u16)> {
        match self {
            Self::Mouse(mouse) => Some(mouse.position()),
            _ => None,
        }
    }

    /// Translate a crossterm event. Returns `None` for events with no
    /// counterpart here (resizes, horizontal scrolling, media keys).
    #[must_use]
    #[cfg(feature = "crossterm")]
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        crossterm_map::event(event)
    }
}

/// A keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A press of `code` with no modifiers.
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

    /// Whether the key is the character `c`.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.code == KeyCode::Char(c)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Escape, or Ctrl with `c` in either case.
    #[must_use]
    pub fn is_cancel(&self) -> bool {
        self.code == KeyCode::Escape || (self.ctrl() && (self.is_char('c') || self.is_char('C')))
    }
}

/// Which key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    /// Shift+Tab.
    BackTab,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// F1 and up.
    F(u8),
    /// NUL, sent by Ctrl+Space on most terminals.
    Null,
}

/// Edge of a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Also used when the terminal can't tell edges apart.
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Modifier keys held with a key or mouse event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        /// Super, Hyper or Meta.
        const SUPER = 1 << 3;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event at cell `(x, y)`, zero-based from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// `(x, y)`.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// Left button went down.
    #[must_use]
    pub const fn is_left_click(&self) -> bool {
        matches!(self.kind, MouseEventKind::Down(MouseButton::Left))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    /// Moved with a button held.
    Drag(MouseButton),
    /// Moved with no button held.
    Moved,
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Text delivered in one piece by bracketed paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    pub text: String,
}

impl PasteEvent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(feature = "crossterm")]
mod crossterm_map {
    use crossterm::event as ct;

    use super::{
        Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent,
        MouseEventKind, PasteEvent,
    };

    pub(super) fn event(event: ct::Event) -> Option<Event> {
        Some(match event {
            ct::Event::Key(key) => Event::Key(key_event(key)?),
            ct::Event::Mouse(mouse) => Event::Mouse(mouse_event(mouse)?),
            ct::Event::Paste(text) => Event::Paste(PasteEvent::new(text)),
            ct::Event::FocusGained => Event::Focus(true),
            ct::Event::FocusLost => Event::Focus(false),
            ct::Event::Resize(..) => return None,
        })
    }

    fn key_event(key: ct::KeyEvent) -> Option<KeyEvent> {
        let kind = match key.kind {
            ct::KeyEventKind::Press => KeyEventKind::Press,
            ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
            ct::KeyEventKind::Release => KeyEventKind::Release,
        };
        Some(
            KeyEvent::new(key_code(key.code)?)
                .with_modifiers(modifiers(key.modifiers))
                .with_kind(kind),
        )
    }

    fn key_code(code: ct::KeyCode) -> Option<KeyCode> {
        let mapped = match code {
            ct::KeyCode::Char(c) => KeyCode::Char(c),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Esc => KeyCode::Escape,
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::BackTab => KeyCode::BackTab,
            ct::KeyCode::Delete => KeyCode::Delete,
            ct::KeyCode::Insert => KeyCode::Insert,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::PageUp => KeyCode::PageUp,
            ct::KeyCode::PageDown => KeyCode::PageDown,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::F(n) => KeyCode::F(n),
            ct::KeyCode::Null => KeyCode::Null,
            _ => return None,
        };
        Some(mapped)
    }

    pub(super) fn modifiers(held: ct::KeyModifiers) -> Modifiers {
        [
            (ct::KeyModifiers::SHIFT, Modifiers::SHIFT),
            (ct::KeyModifiers::ALT, Modifiers::ALT),
            (ct::KeyModifiers::CONTROL, Modifiers::CTRL),
            (ct::KeyModifiers::SUPER, Modifiers::SUPER),
            (ct::KeyModifiers::HYPER, Modifiers::SUPER),
            (ct::KeyModifiers::META, Modifiers::SUPER),
        ]
        .into_iter()
        .filter(|(flag, _)| held.contains(*flag))
        .fold(Modifiers::NONE, |acc, (_, ours)| acc | ours)
    }

    fn mouse_event(mouse: ct::MouseEvent) -> Option<MouseEvent> {
        let kind = match mouse.kind {
            ct::MouseEventKind::Down(button) => MouseEventKind::Down(mouse_button(button)),
            ct::MouseEventKind::Up(button) => MouseEventKind::Up(mouse_button(button)),
            ct::MouseEventKind::Drag(button) => MouseEventKind::Drag(mouse_button(button)),
            ct::MouseEventKind::Moved => MouseEventKind::Moved,
            ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
            ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
            ct::MouseEventKind::ScrollLeft | ct::MouseEventKind::ScrollRight => return None,
        };
        Some(MouseEvent::new(kind, mouse.column, mouse.row).with_modifiers(modifiers(mouse.modifiers)))
    }

    fn mouse_button(button: ct::MouseButton) -> MouseButton {
        match button {
            ct::MouseButton::Left => MouseButton::Left,
            ct::MouseButton::Right => MouseButton::Right,
            ct::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_and_interrupt_cancel() {
        assert!(Event::key(KeyCode::Escape).is_cancel());
        assert!(Event::interrupt().is_cancel());
        let shouted = KeyEvent::new(KeyCode::Char('C')).with_modifiers(Modifiers::CTRL);
        assert!(Event::Key(shouted).is_cancel());
    }

    #[test]
    fn other_c_chords_do_not_cancel() {
        assert!(!Event::key(KeyCode::Char('c')).is_cancel());
        let alt = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::ALT);
        assert!(!Event::Key(alt).is_cancel());
    }

    #[test]
    fn releases_are_filtered() {
        let release = KeyEvent::new(KeyCode::Escape).with_kind(KeyEventKind::Release);
        assert!(Event::Key(release).key_press().is_none());
        assert!(!Event::Key(release).is_cancel());
        let repeat = KeyEvent::new(KeyCode::Down).with_kind(KeyEventKind::Repeat);
        assert!(Event::Key(repeat).key_press().is_some());
    }

    #[test]
    fn only_keys_cancel() {
        let click = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 1, 1);
        assert!(!Event::Mouse(click).is_cancel());
        assert!(!Event::Focus(false).is_cancel());
        assert!(!Event::Paste(PasteEvent::new("\x1b")).is_cancel());
    }

    #[test]
    fn modifier_queries() {
        let chord = KeyEvent::new(KeyCode::Char('x'))
            .with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert!(chord.ctrl());
        assert!(chord.shift());
        assert!(!chord.alt());
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn pointer_position() {
        let click = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 3, 4);
        assert!(click.is_left_click());
        assert!(!MouseEvent::new(MouseEventKind::Up(MouseButton::Left), 3, 4).is_left_click());
        assert_eq!(Event::Mouse(click).mouse_position(), Some((3, 4)));
        assert_eq!(Event::key(KeyCode::Enter).mouse_position(), None);
    }

    #[cfg(feature = "crossterm")]
    mod crossterm_mapping {
        use super::super::*;
        use crossterm::event as ct;

        fn press(code: ct::KeyCode, modifiers: ct::KeyModifiers) -> ct::Event {
            ct::Event::Key(ct::KeyEvent::new(code, modifiers))
        }

        fn mouse(kind: ct::MouseEventKind, modifiers: ct::KeyModifiers) -> ct::Event {
            ct::Event::Mouse(ct::MouseEvent {
                kind,
                column: 10,
                row: 5,
                modifiers,
            })
        }

        #[test]
        fn esc_is_cancel() {
            let mapped = Event::from_crossterm(press(ct::KeyCode::Esc, ct::KeyModifiers::NONE));
            assert!(mapped.is_some_and(|e| e.is_cancel()));
        }

        #[test]
        fn ctrl_c_is_interrupt() {
            let mapped =
                Event::from_crossterm(press(ct::KeyCode::Char('c'), ct::KeyModifiers::CONTROL));
            assert_eq!(mapped, Some(Event::interrupt()));
        }

        #[test]
        fn super_hyper_meta_collapse() {
            for held in [
                ct::KeyModifiers::SUPER,
                ct::KeyModifiers::HYPER,
                ct::KeyModifiers::META,
            ] {
                assert_eq!(super::super::crossterm_map::modifiers(held), Modifiers::SUPER);
            }
        }

        #[test]
        fn unsupported_events_are_dropped() {
            let sideways = mouse(ct::MouseEventKind::ScrollLeft, ct::KeyModifiers::NONE);
            assert_eq!(Event::from_crossterm(sideways), None);
            assert_eq!(Event::from_crossterm(ct::Event::Resize(80, 24)), None);
            let media = press(ct::KeyCode::CapsLock, ct::KeyModifiers::NONE);
            assert_eq!(Event::from_crossterm(media), None);
        }

        #[test]
        fn click_keeps_position_and_modifiers() {
            let down = ct::MouseEventKind::Down(ct::MouseButton::Left);
            let Some(Event::Mouse(click)) =
                Event::from_crossterm(mouse(down, ct::KeyModifiers::SHIFT))
            else {
                panic!("expected a mouse event");
            };
            assert!(click.is_left_click());
            assert_eq!(click.position(), (10, 5));
            assert_eq!(click.modifiers, Modifiers::SHIFT);
        }

        #[test]
        fn focus_and_paste() {
            assert_eq!(
                Event::from_crossterm(ct::Event::FocusLost),
                Some(Event::Focus(false))
            );
            assert_eq!(
                Event::from_crossterm(ct::Event::Paste("hi".into())),
                Some(Event::Paste(PasteEvent::new("hi")))
            );
        }
    }
}
