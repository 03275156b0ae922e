//! Keyboard to [`TickInput`] mapping
//!
//! Terminals that accept the keyboard enhancement protocol report releases, so
//! a direction is held from its press until its release. Others only report
//! presses and auto-repeats; there a direction counts as held for a window
//! after its last press that outlasts the OS repeat delay.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

/// Frames a direction stays held after its last press when releases are not
/// reported. Covers a 250-500 ms repeat delay at 60 Hz.
pub const FALLBACK_HOLD_FRAMES: u64 = 30;

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Pause,
    Confirm,
    Restart,
    Quit,
}

/// Map a terminal key event to a game key
pub fn map_key(event: &KeyEvent) -> Option<Key> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Key::Quit),
            _ => None,
        };
    }
    match event.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Pause),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Key::Confirm),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Restart),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Quit),
        _ => None,
    }
}

/// Accumulates key events between ticks
#[derive(Debug, Clone)]
pub struct InputState {
    /// Hold window after the last press; `None` holds until release
    hold_frames: Option<u64>,
    /// Frame of the last press for up, down, left, right
    last_press: [Option<u64>; 4],
    /// One-shot commands since the last tick
    pending: TickInput,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(Some(FALLBACK_HOLD_FRAMES))
    }
}

impl InputState {
    pub fn new(hold_frames: Option<u64>) -> Self {
        Self {
            hold_frames,
            last_press: [None; 4],
            pending: TickInput::default(),
        }
    }

    /// Input state for a terminal, depending on whether it reports key releases
    pub fn for_terminal(reports_release: bool) -> Self {
        if reports_release {
            Self::new(None)
        } else {
            Self::default()
        }
    }

    fn slot(key: Key) -> Option<usize> {
        match key {
            Key::Up => Some(0),
            Key::Down => Some(1),
            Key::Left => Some(2),
            Key::Right => Some(3),
            _ => None,
        }
    }

    /// Record a key press (or repeat) seen during `frame`
    pub fn press(&mut self, key: Key, frame: u64) {
        if let Some(slot) = Self::slot(key) {
            self.last_press[slot] = Some(frame);
        }
        let p = &mut self.pending;
        match key {
            Key::Up => p.menu_up = true,
            Key::Down => p.menu_down = true,
            Key::Left => p.menu_left = true,
            Key::Right => p.menu_right = true,
            Key::Pause => p.pause = true,
            Key::Confirm => p.confirm = true,
            Key::Restart => p.restart = true,
            Key::Quit => p.quit = true,
        }
    }

    /// Record a key release
    pub fn release(&mut self, key: Key) {
        if let Some(slot) = Self::slot(key) {
            self.last_press[slot] = None;
        }
    }

    fn is_held(&self, slot: usize, frame: u64) -> bool {
        match (self.last_press[slot], self.hold_frames) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(at), Some(window)) => frame.saturating_sub(at) < window,
        }
    }

    /// Build the input for `frame` and clear one-shot commands
    pub fn take(&mut self, frame: u64) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.held.up = self.is_held(0, frame);
        input.held.down = self.is_held(1, frame);
        input.held.left = self.is_held(2, frame);
        input.held.right = self.is_held(3, frame);
        input
    }

    /// Feed one terminal key event
    pub fn handle_key(&mut self, event: &KeyEvent, frame: u64) {
        let Some(key) = map_key(event) else {
            return;
        };
        match event.kind {
            KeyEventKind::Release => self.release(key),
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(key, frame),
        }
    }
}

/// What the terminal reported since the last poll
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polled {
    pub input: TickInput,
    /// New terminal size, if it changed
    pub resized: Option<(u16, u16)>,
}

/// Drain every queued terminal event without blocking
pub fn poll_terminal(state: &mut InputState, frame: u64) -> io::Result<Polled> {
    let mut resized = None;
    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) => state.handle_key(&key, frame),
            Event::Resize(w, h) => resized = Some((w, h)),
            _ => {}
        }
    }
    Ok(Polled {
        input: state.take(frame),
        resized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_map() {
        assert_eq!(map_key(&key(KeyCode::Up)), Some(Key::Up));
        assert_eq!(map_key(&key(KeyCode::Char('d'))), Some(Key::Right));
        assert_eq!(map_key(&key(KeyCode::Char('P'))), Some(Key::Pause));
        assert_eq!(map_key(&key(KeyCode::Char(' '))), Some(Key::Confirm));
        assert_eq!(map_key(&key(KeyCode::Char('r'))), Some(Key::Restart));
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(Key::Quit));
        assert_eq!(map_key(&key(KeyCode::Char('x'))), None);
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Quit)
        );
        assert_eq!(map_key(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_one_shots_cleared_after_take() {
        let mut state = InputState::default();
        state.press(Key::Pause, 0);
        state.press(Key::Left, 0);
        let first = state.take(0);
        assert!(first.pause);
        assert!(first.menu_left);
        assert!(first.held.left);

        let second = state.take(1);
        assert!(!second.pause);
        assert!(!second.menu_left);
        assert!(second.held.left);
    }

    #[test]
    fn test_hold_window_expires() {
        let mut state = InputState::new(Some(3));
        state.press(Key::Up, 10);
        assert!(state.take(12).held.up);
        assert!(!state.take(13).held.up);
    }

    #[test]
    fn test_fallback_window_covers_repeat_delay() {
        // A single press with the first auto-repeat still half a second away
        let mut state = InputState::for_terminal(false);
        state.handle_key(&key(KeyCode::Right), 0);
        let dropped: Vec<u64> = (1..30).filter(|&f| !state.take(f).held.right).collect();
        assert!(dropped.is_empty(), "dropped frames: {dropped:?}");

        // The first repeat extends the hold
        state.handle_key(&key(KeyCode::Right), 29);
        assert!(state.take(50).held.right);
        assert!(!state.take(59).held.right);
    }

    #[test]
    fn test_held_until_release_when_reported() {
        let mut state = InputState::for_terminal(true);
        let mut event = key(KeyCode::Left);
        state.handle_key(&event, 0);
        assert!(state.take(500).held.left);
        event.kind = KeyEventKind::Release;
        state.handle_key(&event, 501);
        assert!(!state.take(501).held.left);
    }

    #[test]
    fn test_release_ends_hold() {
        let mut state = InputState::default();
        let mut press = key(KeyCode::Down);
        state.handle_key(&press, 0);
        press.kind = KeyEventKind::Release;
        state.handle_key(&press, 1);
        let input = state.take(1);
        assert!(!input.held.down);
        // The press still reached the menus this frame
        assert!(input.menu_down);
    }
}
