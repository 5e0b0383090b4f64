//! Keyboard and mouse state for camera control
//!
//! Terminals deliver key presses and auto-repeats rather than key state, so a
//! key counts as held while its last press or repeat is recent. When the
//! terminal also reports releases, a key stays held until released.

use crate::config::InputConfig;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode, MouseEventKind,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Controls the renderer responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Ascend,
    Descend,
    Boost,
    ZoomIn,
    ZoomOut,
    LookUp,
    LookDown,
    LookLeft,
    LookRight,
    Quit,
}

/// Map a key event to a control. Letters ignore case.
pub fn map_key(event: &KeyEvent) -> Option<Key> {
    match event.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if event.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Key::Quit)
        }
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Key::Forward),
            's' => Some(Key::Back),
            'a' => Some(Key::Left),
            'd' => Some(Key::Right),
            ' ' => Some(Key::Ascend),
            'c' => Some(Key::Descend),
            'v' => Some(Key::Boost),
            'q' => Some(Key::ZoomIn),
            'e' => Some(Key::ZoomOut),
            _ => None,
        },
        KeyCode::Modifier(ModifierKeyCode::LeftShift) => Some(Key::Descend),
        KeyCode::Up => Some(Key::LookUp),
        KeyCode::Down => Some(Key::LookDown),
        KeyCode::Left => Some(Key::LookLeft),
        KeyCode::Right => Some(Key::LookRight),
        KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}

pub struct InputState {
    held: HashMap<Key, Instant>,
    hold_window: Duration,
    release_events: bool,
    mouse_look: bool,
    last_mouse: Option<(u16, u16)>,
    mouse_delta: (f32, f32),
    quit: bool,
}

impl InputState {
    pub fn new(hold_window: Duration, mouse_look: bool) -> Self {
        Self {
            held: HashMap::new(),
            hold_window,
            release_events: false,
            mouse_look,
            last_mouse: None,
            mouse_delta: (0.0, 0.0),
            quit: false,
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(
            Duration::from_millis(config.hold_window_ms),
            config.mouse_look,
        )
    }

    /// Trust release events instead of the hold window
    pub fn set_release_events(&mut self, enabled: bool) {
        self.release_events = enabled;
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Key(key_event) => {
                let Some(key) = map_key(key_event) else {
                    return;
                };
                match key_event.kind {
                    KeyEventKind::Release => {
                        self.held.remove(&key);
                    }
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if key == Key::Quit {
                            self.quit = true;
                        }
                        self.held.insert(key, now);
                    }
                }
            }
            Event::Mouse(mouse) if self.mouse_look => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    if let Some((column, row)) = self.last_mouse {
                        self.mouse_delta.0 += mouse.column as f32 - column as f32;
                        self.mouse_delta.1 += mouse.row as f32 - row as f32;
                    }
                    self.last_mouse = Some((mouse.column, mouse.row));
                }
                _ => {}
            },
            Event::FocusLost => {
                self.held.clear();
                self.last_mouse = None;
            }
            _ => {}
        }
    }

    pub fn is_held(&self, key: Key, now: Instant) -> bool {
        self.held.get(&key).is_some_and(|&seen| {
            self.release_events || now.saturating_duration_since(seen) <= self.hold_window
        })
    }

    /// Mouse movement in cells since the last call
    pub fn take_mouse_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.mouse_delta)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
