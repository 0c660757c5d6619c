//! Event handling
//!
//! Translates terminal key events into bound actions or typed characters.

use std::time::Duration;

use anyhow::Result;
use crokey::{
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    KeyCombination,
};

use crate::ui::input::{KeyAction, KeyBindings};

/// A key press after binding resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Action(KeyAction),
    /// Typed character; backspace is delivered as `'\x08'`
    Char(char),
}

#[derive(Debug)]
pub struct EventLoop {
    key_bindings: KeyBindings,
    tick: Duration,
}

impl EventLoop {
    pub fn new(key_bindings: KeyBindings, tick: Duration) -> Self {
        Self { key_bindings, tick }
    }

    /// Wait up to one tick for the next key press
    pub fn next_event(&self) -> Result<Option<EventResult>> {
        if !event::poll(self.tick)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                Ok(self.translate(key_event))
            }
            _ => Ok(None),
        }
    }

    /// Bindings take precedence over text entry
    pub fn translate(&self, key_event: KeyEvent) -> Option<EventResult> {
        let combination = KeyCombination::from(key_event);
        if let Some(action) = self.key_bindings.matches(&combination) {
            return Some(EventResult::Action(action));
        }

        let chording = key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key_event.code {
            KeyCode::Char(c) if !chording => Some(EventResult::Char(c)),
            KeyCode::Backspace => Some(EventResult::Char('\x08')),
            _ => None,
        }
    }
}
