//! Input handling and key bindings
//!
//! Bindings are crokey key combinations so they can be written as strings
//! (`"ctrl-l"`) in the config file.

use crokey::{key, KeyCombination};
use serde::{Deserialize, Serialize};

/// Key bindings configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit application
    pub quit: KeyCombination,
    /// Move focus to the next control
    pub next_focus: KeyCombination,
    /// Navigate up in the template list
    pub navigate_up: KeyCombination,
    /// Navigate down in the template list
    pub navigate_down: KeyCombination,
    /// Activate the focused control
    pub select: KeyCombination,
    /// Dismiss / close
    pub back: KeyCombination,
    /// Load templates from anywhere
    pub load: KeyCombination,
    /// Submit the create form from anywhere
    pub submit: KeyCombination,
    /// Toggle help
    pub help: KeyCombination,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: key!(ctrl - q),
            next_focus: key!(tab),
            navigate_up: key!(up),
            navigate_down: key!(down),
            select: key!(enter),
            back: key!(esc),
            load: key!(ctrl - l),
            submit: key!(ctrl - s),
            help: key!(f1),
        }
    }
}

impl KeyBindings {
    /// Check if a key combination matches any binding
    pub fn matches(&self, key: &KeyCombination) -> Option<KeyAction> {
        if *key == self.quit {
            Some(KeyAction::Quit)
        } else if *key == self.next_focus {
            Some(KeyAction::NextFocus)
        } else if *key == self.navigate_up {
            Some(KeyAction::NavigateUp)
        } else if *key == self.navigate_down {
            Some(KeyAction::NavigateDown)
        } else if *key == self.select {
            Some(KeyAction::Select)
        } else if *key == self.back {
            Some(KeyAction::Back)
        } else if *key == self.load {
            Some(KeyAction::Load)
        } else if *key == self.submit {
            Some(KeyAction::Submit)
        } else if *key == self.help {
            Some(KeyAction::Help)
        } else {
            None
        }
    }
}

/// Actions that can be triggered by key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    NextFocus,
    NavigateUp,
    NavigateDown,
    Select,
    Back,
    Load,
    Submit,
    Help,
}
