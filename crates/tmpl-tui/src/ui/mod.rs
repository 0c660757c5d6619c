//! Terminal UI
//!
//! Components, input bindings, layout, styling, widgets, and the screen
//! composition that ties them to the application state.

pub mod components;
pub mod input;
pub mod layout;
pub mod style;
pub mod view;
pub mod widgets;

pub use input::{KeyAction, KeyBindings};
pub use style::Theme;
pub use view::View;
