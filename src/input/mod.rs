//! Input handling: platform-agnostic events and bindable actions.

/// Platform-agnostic input events.
pub mod event;
/// Bindable keyboard actions.
pub mod keyboard;

pub use event::InputEvent;
pub use keyboard::KeyAction;
