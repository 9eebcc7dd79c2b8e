/// Platform-agnostic input events.
///
/// The scene is non-interactive: input only toggles audio, fires the beam,
/// and counts as the user gesture that unlocks audio playback.
///
/// # Example
///
/// ```ignore
/// let action = engine.handle_input(InputEvent::KeyPressed {
///     code: "KeyM".into(),
/// });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A pointer button was pressed anywhere in the viewport.
    PointerPressed,
    /// A key was pressed.
    KeyPressed {
        /// Physical key string in `winit::keyboard::KeyCode` debug format
        /// (`"KeyM"`, `"Escape"`, ...).
        code: String,
    },
}

impl InputEvent {
    /// Key code for key events.
    #[must_use]
    pub fn key_code(&self) -> Option<&str> {
        match self {
            Self::KeyPressed { code } => Some(code),
            Self::PointerPressed => None,
        }
    }
}
