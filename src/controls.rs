//! On/off toggles shown to the user (DOM buttons on the web, window title
//! natively).

/// CSS classes of page elements that play the hover blip.
pub const HOVER_CLASSES: &[&str] = &["btn", "social-icon", "project-card"];

/// Selector list matching every [`HOVER_CLASSES`] element.
#[must_use]
pub fn hover_selector() -> String {
    HOVER_CLASSES
        .iter()
        .map(|class| format!(".{class}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A labelled on/off switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleButton {
    label: &'static str,
    on: bool,
}

impl ToggleButton {
    /// New toggle with the given label and initial state.
    #[must_use]
    pub fn new(label: &'static str, on: bool) -> Self {
        Self { label, on }
    }

    /// Flip the state and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    /// Current state.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Label without state, e.g. `"Music"`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Button text, e.g. `"Music: ON"`.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}: {}", self.label, if self.on { "ON" } else { "OFF" })
    }

    /// CSS class to apply when off.
    #[must_use]
    pub fn css_class(&self) -> Option<&'static str> {
        (!self.on).then_some("off")
    }
}

/// The music and sound effect toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    /// Background music toggle.
    pub music: ToggleButton,
    /// Sound effects toggle.
    pub sound: ToggleButton,
}

impl Controls {
    /// Toggles with the given initial states.
    #[must_use]
    pub fn new(music: bool, sound: bool) -> Self {
        Self {
            music: ToggleButton::new("Music", music),
            sound: ToggleButton::new("Sound", sound),
        }
    }

    /// Flip music and return the new state.
    pub fn toggle_music(&mut self) -> bool {
        self.music.toggle()
    }

    /// Flip sound effects and return the new state.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound.toggle()
    }

    /// Both labels, e.g. `"Music: ON | Sound: OFF"`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} | {}", self.music.text(), self.sound.text())
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(true, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_state() {
        let mut controls = Controls::default();
        let before = controls.clone();
        assert!(!controls.toggle_music());
        assert!(controls.toggle_music());
        assert!(!controls.toggle_sound());
        assert!(controls.toggle_sound());
        assert_eq!(controls, before);
    }

    #[test]
    fn text_and_class_follow_state() {
        let mut button = ToggleButton::new("Music", true);
        assert_eq!(button.text(), "Music: ON");
        assert_eq!(button.css_class(), None);
        let _ = button.toggle();
        assert_eq!(button.text(), "Music: OFF");
        assert_eq!(button.css_class(), Some("off"));
    }

    #[test]
    fn hover_selector_covers_every_class() {
        assert_eq!(hover_selector(), ".btn, .social-icon, .project-card");
    }

    #[test]
    fn summary_lists_both() {
        let controls = Controls::new(true, false);
        assert_eq!(controls.summary(), "Music: ON | Sound: OFF");
    }
}
