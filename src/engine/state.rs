//! GPU-free half of the engine: the scene, its animation, audio and the
//! user-facing toggles.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{IntervalTimer, SceneAnimator};
use crate::audio::AudioController;
use crate::controls::Controls;
use crate::input::{InputEvent, KeyAction};
use crate::options::{KeybindingOptions, Options};
use crate::scene::builder::{build_scene, SceneHandles};
use crate::scene::Scene;
use crate::util::noise::Simplex2;

/// Random source for scene construction: the configured seed, or a fresh
/// one. The seed in use is logged so a nice layout can be reproduced.
#[must_use]
pub fn scene_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("scene seed {seed}");
    StdRng::seed_from_u64(seed)
}

/// What the host should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResponse {
    /// Keep running.
    Continue,
    /// The user asked to close the viewer.
    Quit,
}

/// Scene, animation, audio and toggles, advanced once per frame.
pub struct SceneState {
    /// Scene graph.
    pub scene: Scene,
    /// Animated node handles.
    pub handles: SceneHandles,
    animator: SceneAnimator,
    audio: AudioController,
    controls: Controls,
    beam_timer: IntervalTimer,
}

impl SceneState {
    /// Build the scene from options and take ownership of `audio`.
    #[must_use]
    pub fn new(options: &Options, audio: AudioController) -> Self {
        let mut rng = scene_rng(options.world.seed);
        let (scene, handles) = build_scene(options, &mut rng);
        let noise = Simplex2::new(&mut rng);
        let animator = SceneAnimator::new(options, &scene, &handles, noise);
        Self {
            scene,
            handles,
            animator,
            audio,
            controls: Controls::new(
                options.audio.music_enabled,
                options.audio.sound_enabled,
            ),
            beam_timer: IntervalTimer::new(options.effects.beam_interval),
        }
    }

    /// Advance one frame. Returns the number of beam cycles started by the
    /// interval timer.
    pub fn update(&mut self, time: f32, delta: f32) -> u32 {
        self.audio.poll_loaded();
        let fired = self.beam_timer.tick(delta);
        if fired > 0 {
            log::debug!("beam interval elapsed at {time:.1}s");
            self.fire_beam();
        }
        self.animator
            .update(&mut self.scene, &self.handles, time, delta);
        fired
    }

    /// Route an input event. Any event counts as the user gesture that
    /// unlocks audio; bound keys run their action.
    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        bindings: &KeybindingOptions,
    ) -> ActionResponse {
        self.resume_audio();
        event
            .key_code()
            .and_then(|code| bindings.lookup(code))
            .map_or(ActionResponse::Continue, |action| {
                self.handle_action(action)
            })
    }

    /// Apply a bound key action.
    pub fn handle_action(&mut self, action: KeyAction) -> ActionResponse {
        log::debug!("action {action:?}");
        match action {
            KeyAction::ToggleMusic => {
                let _ = self.toggle_music();
            }
            KeyAction::ToggleSound => {
                let _ = self.toggle_sound();
            }
            KeyAction::FireBeam => self.fire_beam(),
            KeyAction::Quit => return ActionResponse::Quit,
        }
        ActionResponse::Continue
    }

    /// Flip background music and return the new state.
    pub fn toggle_music(&mut self) -> bool {
        let on = self.controls.toggle_music();
        self.audio.set_music(on);
        log::info!("{}", self.controls.music.text());
        on
    }

    /// Flip sound effects and return the new state.
    pub fn toggle_sound(&mut self) -> bool {
        let on = self.controls.toggle_sound();
        self.audio.set_sound(on);
        log::info!("{}", self.controls.sound.text());
        on
    }

    /// Start a beam cycle and its sound effect.
    pub fn fire_beam(&mut self) {
        self.animator.fire_beam();
        self.audio.play_beam();
    }

    /// First user gesture: let audio start.
    pub fn resume_audio(&mut self) {
        self.audio.resume();
    }

    /// Hover blip for UI elements, at `volume` or the configured level.
    pub fn play_hover(&mut self, volume: Option<f32>) {
        self.audio.play_hover(volume);
    }

    /// Current toggle states.
    #[must_use]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Scene animator.
    #[must_use]
    pub fn animator(&self) -> &SceneAnimator {
        &self.animator
    }

    /// Audio controller.
    #[must_use]
    pub fn audio(&self) -> &AudioController {
        &self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{SilentSink, Track};

    fn state(options: &Options) -> SceneState {
        let audio = AudioController::with_sinks(
            &options.audio,
            Box::new(SilentSink::new(Track::Music)),
            Box::new(SilentSink::new(Track::Beam)),
            Box::new(SilentSink::new(Track::Hover)),
        );
        SceneState::new(options, audio)
    }

    fn seeded() -> Options {
        let mut options = Options::default();
        options.world.seed = Some(5);
        options
    }

    #[test]
    fn interval_fires_beam() {
        let mut options = seeded();
        options.effects.beam_interval = 1.0;
        let mut state = state(&options);
        assert_eq!(state.update(0.5, 0.5), 0);
        assert!(!state.animator().beam().is_active());
        assert_eq!(state.update(1.1, 0.6), 1);
        assert!(state.animator().beam().is_active());
    }

    #[test]
    fn actions_flip_controls() {
        let mut state = state(&seeded());
        assert_eq!(
            state.handle_action(KeyAction::ToggleMusic),
            ActionResponse::Continue
        );
        assert!(!state.controls().music.is_on());
        assert!(!state.audio().music_enabled());
        let _ = state.handle_action(KeyAction::ToggleSound);
        let _ = state.handle_action(KeyAction::ToggleSound);
        assert!(state.controls().sound.is_on());
        assert_eq!(state.handle_action(KeyAction::Quit), ActionResponse::Quit);
    }

    #[test]
    fn key_toggles_update_button_state() {
        let options = seeded();
        let mut state = state(&options);
        let key = |code: &str| InputEvent::KeyPressed { code: code.into() };

        let response = state.handle_input(&key("KeyM"), &options.keybindings);
        assert_eq!(response, ActionResponse::Continue);
        assert_eq!(state.controls().music.text(), "Music: OFF");
        assert_eq!(state.controls().music.css_class(), Some("off"));

        let _ = state.handle_input(&key("KeyN"), &options.keybindings);
        assert_eq!(state.controls().summary(), "Music: OFF | Sound: OFF");

        let _ = state.handle_input(&key("KeyQ"), &options.keybindings);
        let click = InputEvent::PointerPressed;
        let _ = state.handle_input(&click, &options.keybindings);
        assert_eq!(state.controls().summary(), "Music: OFF | Sound: OFF");
        assert_eq!(
            state.handle_input(&key("Escape"), &options.keybindings),
            ActionResponse::Quit
        );
    }

    #[test]
    fn fire_beam_action_starts_cycle() {
        let mut state = state(&seeded());
        let _ = state.handle_action(KeyAction::FireBeam);
        let _ = state.handle_action(KeyAction::FireBeam);
        assert!(state.animator().beam().is_active());
        for frame in 0..600 {
            let _ = state.update(frame as f32 / 60.0, 1.0 / 60.0);
            let opacity = state.animator().beam().opacity();
            assert!((0.0..=1.0).contains(&opacity));
        }
        assert!(!state.animator().beam().is_active());
    }

    #[test]
    fn controls_follow_audio_options() {
        let mut options = seeded();
        options.audio.sound_enabled = false;
        let state = state(&options);
        assert_eq!(state.controls().summary(), "Music: ON | Sound: OFF");
    }

    #[test]
    fn same_seed_same_scene() {
        let a = state(&seeded());
        let b = state(&seeded());
        assert_eq!(a.scene.draw_items(), b.scene.draw_items());
    }
}
