//! Background music and sound effects.
//!
//! Audio is decoration: assets load in the background, failures are logged
//! and the affected track simply stays silent. Nothing here can fail the
//! render loop.

mod loader;
mod sink;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

pub use loader::AudioLoader;
pub use sink::{AudioClip, AudioSink, SilentSink, Track};
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::HtmlAudioSink;

use crate::options::AudioOptions;

/// Default sink for the current platform.
#[must_use]
pub fn platform_sink(track: Track) -> Box<dyn AudioSink> {
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    {
        Box::new(HtmlAudioSink::new(track))
    }
    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    {
        Box::new(SilentSink::new(track))
    }
}

/// Whether [`platform_sink`] produces audible output on this target.
#[must_use]
pub const fn has_audio_output() -> bool {
    cfg!(all(feature = "web", target_arch = "wasm32"))
}

/// Owns the three tracks and the music/sound toggle state.
pub struct AudioController {
    music: Box<dyn AudioSink>,
    beam: Box<dyn AudioSink>,
    hover: Box<dyn AudioSink>,
    loader: AudioLoader,
    options: AudioOptions,
    music_enabled: bool,
    sound_enabled: bool,
}

impl AudioController {
    /// Platform sinks, with all three assets requested immediately.
    #[must_use]
    pub fn new(options: &AudioOptions) -> Self {
        if !has_audio_output() {
            log::info!("audio output is not supported on this target");
        }
        let mut controller = Self::with_sinks(
            options,
            platform_sink(Track::Music),
            platform_sink(Track::Beam),
            platform_sink(Track::Hover),
        );
        controller.request_all();
        controller
    }

    /// Controller over caller-provided sinks. Nothing is requested.
    #[must_use]
    pub fn with_sinks(
        options: &AudioOptions,
        music: Box<dyn AudioSink>,
        beam: Box<dyn AudioSink>,
        hover: Box<dyn AudioSink>,
    ) -> Self {
        Self {
            music,
            beam,
            hover,
            loader: AudioLoader::new(),
            options: options.clone(),
            music_enabled: options.music_enabled,
            sound_enabled: options.sound_enabled,
        }
    }

    /// Request every configured asset.
    pub fn request_all(&mut self) {
        self.loader.request(Track::Music, &self.options.music_path);
        self.loader.request(Track::Beam, &self.options.beam_path);
        self.loader.request(Track::Hover, &self.options.hover_path);
    }

    /// Attach a clip to its track and apply the track's settings.
    ///
    /// Music starts playing straight away when enabled; the browser may
    /// hold it back until [`resume`](Self::resume).
    pub fn attach(&mut self, track: Track, clip: AudioClip) {
        match track {
            Track::Music => {
                self.music.attach(clip);
                self.music.set_looping(true);
                self.music.set_volume(self.options.music_volume);
                if self.music_enabled {
                    self.music.play();
                }
            }
            Track::Beam => {
                self.beam.attach(clip);
                self.beam.set_volume(self.options.beam_volume);
            }
            Track::Hover => {
                self.hover.attach(clip);
                self.hover.set_volume(self.options.hover_volume);
            }
        }
    }

    /// Attach every clip that finished loading since the last call.
    pub fn poll_loaded(&mut self) {
        while let Some((track, clip)) = self.loader.try_recv() {
            self.attach(track, clip);
        }
    }

    /// First user gesture: start music if it should be playing.
    pub fn resume(&mut self) {
        if self.music_enabled
            && self.music.has_clip()
            && !self.music.is_playing()
        {
            log::debug!("resuming music after user gesture");
            self.music.play();
        }
    }

    /// Enable or disable background music.
    pub fn set_music(&mut self, enabled: bool) {
        self.music_enabled = enabled;
        if enabled {
            self.music.play();
        } else {
            self.music.pause();
        }
    }

    /// Enable or disable sound effects.
    pub fn set_sound(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
        if !enabled {
            self.beam.stop();
            self.hover.stop();
        }
    }

    /// Whether music is enabled.
    #[must_use]
    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// Whether sound effects are enabled.
    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Play the beam effect from the start.
    pub fn play_beam(&mut self) {
        if !self.sound_enabled || !self.beam.has_clip() {
            return;
        }
        if self.beam.is_playing() {
            self.beam.stop();
        }
        self.beam.play();
    }

    /// Play the hover blip at `volume`, or the configured hover volume.
    pub fn play_hover(&mut self, volume: Option<f32>) {
        self.resume();
        if !self.sound_enabled || !self.hover.has_clip() {
            return;
        }
        if self.hover.is_playing() {
            self.hover.stop();
        }
        self.hover
            .set_volume(volume.unwrap_or(self.options.hover_volume));
        self.hover.play();
    }

    /// Whether the music track is currently playing.
    #[must_use]
    pub fn music_playing(&self) -> bool {
        self.music.is_playing()
    }

    /// Whether the beam effect is currently playing.
    #[must_use]
    pub fn beam_playing(&self) -> bool {
        self.beam.is_playing()
    }

    /// Clips still loading.
    #[must_use]
    pub fn pending_loads(&self) -> usize {
        self.loader.pending()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn clip(name: &str) -> AudioClip {
        AudioClip {
            path: name.into(),
            bytes: vec![0; 8],
        }
    }

    /// Sink that only records its playback state.
    #[derive(Default)]
    struct RecordingSink {
        clip: bool,
        playing: bool,
        volume: f32,
    }

    impl AudioSink for RecordingSink {
        fn attach(&mut self, _clip: AudioClip) {
            self.clip = true;
            self.playing = false;
        }

        fn has_clip(&self) -> bool {
            self.clip
        }

        fn play(&mut self) {
            self.playing = self.clip;
        }

        fn pause(&mut self) {
            self.playing = false;
        }

        fn stop(&mut self) {
            self.playing = false;
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }

        fn volume(&self) -> f32 {
            self.volume
        }

        fn set_looping(&mut self, _looping: bool) {}

        fn is_playing(&self) -> bool {
            self.playing
        }
    }

    fn recording(options: &AudioOptions) -> AudioController {
        AudioController::with_sinks(
            options,
            Box::<RecordingSink>::default(),
            Box::<RecordingSink>::default(),
            Box::<RecordingSink>::default(),
        )
    }

    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    #[test]
    fn native_tracks_never_claim_to_play() {
        assert!(!has_audio_output());
        let mut sink = platform_sink(Track::Music);
        sink.attach(clip("music.m4a"));
        sink.play();
        assert!(!sink.is_playing());

        let mut audio = AudioController::with_sinks(
            &AudioOptions::default(),
            platform_sink(Track::Music),
            platform_sink(Track::Beam),
            platform_sink(Track::Hover),
        );
        audio.attach(Track::Music, clip("music.m4a"));
        audio.attach(Track::Beam, clip("beam.mp3"));
        audio.play_beam();
        assert!(!audio.music_playing());
        assert!(!audio.beam_playing());
    }

    #[test]
    fn music_autostarts_when_loaded() {
        let mut audio = recording(&AudioOptions::default());
        assert!(!audio.music_playing());
        audio.attach(Track::Music, clip("music.m4a"));
        assert!(audio.music_playing());
    }

    #[test]
    fn disabled_music_waits_for_toggle() {
        let options = AudioOptions {
            music_enabled: false,
            ..AudioOptions::default()
        };
        let mut audio = recording(&options);
        audio.attach(Track::Music, clip("music.m4a"));
        audio.resume();
        assert!(!audio.music_playing());
        audio.set_music(true);
        assert!(audio.music_playing());
        audio.set_music(false);
        assert!(!audio.music_playing());
    }

    #[test]
    fn beam_needs_clip_and_sound() {
        let mut audio = recording(&AudioOptions::default());
        audio.play_beam();
        assert!(!audio.beam_playing());
        audio.attach(Track::Beam, clip("beam.mp3"));
        audio.set_sound(false);
        audio.play_beam();
        assert!(!audio.beam_playing());
        audio.set_sound(true);
        audio.play_beam();
        audio.play_beam();
        assert!(audio.beam_playing());
    }

    #[test]
    fn toggles_without_assets_do_not_panic() {
        let mut audio = recording(&AudioOptions::default());
        audio.set_music(false);
        audio.set_music(true);
        audio.play_hover(Some(0.5));
        audio.poll_loaded();
        assert!(audio.music_enabled());
        assert!(!audio.music_playing());
    }

    #[test]
    fn missing_assets_leave_tracks_silent() {
        let options = AudioOptions {
            music_path: "no/such/music.m4a".into(),
            beam_path: "no/such/beam.mp3".into(),
            hover_path: "no/such/hover.mp3".into(),
            ..AudioOptions::default()
        };
        let mut audio = AudioController::new(&options);
        let deadline = Instant::now() + Duration::from_secs(5);
        while audio.pending_loads() > 0 && Instant::now() < deadline {
            audio.poll_loaded();
            std::thread::sleep(Duration::from_millis(5));
        }
        audio.play_beam();
        assert!(!audio.music_playing());
        assert!(!audio.beam_playing());
    }
}
