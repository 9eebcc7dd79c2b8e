use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use super::sink::{AudioClip, AudioSink, Track};

/// Sink backed by an `<audio>` element.
pub struct HtmlAudioSink {
    track: Track,
    element: Option<HtmlAudioElement>,
    volume: f32,
    looping: bool,
}

impl HtmlAudioSink {
    /// Sink for `track`; the element is created when a clip is attached.
    #[must_use]
    pub fn new(track: Track) -> Self {
        Self {
            track,
            element: None,
            volume: 1.0,
            looping: false,
        }
    }
}

impl AudioSink for HtmlAudioSink {
    fn attach(&mut self, clip: AudioClip) {
        match HtmlAudioElement::new_with_src(&clip.path) {
            Ok(element) => {
                element.set_volume(f64::from(self.volume));
                element.set_loop(self.looping);
                self.element = Some(element);
            }
            Err(e) => log::warn!(
                "{}: cannot create audio element: {e:?}",
                self.track.name()
            ),
        }
    }

    fn has_clip(&self) -> bool {
        self.element.is_some()
    }

    fn play(&mut self) {
        let Some(element) = &self.element else {
            return;
        };
        match element.play() {
            Ok(promise) => {
                let name = self.track.name();
                // Autoplay policies reject until the first user gesture.
                wasm_bindgen_futures::spawn_local(async move {
                    if JsFuture::from(promise).await.is_err() {
                        log::info!(
                            "{name}: playback deferred until user interaction"
                        );
                    }
                });
            }
            Err(e) => log::warn!("{}: play failed: {e:?}", self.track.name()),
        }
    }

    fn pause(&mut self) {
        if let Some(element) = &self.element {
            if let Err(e) = element.pause() {
                log::warn!("{}: pause failed: {e:?}", self.track.name());
            }
        }
    }

    fn stop(&mut self) {
        self.pause();
        if let Some(element) = &self.element {
            element.set_current_time(0.0);
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(element) = &self.element {
            element.set_volume(f64::from(self.volume));
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
        if let Some(element) = &self.element {
            element.set_loop(looping);
        }
    }

    fn is_playing(&self) -> bool {
        self.element.as_ref().is_some_and(|e| !e.paused())
    }
}
