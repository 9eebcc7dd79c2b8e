/// Which of the three audio channels a clip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    /// Looping background music.
    Music,
    /// One-shot beam effect.
    Beam,
    /// Short UI hover blip.
    Hover,
}

impl Track {
    /// Human-readable name for logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Music => "music",
            Self::Beam => "beam",
            Self::Hover => "hover",
        }
    }
}

/// A loaded audio asset.
///
/// Native loads carry the file bytes. In the browser the media element
/// streams from `path` itself, so `bytes` stays empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Asset path the clip was loaded from.
    pub path: String,
    /// Encoded file contents, if read eagerly.
    pub bytes: Vec<u8>,
}

/// Playback endpoint for one track.
pub trait AudioSink {
    /// Attach a loaded clip, replacing any previous one.
    fn attach(&mut self, clip: AudioClip);
    /// Whether a clip is attached.
    fn has_clip(&self) -> bool;
    /// Start or resume playback. No-op without a clip.
    fn play(&mut self);
    /// Pause, keeping the position.
    fn pause(&mut self);
    /// Stop and rewind.
    fn stop(&mut self);
    /// Set the volume in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
    /// Current volume.
    fn volume(&self) -> f32;
    /// Loop at the end of the clip.
    fn set_looping(&mut self, looping: bool);
    /// Whether playback is running.
    fn is_playing(&self) -> bool;
}

/// Sink for targets without an audio backend.
///
/// Clips are accepted so missing assets are still reported, but nothing is
/// ever played: [`is_playing`](AudioSink::is_playing) stays `false`.
#[derive(Debug, Clone)]
pub struct SilentSink {
    track: Track,
    clip: Option<AudioClip>,
    volume: f32,
}

impl SilentSink {
    /// Empty sink for `track`.
    #[must_use]
    pub fn new(track: Track) -> Self {
        Self {
            track,
            clip: None,
            volume: 1.0,
        }
    }
}

impl AudioSink for SilentSink {
    fn attach(&mut self, clip: AudioClip) {
        log::debug!(
            "{}: attached {} ({} bytes)",
            self.track.name(),
            clip.path,
            clip.bytes.len()
        );
        self.clip = Some(clip);
    }

    fn has_clip(&self) -> bool {
        self.clip.is_some()
    }

    fn play(&mut self) {
        if self.clip.is_some() {
            log::debug!("{}: no audio output, play ignored", self.track.name());
        }
    }

    fn pause(&mut self) {}

    fn stop(&mut self) {}

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_looping(&mut self, _looping: bool) {}

    fn is_playing(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_sink_never_reports_playing() {
        let mut sink = SilentSink::new(Track::Beam);
        sink.play();
        assert!(!sink.is_playing());
        sink.attach(AudioClip {
            path: "beam.mp3".into(),
            bytes: vec![0; 4],
        });
        assert!(sink.has_clip());
        sink.play();
        assert!(!sink.is_playing());
    }

    #[test]
    fn volume_is_clamped() {
        let mut sink = SilentSink::new(Track::Hover);
        sink.set_volume(3.0);
        assert_eq!(sink.volume(), 1.0);
        sink.set_volume(-1.0);
        assert_eq!(sink.volume(), 0.0);
    }
}
