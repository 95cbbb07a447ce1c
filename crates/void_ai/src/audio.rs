//! Proximity-gated sound cues

use crate::capabilities::AudioCueSink;
use void_math::Vec2;

/// Plays positional cues only when a listener is close enough.
///
/// Without a listener the gate is disabled and every cue plays.
pub struct ProximityAudio {
    sink: Box<dyn AudioCueSink>,
    audible_radius: f32,
    listener: Option<Vec2>,
    attenuation_enabled: bool,
    warned_missing_listener: bool,
}

impl ProximityAudio {
    pub fn new(sink: Box<dyn AudioCueSink>, audible_radius: f32) -> Self {
        Self {
            sink,
            audible_radius,
            listener: None,
            attenuation_enabled: false,
            warned_missing_listener: false,
        }
    }

    /// Bind the listener found at initialization, or degrade to ungated playback
    pub fn bind_listener(&mut self, listener: Option<Vec2>) {
        match listener {
            Some(position) => {
                self.listener = Some(position);
                self.attenuation_enabled = true;
            }
            None => {
                self.listener = None;
                self.attenuation_enabled = false;
                if !self.warned_missing_listener {
                    self.warned_missing_listener = true;
                    log::warn!("no audio listener found, proximity attenuation disabled");
                }
            }
        }
    }

    /// Track the listener as it moves
    pub fn set_listener_position(&mut self, position: Vec2) {
        if self.attenuation_enabled {
            self.listener = Some(position);
        }
    }

    pub fn attenuation_enabled(&self) -> bool {
        self.attenuation_enabled
    }

    pub fn audible_radius(&self) -> f32 {
        self.audible_radius
    }

    /// Whether a cue at `origin` would be heard
    pub fn is_audible(&self, origin: Vec2) -> bool {
        match (self.attenuation_enabled, self.listener) {
            (true, Some(listener)) => listener.distance(origin) <= self.audible_radius,
            _ => true,
        }
    }

    /// Play a cue emitted at `origin`. Returns whether it played.
    pub fn play_at(&mut self, cue: &str, origin: Vec2, delay: f32) -> bool {
        if !self.is_audible(origin) {
            log::trace!("audio cue '{}' out of range", cue);
            return false;
        }
        self.sink.play(cue, delay);
        true
    }

    /// Play a cue without proximity gating
    pub fn play(&mut self, cue: &str, delay: f32) {
        self.sink.play(cue, delay);
    }
}

/// Sink that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioCueSink for SilentAudio {
    fn play(&mut self, _cue: &str, _delay: f32) {}
}
