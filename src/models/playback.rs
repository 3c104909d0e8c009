// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback position tracking.
//!
//! The notes panel only needs to know where playback is paused and to be
//! able to jump to a note's position. [`PlaybackClock`] models exactly that
//! for the loaded media.

/// Playhead of the currently loaded media.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    position: f64,
    /// Media length in seconds, `None` until media is loaded
    duration: Option<f64>,
    playing: bool,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self {
            position: 0.0,
            duration: None,
            playing: false,
        }
    }

    /// Load media of the given length and rewind to the start.
    pub fn load(&mut self, duration: f64) {
        self.duration = Some(duration.max(0.0));
        self.position = 0.0;
        self.playing = false;
    }

    /// Change the media length, keeping the playhead inside it.
    pub fn set_duration(&mut self, duration: f64) {
        let duration = duration.max(0.0);
        self.duration = Some(duration);
        self.position = self.position.min(duration);
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        if self.duration.is_some() {
            self.playing = true;
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance by `dt` seconds while playing. Stops at the end of the media.
    pub fn tick(&mut self, dt: f64) {
        if !self.playing {
            return;
        }
        let Some(duration) = self.duration else {
            return;
        };
        self.position += dt.max(0.0);
        if self.position >= duration {
            self.position = duration;
            self.playing = false;
        }
    }

    /// Jump to `seconds`. Negative targets go to the start; a target past
    /// the end stretches the media so a note's position is always reachable.
    pub fn seek_to(&mut self, seconds: f64) {
        let Some(duration) = self.duration else {
            return;
        };
        if !seconds.is_finite() {
            return;
        }
        let seconds = seconds.max(0.0);
        if seconds > duration {
            log::debug!("Extending media length to {:.2}s", seconds);
            self.duration = Some(seconds);
        }
        self.position = seconds;
        log::debug!("Seeked to {:.2}s", self.position);
    }

    /// Position notes can be attached to: only while media is loaded and paused.
    pub fn paused_at(&self) -> Option<f64> {
        match (self.duration, self.playing) {
            (Some(_), false) => Some(self.position),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_media_no_pause_time() {
        let mut clock = PlaybackClock::new();
        clock.play();
        assert!(!clock.is_playing());
        assert_eq!(clock.paused_at(), None);
    }

    #[test]
    fn test_paused_at_only_when_paused() {
        let mut clock = PlaybackClock::new();
        clock.load(300.0);
        assert_eq!(clock.paused_at(), Some(0.0));

        clock.play();
        clock.tick(2.5);
        assert_eq!(clock.paused_at(), None);

        clock.pause();
        assert_eq!(clock.paused_at(), Some(2.5));
    }

    #[test]
    fn test_tick_stops_at_end() {
        let mut clock = PlaybackClock::new();
        clock.load(10.0);
        clock.play();
        clock.tick(4.0);
        clock.tick(8.0);
        assert_eq!(clock.position(), 10.0);
        assert!(!clock.is_playing());
    }

    #[test]
    fn test_seek_past_end_extends_media() {
        let mut clock = PlaybackClock::new();
        clock.load(100.0);
        clock.seek_to(125.0);
        assert_eq!(clock.position(), 125.0);
        assert_eq!(clock.duration(), Some(125.0));
        assert_eq!(clock.paused_at(), Some(125.0));
    }

    #[test]
    fn test_seek_is_clamped_at_start() {
        let mut clock = PlaybackClock::new();
        clock.load(100.0);
        clock.seek_to(-1.0);
        assert_eq!(clock.position(), 0.0);
        clock.seek_to(42.0);
        assert_eq!(clock.paused_at(), Some(42.0));
    }

    #[test]
    fn test_seek_without_media_is_ignored() {
        let mut clock = PlaybackClock::new();
        clock.seek_to(10.0);
        assert_eq!(clock.position(), 0.0);
        assert_eq!(clock.duration(), None);
    }

    #[test]
    fn test_shrinking_duration_moves_playhead() {
        let mut clock = PlaybackClock::new();
        clock.load(100.0);
        clock.seek_to(90.0);
        clock.set_duration(60.0);
        assert_eq!(clock.position(), 60.0);
    }
}
