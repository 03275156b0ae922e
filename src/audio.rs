//! Audio routing
//!
//! The simulation only names cues and tracks. This module maps them to asset
//! names and hands them to a backend. A missing or failing backend disables
//! audio with a warning; it never interrupts the game.

use std::io::Write;

use crate::settings::Settings;
use crate::sim::{GameEvent, MusicTrack, SoundCue};

/// Backend failure
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio asset unavailable: {0}")]
    Missing(String),
    #[error("audio output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Fire-and-forget a short clip
    fn play_cue(&mut self, asset: &str, volume: f32) -> Result<(), AudioError>;
    /// Switch background music
    fn play_track(&mut self, asset: &str, looping: bool, volume: f32) -> Result<(), AudioError>;
}

impl SoundCue {
    pub fn asset(&self) -> &'static str {
        match self {
            SoundCue::Crash => "crash.mp3",
            SoundCue::Pickup => "pickup.mp3",
            SoundCue::PauseDing => "pause_ding.mp3",
            SoundCue::Select => "select.mp3",
            SoundCue::PursuerGrowl => "frank_sound.mp3",
        }
    }
}

impl MusicTrack {
    /// Menu, pause and game-over share one track
    pub fn asset(&self) -> &'static str {
        match self {
            MusicTrack::Game => "bg_game.mp3",
            MusicTrack::Menu | MusicTrack::Pause | MusicTrack::GameOver => "bg_pause.mp3",
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    sfx_volume: f32,
    music_volume: f32,
    /// Asset of the track currently looping
    current_track: Option<&'static str>,
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>, settings: &Settings) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            current_track: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn current_track(&self) -> Option<&'static str> {
        self.current_track
    }

    /// Route one simulation event. `Quit` is not an audio concern.
    pub fn handle(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Cue(cue) => self.play_cue(cue),
            GameEvent::Track(track) => self.play_track(track),
            GameEvent::Quit => {}
        }
    }

    pub fn play_cue(&mut self, cue: SoundCue) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.play_cue(cue.asset(), self.sfx_volume) {
            self.disable(e);
        }
    }

    /// Switch music unless the same asset is already looping
    pub fn play_track(&mut self, track: MusicTrack) {
        let asset = track.asset();
        if self.current_track == Some(asset) {
            return;
        }
        self.current_track = Some(asset);
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.play_track(asset, true, self.music_volume) {
            self.disable(e);
        }
    }

    fn disable(&mut self, err: AudioError) {
        log::warn!("{} - audio disabled", err);
        self.backend = None;
    }
}

/// Terminal backend: rings the bell for selected cues, logs the rest
pub struct TerminalBell<W: Write> {
    out: W,
    bell_cues: Vec<&'static str>,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            bell_cues: vec![SoundCue::Crash.asset()],
        }
    }
}

impl<W: Write> AudioBackend for TerminalBell<W> {
    fn play_cue(&mut self, asset: &str, _volume: f32) -> Result<(), AudioError> {
        if self.bell_cues.iter().any(|c| *c == asset) {
            self.out.write_all(b"\x07")?;
            self.out.flush()?;
        } else {
            log::debug!("cue {}", asset);
        }
        Ok(())
    }

    fn play_track(&mut self, asset: &str, looping: bool, volume: f32) -> Result<(), AudioError> {
        log::debug!("track {} (looping: {}, volume: {:.2})", asset, looping, volume);
        Ok(())
    }
}
