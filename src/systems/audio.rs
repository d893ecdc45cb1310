//! Audio cue dispatch.
//!
//! Gameplay systems emit [`AudioEvent`]s; [`audio_system`] forwards them to whatever
//! [`AudioBackend`] the host installed. Without a backend the events are dropped.

use bevy_ecs::{
    change_detection::DetectChanges,
    event::{Event, EventReader},
    resource::Resource,
    system::ResMut,
};
use strum_macros::AsRefStr;
use tracing::{debug, trace};

/// One-shot sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Cue {
    Pickup,
    LoseLife,
    Success,
    Failure,
}

/// Events for triggering audio playback
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    PlayCue(Cue),
    /// Start the background music loop.
    StartMusic,
    StopMusic,
}

/// Whatever actually makes sound.
pub trait AudioBackend: Send + Sync {
    fn play_cue(&mut self, cue: Cue);
    fn start_music(&mut self);
    fn stop_music(&mut self);
    fn set_muted(&mut self, muted: bool);
}

/// Resource for tracking audio state
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioState {
    pub muted: bool,
    pub music_playing: bool,
}

#[derive(Resource)]
pub struct AudioResource(pub Box<dyn AudioBackend>);

impl AudioResource {
    pub fn new(backend: impl AudioBackend + 'static) -> Self {
        Self(Box::new(backend))
    }
}

/// A backend that only logs. Used by the headless binary.
#[derive(Debug, Default)]
pub struct LoggingAudio {
    muted: bool,
}

impl AudioBackend for LoggingAudio {
    fn play_cue(&mut self, cue: Cue) {
        debug!(cue = cue.as_ref(), muted = self.muted, "Cue");
    }

    fn start_music(&mut self) {
        debug!("Music started");
    }

    fn stop_music(&mut self) {
        debug!("Music stopped");
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

/// System that processes audio events and forwards them to the backend
pub fn audio_system(mut audio: Option<ResMut<AudioResource>>, mut state: ResMut<AudioState>, mut events: EventReader<AudioEvent>) {
    let Some(audio) = audio.as_deref_mut() else {
        let skipped = events.read().count();
        if skipped > 0 {
            trace!(skipped, "No audio backend, dropping events");
        }
        return;
    };

    if state.is_changed() {
        audio.0.set_muted(state.muted);
    }

    for event in events.read() {
        match *event {
            AudioEvent::PlayCue(cue) => {
                if state.muted {
                    trace!(cue = cue.as_ref(), "Muted, skipping cue");
                } else {
                    audio.0.play_cue(cue);
                }
            }
            AudioEvent::StartMusic => {
                if !state.music_playing {
                    audio.0.start_music();
                    state.music_playing = true;
                }
            }
            AudioEvent::StopMusic => {
                if state.music_playing {
                    audio.0.stop_music();
                    state.music_playing = false;
                }
            }
        }
    }
}
