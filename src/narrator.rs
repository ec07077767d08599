//! Spoken welcome messages.
//!
//! Speech backends often publish their voice list some time after start-up,
//! so [`NarratorService::speak`] polls the engine until a voice shows up or
//! the configured timeout passes. Nothing is queued past the timeout.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const WELCOME_PITCH: f32 = 1.2;
pub const WELCOME_RATE: f32 = 1.0;

/// Text plus prosody, with pitch and rate relative to the engine's normal
/// setting (1.0 = normal).
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub pitch: f32,
    pub rate: f32,
}

impl Utterance {
    pub fn welcome(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pitch: WELCOME_PITCH,
            rate: WELCOME_RATE,
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("speech engine error: {0}")]
pub struct SpeechError(pub String);

pub trait SpeechEngine: Send + Sync {
    fn voices_available(&self) -> Result<usize, SpeechError>;
    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum NarrationOutcome {
    Spoken,
    VoicesUnavailable { waited: Duration },
    Failed(String),
}

#[derive(Debug, Clone, Copy)]
pub struct NarratorSettings {
    pub poll_interval: Duration,
    pub voice_timeout: Duration,
}

impl Default for NarratorSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            voice_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Clone)]
pub struct NarratorService {
    engine: Arc<dyn SpeechEngine>,
    settings: NarratorSettings,
}

impl NarratorService {
    pub fn new(engine: Arc<dyn SpeechEngine>, settings: NarratorSettings) -> Self {
        Self { engine, settings }
    }

    pub fn speak(&self, message: &str) -> NarrationOutcome {
        let utterance = Utterance::welcome(message);
        let waited = match self.wait_for_voices() {
            Ok(waited) => waited,
            Err(outcome) => return outcome,
        };
        debug!(waited_ms = waited.as_millis() as u64, "voices loaded");
        match self.engine.speak(&utterance) {
            Ok(()) => {
                info!(text = %utterance.text, "narration queued");
                NarrationOutcome::Spoken
            }
            Err(err) => {
                warn!(error = %err, "speech engine rejected utterance");
                NarrationOutcome::Failed(err.to_string())
            }
        }
    }

    pub fn speak_in_background(
        &self,
        message: String,
    ) -> std::io::Result<JoinHandle<NarrationOutcome>> {
        let narrator = self.clone();
        thread::Builder::new()
            .name("narrator".to_string())
            .spawn(move || narrator.speak(&message))
    }

    fn wait_for_voices(&self) -> Result<Duration, NarrationOutcome> {
        let started = Instant::now();
        loop {
            match self.engine.voices_available() {
                Ok(count) if count > 0 => return Ok(started.elapsed()),
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, "failed to query voices");
                    return Err(NarrationOutcome::Failed(err.to_string()));
                }
            }
            let waited = started.elapsed();
            if waited >= self.settings.voice_timeout {
                warn!(
                    waited_ms = waited.as_millis() as u64,
                    "no speech voices became available; skipping narration"
                );
                return Err(NarrationOutcome::VoicesUnavailable { waited });
            }
            thread::sleep(self.settings.poll_interval);
        }
    }
}

/// Engine used when no speech backend is compiled in or none could start.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSpeechEngine;

impl SpeechEngine for LogSpeechEngine {
    fn voices_available(&self) -> Result<usize, SpeechError> {
        Ok(1)
    }

    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        info!(
            text = %utterance.text,
            pitch = utterance.pitch,
            rate = utterance.rate,
            "speech output unavailable; narration logged only"
        );
        Ok(())
    }
}

#[cfg(feature = "tts")]
pub use backend::TtsEngine;

#[cfg(feature = "tts")]
mod backend {
    use parking_lot::Mutex;
    use tts::Tts;

    use super::{SpeechEngine, SpeechError, Utterance};

    /// Platform speech through the `tts` crate.
    pub struct TtsEngine {
        tts: Mutex<Tts>,
    }

    impl TtsEngine {
        pub fn new() -> Result<Self, SpeechError> {
            let tts = Tts::default().map_err(|err| SpeechError(err.to_string()))?;
            Ok(Self {
                tts: Mutex::new(tts),
            })
        }
    }

    impl SpeechEngine for TtsEngine {
        fn voices_available(&self) -> Result<usize, SpeechError> {
            let tts = self.tts.lock();
            if !tts.supported_features().voice {
                return Ok(1);
            }
            tts.voices()
                .map(|voices| voices.len())
                .map_err(|err| SpeechError(err.to_string()))
        }

        fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
            let mut tts = self.tts.lock();
            let features = tts.supported_features();
            if features.pitch {
                let pitch = (tts.normal_pitch() * utterance.pitch)
                    .clamp(tts.min_pitch(), tts.max_pitch());
                tts.set_pitch(pitch)
                    .map_err(|err| SpeechError(err.to_string()))?;
            }
            if features.rate {
                let rate =
                    (tts.normal_rate() * utterance.rate).clamp(tts.min_rate(), tts.max_rate());
                tts.set_rate(rate)
                    .map_err(|err| SpeechError(err.to_string()))?;
            }
            tts.speak(utterance.text.as_str(), false)
                .map(|_| ())
                .map_err(|err| SpeechError(err.to_string()))
        }
    }
}

/// Picks the platform engine when it starts and answers a voice query,
/// otherwise logs utterances.
pub fn default_engine() -> Arc<dyn SpeechEngine> {
    #[cfg(feature = "tts")]
    {
        match TtsEngine::new().and_then(|engine| engine.voices_available().map(|_| engine)) {
            Ok(engine) => {
                debug!("initialized speech engine");
                return Arc::new(engine);
            }
            Err(err) => warn!(error = %err, "failed to load speech engine"),
        }
    }
    Arc::new(LogSpeechEngine)
}

/// Engine for tests: reports no voices until `voices_after` queries have
/// been made, then records every utterance.
#[derive(Debug, Default)]
pub struct MockSpeechEngine {
    voices_after: usize,
    never_ready: bool,
    queries: Mutex<usize>,
    spoken: Mutex<Vec<Utterance>>,
}

impl MockSpeechEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn voices_after(mut self, queries: usize) -> Self {
        self.voices_after = queries;
        self
    }

    pub fn without_voices(mut self) -> Self {
        self.never_ready = true;
        self
    }

    pub fn queries(&self) -> usize {
        *self.queries.lock()
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().clone()
    }
}

impl SpeechEngine for MockSpeechEngine {
    fn voices_available(&self) -> Result<usize, SpeechError> {
        let mut queries = self.queries.lock();
        *queries += 1;
        if self.never_ready || *queries <= self.voices_after {
            Ok(0)
        } else {
            Ok(1)
        }
    }

    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        self.spoken.lock().push(utterance.clone());
        Ok(())
    }
}
