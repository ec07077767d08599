use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use rodio::source::{Source, UniformSourceIterator};
use rodio::{Decoder, OutputStream, Sink};
use tracing::debug;

use crate::error::PlaybackError;

/// Plays a single clip, returning once it has finished.
pub trait AudioPlayer: Send + Sync {
    fn play(&self, path: &str) -> Result<(), PlaybackError>;
}

/// Plays catalog clips from disk through the default output device.
#[derive(Debug, Clone)]
pub struct RodioPlayer {
    assets_root: PathBuf,
}

impl RodioPlayer {
    pub fn new(assets_root: impl Into<PathBuf>) -> Self {
        Self {
            assets_root: assets_root.into(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.assets_root.join(candidate)
        }
    }

    /// Opens and decodes a clip without touching the output device.
    pub fn load(&self, path: &str) -> Result<Decoder<BufReader<File>>, PlaybackError> {
        let resolved = self.resolve(path);
        let file = File::open(&resolved)
            .map_err(|err| PlaybackError::new(path, format!("{}: {err}", resolved.display())))?;
        Decoder::new(BufReader::new(file)).map_err(|err| PlaybackError::new(path, err))
    }
}

impl AudioPlayer for RodioPlayer {
    fn play(&self, path: &str) -> Result<(), PlaybackError> {
        debug!(path, "attempting to play sound");
        let decoder = self.load(path)?;
        let (_stream, handle) =
            OutputStream::try_default().map_err(|err| PlaybackError::new(path, err))?;
        let sink = Sink::try_new(&handle).map_err(|err| PlaybackError::new(path, err))?;
        sink.append(ensure_stereo(decoder.convert_samples::<f32>()));
        sink.set_volume(1.0);
        debug!(path, "playing sound");
        sink.sleep_until_end();
        Ok(())
    }
}

fn ensure_stereo<S>(source: S) -> Box<dyn Source<Item = f32> + Send>
where
    S: Source<Item = f32> + Send + 'static,
{
    if source.channels() == 2 {
        Box::new(source)
    } else {
        let sample_rate = source.sample_rate();
        Box::new(UniformSourceIterator::new(source, 2, sample_rate))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCall {
    pub path: String,
    pub started: Instant,
    pub finished: Instant,
    pub succeeded: bool,
}

#[derive(Debug, Default)]
struct GateCounts {
    started: usize,
    released: usize,
}

/// Holds each mocked clip open until the test releases it. Clips are
/// released in the order they started.
#[derive(Debug, Default)]
pub struct ClipGate {
    counts: Mutex<GateCounts>,
    changed: Condvar,
}

impl ClipGate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Blocks until at least `count` clips have started.
    pub fn wait_started(&self, count: usize) {
        let mut counts = self.counts.lock();
        while counts.started < count {
            self.changed.wait(&mut counts);
        }
    }

    /// Lets the oldest clip still held finish.
    pub fn release_one(&self) {
        self.counts.lock().released += 1;
        self.changed.notify_all();
    }

    fn enter(&self) {
        let mut counts = self.counts.lock();
        counts.started += 1;
        let ticket = counts.started;
        self.changed.notify_all();
        while counts.released < ticket {
            self.changed.wait(&mut counts);
        }
    }
}

/// Player that records every call instead of producing sound.
#[derive(Debug, Default)]
pub struct MockPlayer {
    clip_duration: Duration,
    failing: Vec<String>,
    gate: Option<Arc<ClipGate>>,
    calls: Mutex<Vec<PlayCall>>,
}

impl MockPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each `play` blocks for `duration` before returning.
    pub fn with_clip_duration(mut self, duration: Duration) -> Self {
        self.clip_duration = duration;
        self
    }

    /// Each `play` blocks until `gate` releases it.
    pub fn with_gate(mut self, gate: Arc<ClipGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn failing_on(mut self, path: impl Into<String>) -> Self {
        self.failing.push(path.into());
        self
    }

    pub fn calls(&self) -> Vec<PlayCall> {
        self.calls.lock().clone()
    }

    pub fn played_paths(&self) -> Vec<String> {
        self.calls.lock().iter().map(|call| call.path.clone()).collect()
    }
}

impl AudioPlayer for MockPlayer {
    fn play(&self, path: &str) -> Result<(), PlaybackError> {
        let started = Instant::now();
        let succeeded = !self.failing.iter().any(|failing| failing == path);
        if let Some(gate) = &self.gate {
            gate.enter();
        }
        if succeeded && !self.clip_duration.is_zero() {
            std::thread::sleep(self.clip_duration);
        }
        self.calls.lock().push(PlayCall {
            path: path.to_string(),
            started,
            finished: Instant::now(),
            succeeded,
        });
        if succeeded {
            Ok(())
        } else {
            Err(PlaybackError::new(path, "mock failure"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_paths_against_assets_root() {
        let player = RodioPlayer::new("/srv/assets");
        assert_eq!(
            player.resolve("sounds/sound_a.mp3"),
            PathBuf::from("/srv/assets/sounds/sound_a.mp3")
        );
        assert_eq!(player.resolve("/tmp/x.wav"), PathBuf::from("/tmp/x.wav"));
    }

    #[test]
    fn missing_file_reports_requested_path() {
        let player = RodioPlayer::new(std::env::temp_dir().join("phonochart-missing"));
        let err = player.play("sounds/nope.mp3").unwrap_err();
        assert_eq!(err.path, "sounds/nope.mp3");
        assert!(err.user_message().contains("sounds/nope.mp3"));
    }

    #[test]
    fn gate_releases_clips_in_start_order() {
        let gate = ClipGate::new();
        let player = Arc::new(MockPlayer::new().with_gate(gate.clone()));
        let first = {
            let player = player.clone();
            std::thread::spawn(move || player.play("first.mp3"))
        };
        gate.wait_started(1);
        let second = {
            let player = player.clone();
            std::thread::spawn(move || player.play("second.mp3"))
        };
        gate.wait_started(2);
        assert!(player.calls().is_empty());

        gate.release_one();
        first.join().unwrap().unwrap();
        assert_eq!(player.played_paths(), ["first.mp3"]);
        gate.release_one();
        second.join().unwrap().unwrap();
        assert_eq!(player.played_paths(), ["first.mp3", "second.mp3"]);
    }

    #[test]
    fn mock_records_failures() {
        let player = MockPlayer::new().failing_on("bad.mp3");
        assert!(player.play("good.mp3").is_ok());
        assert!(player.play("bad.mp3").is_err());
        let calls = player.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].succeeded);
        assert!(!calls[1].succeeded);
    }
}
