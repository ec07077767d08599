//! Follow-along strip: every activated symbol is copied into it, and the
//! whole strip can be replayed in click order with a pause after each clip.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::alert::Alerter;
use crate::audio::AudioPlayer;
use crate::chart::{ContainerId, ElementId, NewElement, RenderTarget, SharedPage};
use crate::error::{MissingElementError, PlaybackError};

pub const DEFAULT_PAUSE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    Idle,
    Replaying,
}

/// Re-entrancy flag for replays. Holding a [`GuardToken`] means a replay is
/// in progress; dropping it returns the guard to idle.
#[derive(Debug, Default)]
pub struct PlaybackGuard {
    replaying: AtomicBool,
}

impl PlaybackGuard {
    pub fn try_acquire(&self) -> Option<GuardToken<'_>> {
        self.replaying
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GuardToken { guard: self })
    }

    pub fn state(&self) -> ReplayState {
        if self.replaying.load(Ordering::Acquire) {
            ReplayState::Replaying
        } else {
            ReplayState::Idle
        }
    }
}

#[derive(Debug)]
pub struct GuardToken<'a> {
    guard: &'a PlaybackGuard,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard.replaying.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayOutcome {
    Completed { played: usize, failed: usize },
    AlreadyReplaying,
}

#[derive(Debug, Clone)]
pub struct Activation {
    /// Copy appended to the follow-along strip, if that strip exists.
    pub copy: Option<ElementId>,
    pub playback: Result<(), PlaybackError>,
}

#[derive(Clone)]
pub struct FollowAlongSequencer {
    page: SharedPage,
    player: Arc<dyn AudioPlayer>,
    alerter: Arc<dyn Alerter>,
    guard: Arc<PlaybackGuard>,
    /// Latest activation number per button; only the newest activation of a
    /// button may clear its highlight.
    activations: Arc<Mutex<HashMap<ElementId, u64>>>,
    pause: Duration,
}

impl FollowAlongSequencer {
    pub fn new(page: SharedPage, player: Arc<dyn AudioPlayer>, alerter: Arc<dyn Alerter>) -> Self {
        Self {
            page,
            player,
            alerter,
            guard: Arc::new(PlaybackGuard::default()),
            activations: Arc::default(),
            pause: DEFAULT_PAUSE,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn pause(&self) -> Duration {
        self.pause
    }

    pub fn state(&self) -> ReplayState {
        self.guard.state()
    }

    pub fn is_replaying(&self) -> bool {
        self.state() == ReplayState::Replaying
    }

    /// Handles a click on a catalog button. Blocks until its clip finishes.
    ///
    /// Returns `Ok(None)` for elements that are not interactive, such as
    /// follow-along copies.
    pub fn activate(&self, id: ElementId) -> Result<Option<Activation>, MissingElementError> {
        let (path, copy, generation) = {
            let mut page = self.page.lock();
            let element = page
                .element(id)
                .cloned()
                .ok_or(MissingElementError::Element(id))?;
            if !element.interactive {
                return Ok(None);
            }
            page.clear_catalog_highlights();
            page.set_highlighted(id, true)?;
            let generation = {
                let mut activations = self.activations.lock();
                let latest = activations.entry(id).or_insert(0);
                *latest += 1;
                *latest
            };
            let copy = match page.append(ContainerId::FollowAlong, NewElement::copy_of(&element)) {
                Ok(copy) => Some(copy),
                Err(err) => {
                    error!(error = %err, "cannot record follow-along entry");
                    None
                }
            };
            debug!(symbol = %element.symbol, path = %element.audio_path, "button clicked");
            (element.audio_path, copy, generation)
        };

        let playback = self.play_clip(&path);

        // Lock order: page, then activations.
        let mut page = self.page.lock();
        if self.activations.lock().get(&id) == Some(&generation) {
            if let Err(err) = page.set_highlighted(id, false) {
                error!(error = %err, "cannot clear highlight");
            }
        }
        drop(page);
        Ok(Some(Activation { copy, playback }))
    }

    pub fn clear(&self) {
        match self.page.lock().clear_children(ContainerId::FollowAlong) {
            Ok(()) => debug!("follow along chart cleared"),
            Err(err) => error!(error = %err, "cannot clear follow-along chart"),
        }
    }

    /// Replays the follow-along strip in click order. Blocks until the last
    /// pause has elapsed; returns immediately if a replay is already running.
    pub fn replay_selected(&self) -> ReplayOutcome {
        let Some(_token) = self.guard.try_acquire() else {
            debug!("replay already in progress; ignoring request");
            return ReplayOutcome::AlreadyReplaying;
        };
        let entries = self.page.lock().follow_along();
        info!(count = entries.len(), "playing selected sounds");

        let mut played = 0;
        let mut failed = 0;
        for entry in &entries {
            match self.play_clip(&entry.audio_path) {
                Ok(()) => played += 1,
                Err(_) => failed += 1,
            }
            thread::sleep(self.pause);
        }
        info!(played, failed, "finished playing selected sounds");
        ReplayOutcome::Completed { played, failed }
    }

    pub fn spawn_activation(
        &self,
        id: ElementId,
    ) -> std::io::Result<JoinHandle<Result<Option<Activation>, MissingElementError>>> {
        let sequencer = self.clone();
        thread::Builder::new()
            .name("symbol-playback".to_string())
            .spawn(move || sequencer.activate(id))
    }

    pub fn spawn_replay(&self) -> std::io::Result<JoinHandle<ReplayOutcome>> {
        let sequencer = self.clone();
        thread::Builder::new()
            .name("follow-along-replay".to_string())
            .spawn(move || sequencer.replay_selected())
    }

    fn play_clip(&self, path: &str) -> Result<(), PlaybackError> {
        self.player.play(path).map_err(|err| {
            error!(path, cause = %err.cause, "failed to play sound");
            self.alerter.alert(&err.user_message());
            err
        })
    }
}
