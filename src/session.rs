//! Swipe session state.
//!
//! Owns the shuffled queue, the liked/passed sets and the view-history log.
//! All mutation goes through [`Session::swipe`] and [`Session::tick`]; the
//! cool-down lock guarantees at most one dismissal is in flight at any time.

use std::time::{Duration, Instant};

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{DisplayProject, HistoryEntry, SwipeAction};

/// Delay after an accepted gesture during which further gestures are ignored
/// and the queue position has not yet advanced.
pub const COOLDOWN: Duration = Duration::from_millis(300);

/// A dismissal that has been accepted but not yet finalized.
#[derive(Debug, Clone, Copy)]
pub struct PendingSwipe {
    pub direction: SwipeAction,
    since: Instant,
}

/// Per-tab swipe session over the static dataset.
pub struct Session {
    /// Shuffled view over the dataset: video-bearing projects first, then the
    /// rest, each block independently randomized.
    queue: Vec<DisplayProject>,
    /// Index of the current card.
    position: usize,
    liked: Vec<DisplayProject>,
    passed: Vec<DisplayProject>,
    history: Vec<HistoryEntry>,
    /// The in-flight dismissal, if any. While set, the session is locked.
    pending: Option<PendingSwipe>,
    cooldown: Duration,
}

impl Session {
    /// Build a fresh session from the dataset: partition into video-bearing
    /// and video-less projects, shuffle each partition, concatenate
    /// video-first and start at position zero.
    pub fn new(dataset: &[DisplayProject], rng: &mut impl Rng) -> Self {
        Self::with_cooldown(dataset, rng, COOLDOWN)
    }

    pub fn with_cooldown(
        dataset: &[DisplayProject],
        rng: &mut impl Rng,
        cooldown: Duration,
    ) -> Self {
        Self {
            queue: build_queue(dataset, rng),
            position: 0,
            liked: Vec::new(),
            passed: Vec::new(),
            history: Vec::new(),
            pending: None,
            cooldown,
        }
    }

    /// The project currently on the card, if the queue is not exhausted.
    pub fn current(&self) -> Option<&DisplayProject> {
        self.queue.get(self.position)
    }

    pub fn queue(&self) -> &[DisplayProject] {
        &self.queue
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn liked(&self) -> &[DisplayProject] {
        &self.liked
    }

    pub fn passed(&self) -> &[DisplayProject] {
        &self.passed
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Direction of the in-flight dismissal, if one is pending.
    pub fn pending_direction(&self) -> Option<SwipeAction> {
        self.pending.map(|p| p.direction)
    }

    /// Whether every card has been dismissed.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.queue.len()
    }

    /// Accept a dismissal gesture for the current card.
    ///
    /// Exactly one gesture is honored per card: while a dismissal is in
    /// flight, or once the queue is exhausted, the gesture is ignored and
    /// `false` is returned. An accepted gesture appends the current project
    /// to the liked or passed set and arms the cool-down; the position only
    /// advances when [`Session::tick`] observes the cool-down elapsed.
    pub fn swipe(&mut self, direction: SwipeAction, now: Instant) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let Some(project) = self.queue.get(self.position) else {
            return false;
        };

        match direction {
            SwipeAction::Like => self.liked.push(project.clone()),
            SwipeAction::Pass => self.passed.push(project.clone()),
        }
        self.history.push(HistoryEntry {
            title: project.title.clone(),
            action: direction,
            at: Utc::now(),
        });
        self.pending = Some(PendingSwipe {
            direction,
            since: now,
        });
        true
    }

    /// Finalize the in-flight dismissal once the cool-down has elapsed.
    ///
    /// Returns `true` when the position advanced on this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if now.duration_since(pending.since) < self.cooldown {
            return false;
        }
        self.pending = None;
        self.position += 1;
        true
    }

    /// Start over: re-shuffle the dataset and clear all session state.
    pub fn restart(&mut self, dataset: &[DisplayProject], rng: &mut impl Rng) {
        self.queue = build_queue(dataset, rng);
        self.position = 0;
        self.liked.clear();
        self.passed.clear();
        self.history.clear();
        self.pending = None;
    }
}

/// Partition the dataset by video presence and shuffle each partition
/// independently, video-bearing projects first.
fn build_queue(dataset: &[DisplayProject], rng: &mut impl Rng) -> Vec<DisplayProject> {
    let (mut with_video, mut without_video): (Vec<DisplayProject>, Vec<DisplayProject>) = dataset
        .iter()
        .cloned()
        .partition(|p| p.video_id().is_some());
    with_video.shuffle(rng);
    without_video.shuffle(rng);
    with_video.extend(without_video);
    with_video
}
