//! Timed square markers for board feedback.
//!
//! Each animation marks squares right away and returns a task that resolves
//! exactly once, after the duration, when it clears the marks again. The task
//! only keeps a weak reference to the overlay, so a board that went away in
//! the meantime is reported instead of touched. Animations on the same overlay
//! are neither ordered nor merged; await one before starting the next.

use std::{
    sync::{Arc, Mutex, PoisonError, Weak},
    time::Duration,
};

use rustc_hash::FxHashMap;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::{coord::Coord, uci_move::UciMove};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Correct,
    Incorrect,
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationOutcome {
    Completed,
    TargetGone,
}

pub type SharedOverlay = Arc<Mutex<Overlay>>;

#[derive(Debug, Default)]
pub struct Overlay {
    markers: FxHashMap<Coord, Marker>,
}
impl Overlay {
    pub fn shared() -> SharedOverlay {
        Arc::new(Mutex::new(Overlay::default()))
    }
    pub fn marker(&self, square: Coord) -> Option<Marker> {
        self.markers.get(&square).copied()
    }
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
    /// Marked squares in notation order.
    pub fn marked(&self) -> Vec<(Coord, Marker)> {
        let mut marked: Vec<_> = self
            .markers
            .iter()
            .map(|(square, marker)| (*square, *marker))
            .collect();
        marked.sort_unstable_by_key(|(square, _)| *square);
        marked
    }
}

/// Marks `squares` and clears them after `duration`. Must be called from
/// within a tokio runtime.
pub fn flash_squares(
    overlay: &SharedOverlay,
    squares: impl IntoIterator<Item = Coord>,
    marker: Marker,
    duration: Duration,
) -> JoinHandle<AnimationOutcome> {
    let squares: Vec<_> = squares.into_iter().collect();
    {
        let mut overlay = overlay.lock().unwrap_or_else(PoisonError::into_inner);
        for square in &squares {
            overlay.markers.insert(*square, marker);
        }
    }
    let target: Weak<Mutex<Overlay>> = Arc::downgrade(overlay);
    tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        let Some(overlay) = target.upgrade() else {
            trace!(?marker, "overlay dropped before the animation ended");
            return AnimationOutcome::TargetGone;
        };
        let mut overlay = overlay.lock().unwrap_or_else(PoisonError::into_inner);
        for square in &squares {
            overlay.markers.remove(square);
        }
        trace!(?marker, count = squares.len(), "animation completed");
        AnimationOutcome::Completed
    })
}
pub fn flash_square(
    overlay: &SharedOverlay,
    square: Coord,
    marker: Marker,
    duration: Duration,
) -> JoinHandle<AnimationOutcome> {
    flash_squares(overlay, [square], marker, duration)
}
/// Highlights both ends of a correct move.
pub fn celebrate(
    overlay: &SharedOverlay,
    movement: UciMove,
    duration: Duration,
) -> JoinHandle<AnimationOutcome> {
    flash_squares(
        overlay,
        [movement.origin, movement.destination],
        Marker::Correct,
        duration,
    )
}
