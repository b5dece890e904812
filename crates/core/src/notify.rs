//! Notification module - snapshot diffs for audio and render collaborators
//!
//! The engine never calls out to collaborators. Instead a driver takes a snapshot after
//! each mutating call and [`diff`] turns consecutive snapshots into [`Notification`]s.
//! [`Notifier`] keeps the previous snapshot and forwards the result to an [`Observer`].

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::snapshot::GameSnapshot;
use crate::types::GameStatus;

/// Most notifications a single diff can produce
pub const MAX_NOTIFICATIONS: usize = 12;

/// Notifications produced by one diff, in emission order
pub type Notifications = ArrayVec<Notification, MAX_NOTIFICATIONS>;

/// Something a collaborator may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum Notification {
    GameStarted,
    PieceMoved,
    PieceRotated,
    SoftDropped,
    PieceLocked,
    LinesCleared(u32),
    LevelUp(u32),
    PieceHeld,
    Paused,
    Resumed,
    GameOver,
}

/// Notifications implied by going from `prev` to `next`
///
/// A new game id yields only [`Notification::GameStarted`]. Gravity steps are silent;
/// a one-row descent that also scored is reported as a soft drop.
pub fn diff(prev: &GameSnapshot, next: &GameSnapshot) -> Notifications {
    let mut out = Notifications::new();

    if next.game_id != prev.game_id {
        out.push(Notification::GameStarted);
        return out;
    }

    match (prev.status, next.status) {
        (GameStatus::Playing, GameStatus::Paused) => out.push(Notification::Paused),
        (GameStatus::Paused, GameStatus::Playing) => out.push(Notification::Resumed),
        _ => {}
    }

    if let (Some(before), Some(after)) = (prev.active, next.active) {
        if prev.piece_id == next.piece_id {
            if before.rotation != after.rotation {
                out.push(Notification::PieceRotated);
            } else if before.position.col != after.position.col {
                out.push(Notification::PieceMoved);
            } else if after.position.row > before.position.row && next.score > prev.score {
                out.push(Notification::SoftDropped);
            }
        }
    }

    if prev.can_hold && !next.can_hold && next.held.is_some() {
        out.push(Notification::PieceHeld);
    }

    if next.pieces_locked > prev.pieces_locked {
        out.push(Notification::PieceLocked);
    }

    if next.lines > prev.lines {
        out.push(Notification::LinesCleared(next.lines - prev.lines));
    }

    if next.level > prev.level {
        out.push(Notification::LevelUp(next.level));
    }

    if next.status == GameStatus::GameOver && prev.status != GameStatus::GameOver {
        out.push(Notification::GameOver);
    }

    out
}

/// Receives notifications (audio, rendering, logging, ...)
pub trait Observer {
    fn notify(&mut self, notification: Notification);
}

impl<T: FnMut(Notification)> Observer for T {
    fn notify(&mut self, notification: Notification) {
        self(notification)
    }
}

/// Diffs each published snapshot against the previous one and forwards the result
#[derive(Debug)]
pub struct Notifier<O> {
    observer: O,
    last: Option<GameSnapshot>,
}

impl<O: Observer> Notifier<O> {
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            last: None,
        }
    }

    /// Publish a fresh snapshot; the first one only primes the notifier
    pub fn publish(&mut self, snapshot: GameSnapshot) -> Notifications {
        let notifications = match &self.last {
            Some(prev) => diff(prev, &snapshot),
            None => Notifications::new(),
        };
        for &notification in &notifications {
            self.observer.notify(notification);
        }
        self.last = Some(snapshot);
        notifications
    }

    pub fn last(&self) -> Option<&GameSnapshot> {
        self.last.as_ref()
    }
}
