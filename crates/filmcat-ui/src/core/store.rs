//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Use small, focused slices so reducers stay predictable.
//! - The session slice is written only by the session service subscriber.

use crate::core::auth::Session;
use crate::features::films::state::FilmsState;
use crate::models::{Toast, ToastKind};
use std::collections::BTreeMap;
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

/// Most toasts shown at once; older ones are dropped first.
pub const MAX_TOASTS: usize = 4;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store)]
pub struct AppStore {
    /// Current session snapshot.
    pub session: Session,
    /// Films page state.
    pub films: FilmsState,
    /// Transient notifications.
    pub toasts: ToastSlice,
}

impl Default for AppStore {
    fn default() -> Self {
        Self {
            session: Session::booting(),
            films: FilmsState::default(),
            toasts: ToastSlice::default(),
        }
    }
}

/// Dispatcher for the global store.
#[must_use]
pub fn app_dispatch() -> Dispatch<AppStore> {
    Dispatch::<AppStore>::new()
}

/// Toast queue with monotonic ids.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ToastSlice {
    /// Visible toasts, oldest first.
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastSlice {
    /// Queue a toast, trimming to [`MAX_TOASTS`]. Returns its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            message: message.into(),
            kind,
        });
        if self.items.len() > MAX_TOASTS {
            let drain = self.items.len() - MAX_TOASTS;
            self.items.drain(0..drain);
        }
        id
    }

    /// Remove the toast with `id`, if still visible.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }
}

/// Per-toast dismissal handles, armed once when a toast first appears.
#[derive(Debug)]
pub struct ToastTimers<H> {
    armed: BTreeMap<u64, H>,
}

impl<H> Default for ToastTimers<H> {
    fn default() -> Self {
        Self {
            armed: BTreeMap::new(),
        }
    }
}

impl<H> ToastTimers<H> {
    /// Arm a handle for each newly visible toast and drop the handles of
    /// toasts that are gone. Existing handles are left running.
    pub fn sync(&mut self, visible: &[Toast], mut arm: impl FnMut(u64) -> H) {
        self.armed
            .retain(|id, _| visible.iter().any(|toast| toast.id == *id));
        for toast in visible {
            self.armed.entry(toast.id).or_insert_with(|| arm(toast.id));
        }
    }

    /// Drop every handle.
    pub fn clear(&mut self) {
        self.armed.clear();
    }
}
