//! History entries and the navigation state object.
//!
//! # Design Decisions
//! - One `NavigationState` per browsing context, passed by reference
//! - Readers get immutable snapshots; commits swap a whole new snapshot
//! - Every navigation takes a generation when issued; only the latest
//!   generation may commit (cancellation on supersede)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::navigation::outcome::NavigationStatus;
use crate::navigation::request::NavigationKind;
use crate::render::View;

/// Address history: entries plus a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct History {
    entries: Vec<String>,
    index: Option<usize>,
}

impl History {
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The location shown in the address bar.
    pub fn current(&self) -> Option<&str> {
        self.index
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
    }

    pub fn entry(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn back_index(&self) -> Option<usize> {
        self.index.and_then(|i| i.checked_sub(1))
    }

    pub fn forward_index(&self) -> Option<usize> {
        self.index
            .map(|i| i + 1)
            .filter(|i| *i < self.entries.len())
    }

    fn push(&mut self, location: String) {
        match self.index {
            Some(i) => self.entries.truncate(i + 1),
            None => self.entries.clear(),
        }
        self.entries.push(location);
        self.index = Some(self.entries.len() - 1);
    }

    fn replace(&mut self, location: String) {
        match self.index.and_then(|i| self.entries.get_mut(i)) {
            Some(entry) => *entry = location,
            None => self.push(location),
        }
    }

    /// Apply a committed navigation. `locations` holds the entry for the
    /// request followed by entries left behind by non-replacing redirects.
    pub(crate) fn record(&mut self, kind: NavigationKind, locations: &[String]) {
        let Some((first, rest)) = locations.split_first() else {
            return;
        };

        match kind {
            NavigationKind::Push => self.push(first.clone()),
            NavigationKind::Replace => self.replace(first.clone()),
            NavigationKind::Pop(index) if index < self.entries.len() => {
                self.index = Some(index);
                if self.current() != Some(first.as_str()) {
                    self.replace(first.clone());
                }
            }
            NavigationKind::Pop(_) => self.push(first.clone()),
        }

        for location in rest {
            self.push(location.clone());
        }
    }
}

/// An immutable view of the navigation state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub history: History,
    pub view: Option<View>,
    pub status: Option<NavigationStatus>,
    /// Generation of the navigation that produced this snapshot.
    pub generation: u64,
}

impl Snapshot {
    pub fn location(&self) -> Option<&str> {
        self.history.current()
    }
}

/// The single mutable navigation value of a browsing context.
#[derive(Debug)]
pub struct NavigationState {
    current: ArcSwap<Snapshot>,
    issued: AtomicU64,
    commit_lock: Mutex<()>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(Snapshot::default()),
            issued: AtomicU64::new(0),
            commit_lock: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    pub fn location(&self) -> Option<String> {
        self.current.load().location().map(str::to_owned)
    }

    /// Take the next generation for a newly issued navigation.
    pub(crate) fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `generation` is still the latest issued navigation.
    pub fn is_current(&self, generation: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == generation
    }

    /// Publish a new snapshot if `generation` has not been superseded.
    pub(crate) fn commit(&self, generation: u64, update: impl FnOnce(&mut Snapshot)) -> bool {
        let _guard = self
            .commit_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(generation) {
            return false;
        }

        let mut next = Snapshot::clone(&self.current.load_full());
        update(&mut next);
        next.generation = generation;
        self.current.store(Arc::new(next));
        true
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locations(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = History::default();
        history.record(NavigationKind::Push, &locations(&["/"]));
        history.record(NavigationKind::Push, &locations(&["/dashboard/resumes"]));
        history.record(NavigationKind::Push, &locations(&["/dashboard/settings"]));
        history.record(NavigationKind::Pop(0), &locations(&["/"]));
        assert_eq!(history.forward_index(), Some(1));

        history.record(NavigationKind::Push, &locations(&["/builder/abc123"]));
        assert_eq!(history.entries(), ["/", "/builder/abc123"]);
        assert_eq!(history.current(), Some("/builder/abc123"));
        assert_eq!(history.forward_index(), None);
        assert_eq!(history.back_index(), Some(0));
    }

    #[test]
    fn test_replace_on_empty_history_pushes() {
        let mut history = History::default();
        history.record(NavigationKind::Replace, &locations(&["/"]));
        assert_eq!(history.entries(), ["/"]);

        history.record(NavigationKind::Replace, &locations(&["/dashboard/resumes"]));
        assert_eq!(history.entries(), ["/dashboard/resumes"]);
        assert_eq!(history.index(), Some(0));
    }

    #[test]
    fn test_non_replacing_redirect_keeps_entry() {
        let mut history = History::default();
        history.record(NavigationKind::Push, &locations(&["/old", "/new"]));
        assert_eq!(history.entries(), ["/old", "/new"]);
        assert_eq!(history.current(), Some("/new"));
    }

    #[test]
    fn test_commit_rejects_superseded_generation() {
        let state = NavigationState::new();
        let first = state.begin();
        let second = state.begin();

        assert!(!state.commit(first, |s| {
            s.history.record(NavigationKind::Push, &locations(&["/a"]))
        }));
        assert!(state.location().is_none());

        assert!(state.commit(second, |s| {
            s.history.record(NavigationKind::Push, &locations(&["/b"]))
        }));
        assert_eq!(state.location().as_deref(), Some("/b"));
        assert_eq!(state.snapshot().generation, second);
    }
}
