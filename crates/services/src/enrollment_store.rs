//! Shared enrollment state for independently rendered views.
//!
//! The store is injected wherever it is needed and lives as long as the
//! signed-in session; `clear` is called on logout.

use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sport_core::model::{SessionKey, TrainingId, parse_session_key};

/// Handle returned by [`EnrollmentStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Point-in-time copy of the enrolled sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentSnapshot {
    enrolled: BTreeMap<SessionKey, TrainingId>,
}

impl EnrollmentSnapshot {
    #[must_use]
    pub fn contains(&self, key: &SessionKey) -> bool {
        self.enrolled.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.enrolled.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enrolled.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SessionKey> {
        self.enrolled.keys()
    }
}

type Listener = Arc<dyn Fn(&EnrollmentSnapshot) + Send + Sync>;

#[derive(Default)]
struct StoreState {
    snapshot: EnrollmentSnapshot,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

/// Set of enrolled session keys with change notification.
///
/// Cloning yields another handle to the same state. Listeners run after the
/// internal lock is released, so they may read the store again.
#[derive(Clone, Default)]
pub struct EnrollmentStore {
    inner: Arc<Mutex<StoreState>>,
}

impl EnrollmentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `change` and notify listeners if it reports a modification.
    fn mutate(&self, change: impl FnOnce(&mut BTreeMap<SessionKey, TrainingId>) -> bool) -> bool {
        let (changed, snapshot, listeners) = {
            let mut state = self.state();
            let changed = change(&mut state.snapshot.enrolled);
            let listeners: Vec<Listener> = if changed {
                state
                    .listeners
                    .iter()
                    .map(|(_, listener)| Arc::clone(listener))
                    .collect()
            } else {
                Vec::new()
            };
            (changed, state.snapshot.clone(), listeners)
        };

        for listener in listeners {
            listener(&snapshot);
        }
        changed
    }

    /// Record an enrollment. Returns `false` if nothing changed.
    pub fn enroll(&self, key: SessionKey, training: TrainingId) -> bool {
        self.mutate(|enrolled| enrolled.insert(key, training) != Some(training))
    }

    /// Forget an enrollment. Returns `false` if the key was not enrolled.
    pub fn cancel(&self, key: &SessionKey) -> bool {
        self.mutate(|enrolled| enrolled.remove(key).is_some())
    }

    /// Replace everything known about the week starting at `week_start` with
    /// `entries`, as reported by the server.
    ///
    /// Keys whose date cannot be read are left untouched.
    pub fn replace_week(
        &self,
        week_start: NaiveDate,
        entries: impl IntoIterator<Item = (SessionKey, TrainingId)>,
    ) -> bool {
        let week_end = week_start + Duration::weeks(1);
        let incoming: BTreeMap<SessionKey, TrainingId> = entries.into_iter().collect();

        self.mutate(|enrolled| {
            let before = enrolled.clone();
            enrolled.retain(|key, _| {
                parse_session_key(key.as_str())
                    .is_none_or(|parts| parts.date < week_start || parts.date >= week_end)
            });
            enrolled.extend(incoming);
            *enrolled != before
        })
    }

    /// Drop all state. Listeners stay registered.
    pub fn clear(&self) -> bool {
        self.mutate(|enrolled| {
            let changed = !enrolled.is_empty();
            enrolled.clear();
            changed
        })
    }

    #[must_use]
    pub fn is_enrolled(&self, key: &SessionKey) -> bool {
        self.state().snapshot.contains(key)
    }

    #[must_use]
    pub fn training_for(&self, key: &SessionKey) -> Option<TrainingId> {
        self.state().snapshot.enrolled.get(key).copied()
    }

    #[must_use]
    pub fn snapshot(&self) -> EnrollmentSnapshot {
        self.state().snapshot.clone()
    }

    /// Register a listener called with the new snapshot after every change.
    pub fn subscribe(
        &self,
        listener: impl Fn(&EnrollmentSnapshot) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut state = self.state();
        state.next_subscription += 1;
        let id = SubscriptionId(state.next_subscription);
        state.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state();
        let before = state.listeners.len();
        state.listeners.retain(|(existing, _)| *existing != id);
        state.listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn key(activity: &str, y: i32, m: u32, d: u32) -> SessionKey {
        SessionKey::generate(
            activity,
            "Monday",
            "09:00 - 10:30",
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    #[test]
    fn enroll_and_cancel() {
        let store = EnrollmentStore::new();
        let yoga = key("Yoga", 2024, 1, 15);

        assert!(store.enroll(yoga.clone(), TrainingId::new(1)));
        assert!(!store.enroll(yoga.clone(), TrainingId::new(1)));
        assert!(store.is_enrolled(&yoga));
        assert_eq!(store.training_for(&yoga), Some(TrainingId::new(1)));

        assert!(store.cancel(&yoga));
        assert!(!store.cancel(&yoga));
        assert!(!store.is_enrolled(&yoga));
    }

    #[test]
    fn clones_share_state() {
        let store = EnrollmentStore::new();
        let view = store.clone();
        store.enroll(key("Yoga", 2024, 1, 15), TrainingId::new(1));
        assert_eq!(view.snapshot().len(), 1);
    }

    #[test]
    fn listeners_see_changes_only() {
        let store = EnrollmentStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let id = store.subscribe(move |snapshot| {
            seen.fetch_add(1, Ordering::SeqCst);
            assert!(snapshot.len() <= 1);
        });

        let yoga = key("Yoga", 2024, 1, 15);
        store.enroll(yoga.clone(), TrainingId::new(1));
        store.enroll(yoga.clone(), TrainingId::new(1));
        store.cancel(&yoga);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.enroll(yoga, TrainingId::new(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn listener_may_read_store() {
        let store = EnrollmentStore::new();
        let reader = store.clone();
        let observed = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&observed);
        store.subscribe(move |_| {
            sink.store(reader.snapshot().len(), Ordering::SeqCst);
        });

        store.enroll(key("Yoga", 2024, 1, 15), TrainingId::new(1));
        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn replace_week_keeps_other_weeks() {
        let store = EnrollmentStore::new();
        let last_week = key("Yoga", 2024, 1, 8);
        let this_week = key("Yoga", 2024, 1, 15);
        let sunday = key("Swimming", 2024, 1, 21);
        let next_week = key("Yoga", 2024, 1, 22);
        let opaque = SessionKey::from_raw("legacy");

        for (k, id) in [
            (last_week.clone(), 1),
            (this_week.clone(), 2),
            (sunday.clone(), 3),
            (next_week.clone(), 4),
            (opaque.clone(), 5),
        ] {
            store.enroll(k, TrainingId::new(id));
        }

        let week = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let football = key("Football", 2024, 1, 17);
        assert!(store.replace_week(week, [(football.clone(), TrainingId::new(9))]));

        let snapshot = store.snapshot();
        assert!(snapshot.contains(&last_week));
        assert!(snapshot.contains(&next_week));
        assert!(snapshot.contains(&opaque));
        assert!(snapshot.contains(&football));
        assert!(!snapshot.contains(&this_week));
        assert!(!snapshot.contains(&sunday));

        assert!(!store.replace_week(week, [(football, TrainingId::new(9))]));
    }

    #[test]
    fn clear_empties_store_and_notifies() {
        let store = EnrollmentStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.enroll(key("Yoga", 2024, 1, 15), TrainingId::new(1));
        assert!(store.clear());
        assert!(store.snapshot().is_empty());
        assert!(!store.clear());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
