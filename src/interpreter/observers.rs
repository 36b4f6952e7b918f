//! Subscriber lists notified by the interpreter.

use crate::core::{Schema, Snapshot};

/// Handle returned by every registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type EventObserver<E> = Box<dyn FnMut(&E) + Send>;
type TransitionObserver<S, C> = Box<dyn FnMut(&Snapshot<S, C>) + Send>;
type StopObserver = Box<dyn FnMut() + Send>;

/// Event, transition and stop subscribers of one interpreter.
///
/// Subscribers run synchronously in registration order. A panicking
/// subscriber is not caught.
pub struct Observers<M: Schema> {
    next_id: u64,
    on_event: Vec<(ObserverId, EventObserver<M::Event>)>,
    on_transition: Vec<(ObserverId, TransitionObserver<M::State, M::Context>)>,
    on_stop: Vec<(ObserverId, StopObserver)>,
}

impl<M: Schema> Default for Observers<M> {
    fn default() -> Self {
        Self {
            next_id: 0,
            on_event: Vec::new(),
            on_transition: Vec::new(),
            on_stop: Vec::new(),
        }
    }
}

impl<M: Schema> Observers<M> {
    fn allocate(&mut self) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn on_event<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&M::Event) + Send + 'static,
    {
        let id = self.allocate();
        self.on_event.push((id, Box::new(observer)));
        id
    }

    pub fn on_transition<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&Snapshot<M::State, M::Context>) + Send + 'static,
    {
        let id = self.allocate();
        self.on_transition.push((id, Box::new(observer)));
        id
    }

    pub fn on_stop<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut() + Send + 'static,
    {
        let id = self.allocate();
        self.on_stop.push((id, Box::new(observer)));
        id
    }

    /// Remove the subscriber registered under `id`. Returns false if none was.
    pub fn off(&mut self, id: ObserverId) -> bool {
        let before = self.len();
        self.on_event.retain(|(existing, _)| *existing != id);
        self.on_transition.retain(|(existing, _)| *existing != id);
        self.on_stop.retain(|(existing, _)| *existing != id);
        self.len() != before
    }

    pub fn len(&self) -> usize {
        self.on_event.len() + self.on_transition.len() + self.on_stop.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn notify_event(&mut self, event: &M::Event) {
        for (_, observer) in &mut self.on_event {
            observer(event);
        }
    }

    pub(crate) fn notify_transition(&mut self, snapshot: &Snapshot<M::State, M::Context>) {
        for (_, observer) in &mut self.on_transition {
            observer(snapshot);
        }
    }

    pub(crate) fn notify_stop(&mut self) {
        for (_, observer) in &mut self.on_stop {
            observer();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Auth, AuthContext, AuthEvent, AuthState};
    use std::sync::{Arc, Mutex};

    #[test]
    fn observers_run_in_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::<Auth>::default();

        let first = Arc::clone(&calls);
        observers.on_event(move |_| first.lock().unwrap().push("first"));
        let second = Arc::clone(&calls);
        observers.on_event(move |_| second.lock().unwrap().push("second"));

        observers.notify_event(&AuthEvent::Logout);

        assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn off_removes_only_that_subscriber() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::<Auth>::default();

        let kept = Arc::clone(&calls);
        observers.on_transition(move |s| kept.lock().unwrap().push(s.state));
        let removed = observers.on_transition(|_| panic!("unsubscribed observer called"));

        assert!(observers.off(removed));
        assert!(!observers.off(removed));
        assert_eq!(observers.len(), 1);

        observers.notify_transition(&Snapshot {
            state: AuthState::LoggedIn,
            context: AuthContext::default(),
            changed: true,
        });
        assert_eq!(*calls.lock().unwrap(), vec![AuthState::LoggedIn]);
    }

    #[test]
    fn stop_observers_are_notified() {
        let stopped = Arc::new(Mutex::new(0));
        let mut observers = Observers::<Auth>::default();

        let counter = Arc::clone(&stopped);
        observers.on_stop(move || *counter.lock().unwrap() += 1);
        observers.notify_stop();

        assert_eq!(*stopped.lock().unwrap(), 1);
    }
}
