//! Listener registry and event fan-out.
//!
//! One native event is delivered to every listener whose [`EventType`]
//! matches it, from the most general to the most specific:
//!
//! 1. [`EventType::KeyDown`] or [`EventType::KeyUp`],
//! 2. [`EventType::Mouse`] if the event comes from a mouse,
//! 3. each `/`-separated part of the label (`"G4"`, then `"M1"`),
//! 4. the full label (`"G4/M1"`).
//!
//! A label without `/` is its own only part, so steps 3 and 4 both notify it.
//!
//! Keys are compared for exact equality. Listeners of one key run in
//! registration order.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use lgsdk_gkey::{EventType, KeyEvent, ListenerRegistry, listener};
//!
//! let registry = ListenerRegistry::new();
//! let hits = Arc::new(AtomicUsize::new(0));
//!
//! let counter = Arc::clone(&hits);
//! registry.add("G4", listener(move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! }));
//!
//! registry.dispatch(&KeyEvent::gkey(4, 1, true), "G4/M1");
//! registry.dispatch(&KeyEvent::gkey(4, 2, true), "G4/M2");
//! registry.dispatch(&KeyEvent::gkey(5, 1, true), "G5/M1");
//! assert_eq!(hits.load(Ordering::SeqCst), 2);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::code::KeyEvent;
use crate::native::KeySink;

/// Classification key a listener subscribes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Any press.
    KeyDown,

    /// Any release.
    KeyUp,

    /// Any mouse button transition.
    Mouse,

    /// A label or label part, e.g. `"G4/M1"`, `"G4"`, `"M1"` or
    /// `"Mouse Btn 8"`.
    Label(String),
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        match value {
            "keyDown" => Self::KeyDown,
            "keyUp" => Self::KeyUp,
            "mouse" => Self::Mouse,
            label => Self::Label(label.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "keyDown" | "keyUp" | "mouse" => Self::from(value.as_str()),
            _ => Self::Label(value),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyDown => f.write_str("keyDown"),
            Self::KeyUp => f.write_str("keyUp"),
            Self::Mouse => f.write_str("mouse"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Shared handle to a listener callback.
///
/// Removal compares handles by identity, so keep the handle you registered.
pub type Listener = Arc<dyn Fn(&KeyEvent) + Send + Sync>;

/// Wrap a closure into a [`Listener`] handle.
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&KeyEvent) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Listeners keyed by event type.
///
/// Cloning shares the registry. Native events may arrive on an SDK thread,
/// so the map sits behind a lock; it is released before any listener runs,
/// which lets a listener add or remove listeners.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    listeners: Arc<Mutex<HashMap<EventType, Vec<Listener>>>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener` to the listeners of `event_type`.
    ///
    /// The same handle may be registered more than once; it is then called
    /// once per registration.
    pub fn add(&self, event_type: impl Into<EventType>, listener: Listener) {
        self.listeners
            .lock()
            .entry(event_type.into())
            .or_default()
            .push(listener);
    }

    /// Remove every registration of `listener` for `event_type`.
    ///
    /// Returns `true` if at least one was removed.
    pub fn remove(&self, event_type: impl Into<EventType>, listener: &Listener) -> bool {
        let mut listeners = self.listeners.lock();
        let Some(registered) = listeners.get_mut(&event_type.into()) else {
            return false;
        };
        let before = registered.len();
        registered.retain(|candidate| !Arc::ptr_eq(candidate, listener));
        registered.len() != before
    }

    /// Remove the listeners of one event type, or of all of them.
    pub fn remove_all(&self, event_type: Option<EventType>) {
        let mut listeners = self.listeners.lock();
        match event_type {
            Some(event_type) => {
                listeners.remove(&event_type);
            }
            None => listeners.clear(),
        }
    }

    /// Number of registrations for `event_type`.
    pub fn listener_count(&self, event_type: impl Into<EventType>) -> usize {
        self.listeners
            .lock()
            .get(&event_type.into())
            .map_or(0, Vec::len)
    }

    /// Deliver one native event.
    ///
    /// Label parts and the full label are both notified, so a label without
    /// `/` (e.g. `"Mouse Btn 8"`) reaches its listeners twice.
    pub fn dispatch(&self, event: &KeyEvent, label: &str) {
        self.notify(
            &if event.key_down {
                EventType::KeyDown
            } else {
                EventType::KeyUp
            },
            event,
        );
        if event.mouse {
            self.notify(&EventType::Mouse, event);
        }
        for part in label.split('/') {
            self.notify(&EventType::from(part), event);
        }
        self.notify(&EventType::from(label), event);
    }

    /// A sink that dispatches into this registry.
    pub fn sink(&self) -> KeySink {
        let registry = self.clone();
        Box::new(move |event, label| registry.dispatch(&event, label))
    }

    fn notify(&self, event_type: &EventType, event: &KeyEvent) {
        let snapshot = match self.listeners.lock().get(event_type) {
            Some(listeners) if !listeners.is_empty() => listeners.clone(),
            _ => return,
        };
        for listener in snapshot {
            listener(event);
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.lock();
        let mut map = f.debug_map();
        for (event_type, registered) in listeners.iter() {
            map.entry(&event_type.to_string(), &registered.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    type Log = Arc<Mutex<Vec<String>>>;

    fn recorder(log: &Log, name: &str) -> Listener {
        let log = Arc::clone(log);
        let name = name.to_string();
        listener(move |_| log.lock().push(name.clone()))
    }

    #[rstest]
    #[case("keyDown", EventType::KeyDown)]
    #[case("keyUp", EventType::KeyUp)]
    #[case("mouse", EventType::Mouse)]
    #[case("G4/M1", EventType::Label("G4/M1".to_string()))]
    #[case("KeyDown", EventType::Label("KeyDown".to_string()))]
    fn test_event_type_from_str(#[case] input: &str, #[case] expected: EventType) {
        assert_eq!(EventType::from(input), expected);
        assert_eq!(EventType::from(input.to_string()), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn test_dispatch_order() {
        let log = Log::default();
        let registry = ListenerRegistry::new();
        for name in ["G4/M1", "M1", "G4", "keyDown", "keyUp", "mouse"] {
            registry.add(name, recorder(&log, name));
        }

        registry.dispatch(&KeyEvent::gkey(4, 1, true), "G4/M1");
        assert_eq!(*log.lock(), vec!["keyDown", "G4", "M1", "G4/M1"]);
    }

    #[test]
    fn test_label_without_slash_notified_as_part_and_label() {
        let log = Log::default();
        let registry = ListenerRegistry::new();
        registry.add("Mouse Btn 8", recorder(&log, "label"));
        registry.add("mouse", recorder(&log, "mouse"));
        registry.add("keyUp", recorder(&log, "up"));

        registry.dispatch(&KeyEvent::mouse_button(8, false), "Mouse Btn 8");
        assert_eq!(*log.lock(), vec!["up", "mouse", "label", "label"]);
    }

    #[test]
    fn test_empty_label_parts_are_notified() {
        let log = Log::default();
        let registry = ListenerRegistry::new();
        registry.add("", recorder(&log, "empty"));

        registry.dispatch(&KeyEvent::gkey(1, 1, true), "");
        assert_eq!(*log.lock(), vec!["empty", "empty"]);

        log.lock().clear();
        registry.dispatch(&KeyEvent::gkey(1, 1, true), "G1/");
        assert_eq!(*log.lock(), vec!["empty"]);
    }

    #[test]
    fn test_registration_order_within_key() {
        let log = Log::default();
        let registry = ListenerRegistry::new();
        registry.add("keyDown", recorder(&log, "first"));
        registry.add("keyDown", recorder(&log, "second"));

        registry.dispatch(&KeyEvent::gkey(1, 1, true), "");
        assert_eq!(*log.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_remove_drops_every_reference() {
        let log = Log::default();
        let registry = ListenerRegistry::new();
        let repeated = recorder(&log, "repeated");
        let other = recorder(&log, "other");
        registry.add("G1", Arc::clone(&repeated));
        registry.add("G1", Arc::clone(&other));
        registry.add("G1", Arc::clone(&repeated));

        assert!(registry.remove("G1", &repeated));
        assert!(!registry.remove("G1", &repeated));
        assert!(!registry.remove("G2", &repeated));
        assert_eq!(registry.listener_count("G1"), 1);
    }

    #[test]
    fn test_remove_all() {
        let log = Log::default();
        let registry = ListenerRegistry::new();
        registry.add("G1", recorder(&log, "a"));
        registry.add("G2", recorder(&log, "b"));

        registry.remove_all(Some(EventType::from("G1")));
        assert_eq!(registry.listener_count("G1"), 0);
        assert_eq!(registry.listener_count("G2"), 1);

        registry.remove_all(None);
        assert_eq!(registry.listener_count("G2"), 0);
    }

    #[test]
    fn test_listener_may_modify_registry() {
        let registry = ListenerRegistry::new();
        let inner = registry.clone();
        registry.add(
            "keyDown",
            listener(move |_| inner.add("keyUp", listener(|_| {}))),
        );

        registry.dispatch(&KeyEvent::gkey(1, 1, true), "G1/M1");
        assert_eq!(registry.listener_count("keyUp"), 1);
    }

    #[test]
    fn test_sink_dispatches() {
        let log = Log::default();
        let registry = ListenerRegistry::new();
        registry.add("M2", recorder(&log, "m2"));

        let sink = registry.sink();
        sink(KeyEvent::gkey(3, 2, true), "G3/M2");
        assert_eq!(*log.lock(), vec!["m2"]);
    }
}
