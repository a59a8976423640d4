//! Bounded integer state behind the bar and its value-changed observers.

use log::debug;
use std::fmt;

/// Handle returned when an observer is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(i32)>;

/// Immutable copy of the bounds and value, taken at the start of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSnapshot {
    pub minimum: i32,
    pub maximum: i32,
    pub value: i32,
}

impl Default for ValueSnapshot {
    fn default() -> Self {
        Self {
            minimum: 0,
            maximum: 100,
            value: 0,
        }
    }
}

/// Clamp `value` into `[minimum, maximum]`.
///
/// A value inside the range is kept, one above `maximum` becomes `maximum`
/// and one below `minimum` becomes `minimum`. An inverted range is empty,
/// so every input collapses onto `maximum`.
pub fn clamp_value(value: i32, minimum: i32, maximum: i32) -> i32 {
    if minimum > maximum {
        maximum
    } else if (minimum..=maximum).contains(&value) {
        value
    } else if value > maximum {
        maximum
    } else {
        minimum
    }
}

pub struct BoundedValue {
    state: ValueSnapshot,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl BoundedValue {
    pub fn new(minimum: i32, maximum: i32) -> Self {
        Self {
            state: ValueSnapshot {
                minimum,
                maximum,
                value: clamp_value(0, minimum, maximum),
            },
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn minimum(&self) -> i32 {
        self.state.minimum
    }

    pub fn maximum(&self) -> i32 {
        self.state.maximum
    }

    pub fn value(&self) -> i32 {
        self.state.value
    }

    pub fn snapshot(&self) -> ValueSnapshot {
        self.state
    }

    /// Bounds are replaced as given; the current value is not re-clamped.
    pub fn set_minimum(&mut self, minimum: i32) {
        self.state.minimum = minimum;
    }

    /// Bounds are replaced as given; the current value is not re-clamped.
    pub fn set_maximum(&mut self, maximum: i32) {
        self.state.maximum = maximum;
    }

    /// Store `value` clamped into range, notify every observer with the
    /// stored value and return it.
    pub fn set_value(&mut self, value: i32) -> i32 {
        let stored = clamp_value(value, self.state.minimum, self.state.maximum);
        if stored != value {
            debug!(
                "value {value} clamped to {stored} (range {}..={})",
                self.state.minimum, self.state.maximum
            );
        }
        self.state.value = stored;

        for (_, observer) in &mut self.observers {
            observer(stored);
        }
        stored
    }

    pub fn on_value_changed(&mut self, observer: impl FnMut(i32) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if no observer with this id was registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }
}

impl Default for BoundedValue {
    fn default() -> Self {
        Self::new(0, 100)
    }
}

impl fmt::Debug for BoundedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedValue")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_defaults() {
        let bounded = BoundedValue::default();
        assert_eq!(bounded.snapshot(), ValueSnapshot::default());
    }

    #[test]
    fn test_value_above_maximum_stores_maximum() {
        let mut bounded = BoundedValue::default();
        assert_eq!(bounded.set_value(150), 100);
        assert_eq!(bounded.value(), 100);
    }

    #[test]
    fn test_value_below_minimum_stores_minimum() {
        let mut bounded = BoundedValue::new(10, 20);
        assert_eq!(bounded.set_value(-3), 10);
    }

    #[test]
    fn test_bounds_do_not_reclamp() {
        let mut bounded = BoundedValue::default();
        bounded.set_value(80);
        bounded.set_maximum(50);
        assert_eq!(bounded.value(), 80);
        bounded.set_minimum(90);
        assert_eq!(bounded.value(), 80);
    }

    #[test]
    fn test_inverted_range_collapses_to_maximum() {
        assert_eq!(clamp_value(3, 10, 5), 5);
        assert_eq!(clamp_value(7, 10, 5), 5);
        assert_eq!(clamp_value(42, 10, 5), 5);
    }

    #[test]
    fn test_notification_carries_stored_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut bounded = BoundedValue::default();
        bounded.on_value_changed(move |v| sink.borrow_mut().push(v));

        bounded.set_value(150);
        bounded.set_value(50);
        bounded.set_value(50);
        assert_eq!(*seen.borrow(), vec![100, 50, 50]);
    }

    #[test]
    fn test_removed_observer_is_silent() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let mut bounded = BoundedValue::default();
        let id = bounded.on_value_changed(move |_| *sink.borrow_mut() += 1);

        bounded.set_value(1);
        assert!(bounded.remove_observer(id));
        assert!(!bounded.remove_observer(id));
        bounded.set_value(2);
        assert_eq!(*count.borrow(), 1);
    }

    proptest! {
        #[test]
        fn prop_stored_value_within_range(
            minimum in -1000i32..1000,
            span in 0i32..2000,
            value in any::<i32>(),
        ) {
            let maximum = minimum + span;
            let stored = clamp_value(value, minimum, maximum);
            prop_assert!(minimum <= stored && stored <= maximum);
            if (minimum..=maximum).contains(&value) {
                prop_assert_eq!(stored, value);
            } else if value > maximum {
                prop_assert_eq!(stored, maximum);
            } else {
                prop_assert_eq!(stored, minimum);
            }
        }
    }
}
