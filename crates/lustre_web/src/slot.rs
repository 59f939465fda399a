//! Page-lifetime runtime slot.
//!
//! Utilities may run before the page calls `start`, so the runtime is created
//! on demand. Starting later rebuilds it from the one already in the slot,
//! letting the new runtime keep the old hosts (and any animation frames they
//! have in flight) while taking the parsed configuration.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Holds at most one runtime and remembers whether the page started it.
pub struct Slot<T> {
    value: RefCell<Option<Rc<T>>>,
    started: Cell<bool>,
}

impl<T> Slot<T> {
    /// Creates an empty, unstarted slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: RefCell::new(None),
            started: Cell::new(false),
        }
    }

    /// Returns the current value, creating it with `init` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns whatever `init` fails with; the slot stays empty.
    pub fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<Rc<T>, E> {
        if let Some(value) = self.value.borrow().as_ref() {
            return Ok(Rc::clone(value));
        }
        let value = Rc::new(init()?);
        *self.value.borrow_mut() = Some(Rc::clone(&value));
        Ok(value)
    }

    /// Marks the slot started and replaces its value with `build(previous)`.
    ///
    /// Returns `None` if the slot was already started. A failed build leaves
    /// the previous value in place.
    pub fn start<E>(&self, build: impl FnOnce(Option<&T>) -> Result<T, E>) -> Option<Result<Rc<T>, E>> {
        if self.started.replace(true) {
            return None;
        }
        let previous = self.value.borrow().clone();
        let built = build(previous.as_deref()).map(|value| {
            let value = Rc::new(value);
            *self.value.borrow_mut() = Some(Rc::clone(&value));
            value
        });
        Some(built)
    }

    /// Returns true once [`Slot::start`] has run.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started.get()
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stands in for a runtime: a shared host plus a config value.
    struct Runtime {
        host: Rc<Cell<u32>>,
        level: &'static str,
    }

    fn fresh(level: &'static str) -> Result<Runtime, ()> {
        Ok(Runtime {
            host: Rc::new(Cell::new(0)),
            level,
        })
    }

    #[test]
    fn test_on_demand_value_is_reused() {
        let slot = Slot::new();
        let first = slot.get_or_try_init(|| fresh("warn")).unwrap();
        let second = slot.get_or_try_init(|| fresh("debug")).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert!(!slot.is_started());
    }

    #[test]
    fn test_start_keeps_hosts_of_on_demand_runtime() {
        let slot = Slot::new();
        let early = slot.get_or_try_init(|| fresh("warn")).unwrap();
        // Work in flight on the early runtime's host
        early.host.set(3);
        let host = Rc::clone(&early.host);
        drop(early);

        let started = slot
            .start(|previous| {
                Ok::<_, ()>(match previous {
                    Some(previous) => Runtime {
                        host: Rc::clone(&previous.host),
                        level: "debug",
                    },
                    None => fresh("debug")?,
                })
            })
            .unwrap()
            .unwrap();

        assert!(Rc::ptr_eq(&started.host, &host));
        assert_eq!(started.host.get(), 3);
        assert_eq!(started.level, "debug");

        let current = slot.get_or_try_init(|| fresh("trace")).unwrap();
        assert!(Rc::ptr_eq(&current, &started));
    }

    #[test]
    fn test_start_runs_once() {
        let slot = Slot::new();
        assert!(slot.start(|_| fresh("warn")).is_some());
        assert!(slot.start(|_| fresh("debug")).is_none());
        assert_eq!(slot.get_or_try_init(|| fresh("trace")).unwrap().level, "warn");
    }

    #[test]
    fn test_failed_start_keeps_previous() {
        let slot = Slot::new();
        let early = slot.get_or_try_init(|| fresh("warn")).unwrap();
        let failed = slot.start(|_| Err::<Runtime, _>("no window")).unwrap();
        assert!(failed.is_err());
        let current = slot.get_or_try_init(|| fresh("debug")).unwrap();
        assert!(Rc::ptr_eq(&current, &early));
    }
}
