//! Element types for container tests.

use std::cell::Cell;
use std::rc::Rc;

/// A move-only value: neither `Clone` nor `Copy`.
///
/// `Default` yields zero, so it can be used wherever a container needs to
/// default-construct elements.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonCopyable {
    value: usize,
}

impl NonCopyable {
    pub fn new(value: usize) -> NonCopyable {
        NonCopyable { value }
    }

    pub fn value(&self) -> usize {
        self.value
    }
}

impl From<usize> for NonCopyable {
    fn from(value: usize) -> Self {
        NonCopyable::new(value)
    }
}

/// Counts the live `Tracked` values created through it.
///
/// Every construction and clone increments the count, every drop decrements
/// it. A container that leaks or double-drops shows up as a non-zero (or
/// wrapped) count once all containers are gone.
#[derive(Debug, Clone, Default)]
pub struct DropTracker {
    live: Rc<Cell<isize>>,
    drops: Rc<Cell<usize>>,
}

impl DropTracker {
    pub fn new() -> DropTracker {
        DropTracker::default()
    }

    /// Creates a new tracked value.
    pub fn track<T>(&self, value: T) -> Tracked<T> {
        self.live.set(self.live.get() + 1);
        Tracked {
            value,
            tracker: self.clone(),
        }
    }

    /// Number of tracked values currently alive.
    pub fn live(&self) -> isize {
        self.live.get()
    }

    /// Total number of drops observed so far.
    pub fn drops(&self) -> usize {
        self.drops.get()
    }
}

/// A value whose lifetime is recorded by a [`DropTracker`].
#[derive(Debug)]
pub struct Tracked<T> {
    value: T,
    tracker: DropTracker,
}

impl<T> Tracked<T> {
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Clone> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        self.tracker.track(self.value.clone())
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.tracker.live.set(self.tracker.live.get() - 1);
        self.tracker.drops.set(self.tracker.drops.get() + 1);
    }
}

/// A value whose `clone` panics once a shared budget of successful clones is
/// used up.
#[derive(Debug)]
pub struct PanicOnClone {
    value: u32,
    budget: Rc<Cell<usize>>,
}

impl PanicOnClone {
    /// Creates a value that shares `budget` with all of its clones.
    pub fn new(value: u32, budget: &Rc<Cell<usize>>) -> PanicOnClone {
        PanicOnClone {
            value,
            budget: budget.clone(),
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

impl Clone for PanicOnClone {
    fn clone(&self) -> Self {
        let left = self.budget.get();
        if left == 0 {
            panic!("clone budget exhausted");
        }
        self.budget.set(left - 1);
        PanicOnClone {
            value: self.value,
            budget: self.budget.clone(),
        }
    }
}

impl PartialEq for PanicOnClone {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

thread_local! {
    static DEFAULT_BUDGET: Cell<usize> = const { Cell::new(usize::MAX) };
}

/// A value whose `Default` implementation panics once the thread-local
/// budget set by [`PanicOnDefault::set_budget`] is used up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicOnDefault(pub u32);

impl PanicOnDefault {
    /// Allows `count` more default constructions on the current thread.
    pub fn set_budget(count: usize) {
        DEFAULT_BUDGET.with(|b| b.set(count));
    }

    /// Removes the limit on the current thread.
    pub fn reset_budget() {
        Self::set_budget(usize::MAX);
    }
}

impl Default for PanicOnDefault {
    fn default() -> Self {
        DEFAULT_BUDGET.with(|b| {
            let left = b.get();
            if left == 0 {
                panic!("default budget exhausted");
            }
            b.set(left - 1);
        });
        PanicOnDefault(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_tracker_counts() {
        let tracker = DropTracker::new();
        let a = tracker.track(1);
        let b = a.clone();
        assert_eq!(tracker.live(), 2);
        drop(a);
        assert_eq!(tracker.live(), 1);
        assert_eq!(*b.value(), 1);
        drop(b);
        assert_eq!(tracker.live(), 0);
        assert_eq!(tracker.drops(), 2);
    }

    #[test]
    fn test_panic_on_clone_budget() {
        let budget = Rc::new(Cell::new(1));
        let v = PanicOnClone::new(3, &budget);
        let c = v.clone();
        assert_eq!(c.value(), 3);
        let r = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| v.clone()));
        assert!(r.is_err());
    }

    #[test]
    fn test_panic_on_default_budget() {
        PanicOnDefault::set_budget(1);
        let _ = PanicOnDefault::default();
        let r = std::panic::catch_unwind(PanicOnDefault::default);
        assert!(r.is_err());
        PanicOnDefault::reset_budget();
        let _ = PanicOnDefault::default();
    }
}
