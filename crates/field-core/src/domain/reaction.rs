//! Change observers
//!
//! A [`Reaction`] remembers the last observed value of a derived quantity and
//! reports whether a new observation differs. Fields hold one per observed
//! quantity and run them when the container settles a batch.

/// Last-seen tracker for one derived value.
#[derive(Debug, Clone)]
pub struct Reaction<T> {
    last: T,
    disposed: bool,
}

impl<T: PartialEq> Reaction<T> {
    /// Start observing from `initial`; the first observation of the same value
    /// does not count as a change.
    pub fn new(initial: T) -> Self {
        Self {
            last: initial,
            disposed: false,
        }
    }

    /// Record `current`; true when it differs from the previous observation.
    ///
    /// A disposed reaction never reports a change.
    pub fn track(&mut self, current: T) -> bool {
        if self.disposed || current == self.last {
            return false;
        }
        self.last = current;
        true
    }

    /// Stop reporting changes.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
