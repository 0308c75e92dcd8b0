//! Snapshot-based linear undo/redo. The store is generic over the state it
//! holds and knows nothing about graphs: past and future are disjoint stacks
//! around at most one present value.

#[derive(Debug, Clone)]
pub struct History<T: Clone + PartialEq> {
    past: Vec<T>,
    present: Option<T>,
    future: Vec<T>,
}

impl<T: Clone + PartialEq> Default for History<T> {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            present: None,
            future: Vec::new(),
        }
    }
}

impl<T: Clone + PartialEq> History<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the whole store around `value`. Call once at load; calling it
    /// after edits began would silently erase the user's history.
    pub fn set_initial(&mut self, value: T) {
        self.past.clear();
        self.future.clear();
        self.present = Some(value);
    }

    /// Installs a new present. A snapshot structurally equal to the current
    /// present is a no-op, so repeated non-edits never churn the stacks. Any
    /// fresh edit discards the redo branch.
    pub fn snapshot(&mut self, next: T) {
        match self.present.take() {
            Some(current) if current == next => {
                self.present = Some(current);
            }
            Some(current) => {
                self.past.push(current);
                self.present = Some(next);
                self.future.clear();
            }
            None => {
                self.present = Some(next);
                self.future.clear();
            }
        }
    }

    /// Steps back one snapshot. Returns the new present, or `None` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Option<&T> {
        let previous = self.past.pop()?;
        if let Some(current) = self.present.replace(previous) {
            self.future.push(current);
        }
        self.present.as_ref()
    }

    /// Symmetric inverse of [`undo`](Self::undo).
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.future.pop()?;
        if let Some(current) = self.present.replace(next) {
            self.past.push(current);
        }
        self.present.as_ref()
    }

    pub fn present(&self) -> Option<&T> {
        self.present.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[cfg(test)]
    fn past(&self) -> &[T] {
        &self.past
    }
}
