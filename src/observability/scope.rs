//! ObservationScope for automatic begin/complete logging
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` or `{name}_FAILED` when finished
//! - Logs `{name}_INCOMPLETE` when dropped unfinished

use std::cell::Cell;

use super::logger::Logger;

/// A scope that logs the lifecycle of one unit of work
///
/// Fields given at creation are repeated on every line the scope emits.
///
/// ```ignore
/// let scope = ObservationScope::with_fields("CREATE_TASKS", &[("job_id", id)]);
/// // ... do work ...
/// scope.complete_with_fields(&[("tasks", "2")]);
/// ```
pub struct ObservationScope {
    name: &'static str,
    completed: Cell<bool>,
    fields: Vec<(String, String)>,
}

impl ObservationScope {
    /// Logs `{name}_BEGIN` immediately
    pub fn new(name: &'static str) -> Self {
        Self::with_fields(name, &[])
    }

    pub fn with_fields(name: &'static str, fields: &[(&str, &str)]) -> Self {
        let scope = Self {
            name,
            completed: Cell::new(false),
            fields: fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        };
        Logger::info(&format!("{}_BEGIN", name), &scope.field_refs(&[]));
        scope
    }

    /// Logs `{name}_COMPLETE` at INFO level
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    pub fn complete_with_fields(self, extra_fields: &[(&str, &str)]) {
        self.completed.set(true);
        Logger::info(
            &format!("{}_COMPLETE", self.name),
            &self.field_refs(extra_fields),
        );
    }

    /// Logs `{name}_FAILED` at ERROR level
    pub fn fail(self, reason: &str) {
        self.completed.set(true);
        Logger::error(
            &format!("{}_FAILED", self.name),
            &self.field_refs(&[("reason", reason)]),
        );
    }

    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }

    fn field_refs<'a>(&'a self, extra: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain(extra.iter().copied())
            .collect()
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.completed.get() {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &self.field_refs(&[("reason", "scope dropped without completion")]),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_starts_incomplete() {
        let scope = ObservationScope::new("TEST");
        assert!(!scope.is_completed());
        scope.complete();
    }

    #[test]
    fn test_scope_with_fields() {
        let scope = ObservationScope::with_fields("TEST", &[("job_id", "abc")]);
        assert_eq!(scope.field_refs(&[("x", "y")]), vec![("job_id", "abc"), ("x", "y")]);
        scope.complete_with_fields(&[("tasks", "2")]);
    }

    #[test]
    fn test_scope_fail() {
        let scope = ObservationScope::new("TEST");
        scope.fail("something went wrong");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let scope = ObservationScope::new("TEST");
        drop(scope);
    }
}
