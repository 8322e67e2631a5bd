//! View-state container.
//!
//! # Design
//! Three named values (`users`, `error`, `loading`) with a setter each, plus
//! `update`, a functional transition that edits any of them and counts as a
//! single write. `update` is the main write path: a handler or a completion
//! usually touches more than one value and must still cost one write. The
//! setters cover the single-value case, such as raising `loading` on mount. Every write bumps `revision`, a monotonic version the host
//! compares to decide whether to re-render. Fields are private so nothing
//! mutates the state without going through a write.

use crate::types::User;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    users: Vec<User>,
    error: String,
    loading: bool,
    revision: u64,
}

/// Mutable view of the state handed to an `update` transition.
#[derive(Debug)]
pub struct Draft<'a> {
    pub users: &'a mut Vec<User>,
    pub error: &'a mut String,
    pub loading: &'a mut bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Number of writes so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = users;
        self.revision += 1;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = error.into();
        self.revision += 1;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.revision += 1;
    }

    /// Apply `f` to the current state as one write. Prefer this over a run of
    /// setters whenever a change spans several values.
    pub fn update<R>(&mut self, f: impl FnOnce(Draft<'_>) -> R) -> R {
        let out = f(Draft {
            users: &mut self.users,
            error: &mut self.error,
            loading: &mut self.loading,
        });
        self.revision += 1;
        out
    }
}
