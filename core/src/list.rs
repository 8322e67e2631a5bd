//! The user list component: initial load, optimistic mutations, rollback.
//!
//! # Design
//! Every handler writes the view state first and then returns a `Dispatch`,
//! the request the host must execute, tagged with an `OpId`. The host feeds
//! the outcome back through `complete`. Each pending operation remembers how
//! to undo its own change, and undo is applied to the *current* collection,
//! so a late failure never clobbers what other operations did in the
//! meantime. Add confirmation likewise swaps the provisional row in place.
//!
//! Two pieces of bookkeeping make that hold when failures overlap. `layout`
//! is the row order including rows whose delete is still in flight, so a
//! failed delete goes back between the same neighbours it left. `names`
//! keeps, per row, the last confirmed name and the pending renames in
//! dispatch order, so a failed rename falls back to whatever is still
//! standing rather than to the name it overwrote. A confirmed rename
//! supersedes the renames sent before it.
//!
//! `unmount` forgets every pending operation. Completions that arrive for a
//! forgotten operation are ignored, so nothing writes to the state after
//! teardown.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use tracing::{debug, trace, warn};

use crate::client::UsersClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::render::{render, Action, Node};
use crate::state::ViewState;
use crate::types::{ProvisionalIds, User, UserId};

/// Name given to users created from the Add button.
pub const DEFAULT_NEW_NAME: &str = "Saif";

/// Name written by the Update button.
pub const DEFAULT_UPDATED_NAME: &str = "Saif Maknojia!";

/// Identifies one in-flight request of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpId(u64);

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op#{}", self.0)
    }
}

/// A request the host must execute, and the operation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub op: OpId,
    pub request: HttpRequest,
}

/// What `complete` did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The server accepted the operation.
    Confirmed,
    /// The server rejected a mutation and the local change was undone.
    RolledBack,
    /// The initial load failed and the error was recorded.
    Failed,
    /// The operation was unknown, already finished, or cancelled.
    Ignored,
}

#[derive(Debug)]
enum Pending {
    Load,
    Add { provisional: UserId },
    Update { id: UserId },
    Delete { removed: User },
}

/// Renames of one row that the server has not answered yet.
#[derive(Debug)]
struct Renames {
    confirmed: String,
    pending: Vec<(OpId, String)>,
}

impl Renames {
    fn shown(&self) -> &str {
        self.pending
            .last()
            .map_or(self.confirmed.as_str(), |(_, name)| name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Fresh,
    Mounted,
    Unmounted,
}

#[derive(Debug)]
pub struct UserList {
    client: UsersClient,
    state: ViewState,
    ids: ProvisionalIds,
    pending: BTreeMap<OpId, Pending>,
    layout: Vec<UserId>,
    names: HashMap<UserId, Renames>,
    next_op: u64,
    lifecycle: Lifecycle,
}

impl UserList {
    pub fn new(client: UsersClient) -> Self {
        Self {
            client,
            state: ViewState::new(),
            ids: ProvisionalIds::default(),
            pending: BTreeMap::new(),
            layout: Vec::new(),
            names: HashMap::new(),
            next_op: 0,
            lifecycle: Lifecycle::Fresh,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn render(&self) -> Node {
        render(&self.state)
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    pub fn is_pending(&self, op: OpId) -> bool {
        self.pending.contains_key(&op)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Start the initial load. Only the first call does anything.
    pub fn mount(&mut self) -> Option<Dispatch> {
        if self.lifecycle != Lifecycle::Fresh {
            return None;
        }
        self.lifecycle = Lifecycle::Mounted;
        self.state.set_loading(true);
        let request = self.client.build_list_users();
        let op = self.register(Pending::Load);
        debug!(%op, "loading users");
        Some(Dispatch { op, request })
    }

    /// Drop every pending operation and stop accepting input. Returns the
    /// operations the host should abort.
    pub fn unmount(&mut self) -> Vec<OpId> {
        self.lifecycle = Lifecycle::Unmounted;
        let cancelled: Vec<OpId> = std::mem::take(&mut self.pending).into_keys().collect();
        debug!(cancelled = cancelled.len(), "unmounted");
        cancelled
    }

    /// Route a button press to its handler with the button's fixed values.
    pub fn dispatch(&mut self, action: Action) -> Result<Option<Dispatch>, ApiError> {
        match action {
            Action::Add => self.add_user(DEFAULT_NEW_NAME),
            Action::Update(id) => self.update_user(id, DEFAULT_UPDATED_NAME),
            Action::Delete(id) => Ok(self.delete_user(id)),
        }
    }

    /// Prepend a provisional user and ask the server to create it.
    pub fn add_user(&mut self, name: &str) -> Result<Option<Dispatch>, ApiError> {
        if !self.is_mounted() {
            return Ok(None);
        }
        let user = User::new(self.ids.next(), name);
        let request = self.client.build_create_user(&user)?;
        let provisional = user.id;
        self.state.update(|d| d.users.insert(0, user));
        self.layout.insert(0, provisional);
        let op = self.register(Pending::Add { provisional });
        debug!(%op, provisional, "optimistic add");
        Ok(Some(Dispatch { op, request }))
    }

    /// Rename a confirmed user locally and ask the server to do the same.
    /// Unknown and provisional users are left alone.
    pub fn update_user(&mut self, id: UserId, name: &str) -> Result<Option<Dispatch>, ApiError> {
        let Some(index) = self.editable(id) else {
            return Ok(None);
        };
        let updated = User::new(id, name);
        let request = self.client.build_update_user(&updated)?;
        let previous = self.state.update(|d| std::mem::replace(&mut d.users[index], updated));
        let op = self.register(Pending::Update { id });
        self.names
            .entry(id)
            .or_insert_with(|| Renames {
                confirmed: previous.name,
                pending: Vec::new(),
            })
            .pending
            .push((op, name.to_string()));
        debug!(%op, id, "optimistic update");
        Ok(Some(Dispatch { op, request }))
    }

    /// Remove a confirmed user locally and ask the server to do the same.
    /// Unknown and provisional users are left alone.
    pub fn delete_user(&mut self, id: UserId) -> Option<Dispatch> {
        let index = self.editable(id)?;
        let request = self.client.build_delete_user(id);
        let removed = self.state.update(|d| d.users.remove(index));
        let op = self.register(Pending::Delete { removed });
        debug!(%op, id, "optimistic delete");
        Some(Dispatch { op, request })
    }

    /// Apply the outcome of a dispatched request.
    pub fn complete(&mut self, op: OpId, outcome: Result<HttpResponse, ApiError>) -> Completion {
        let Some(pending) = self.pending.remove(&op) else {
            trace!(%op, "completion for unknown or cancelled operation");
            return Completion::Ignored;
        };

        match pending {
            Pending::Load => match outcome.and_then(|r| self.client.parse_list_users(r)) {
                Ok(users) => {
                    debug!(%op, count = users.len(), "users loaded");
                    self.layout = users.iter().map(|u| u.id).collect();
                    self.names.clear();
                    self.state.update(|d| {
                        *d.users = users;
                        *d.loading = false;
                    });
                    Completion::Confirmed
                }
                Err(e) if e.is_cancelled() => {
                    trace!(%op, "load cancelled");
                    Completion::Ignored
                }
                Err(e) => {
                    warn!(%op, error = %e, "load failed");
                    self.state.update(|d| {
                        *d.error = e.to_string();
                        *d.loading = false;
                    });
                    Completion::Failed
                }
            },

            Pending::Add { provisional } => {
                match outcome.and_then(|r| self.client.parse_create_user(r)) {
                    Ok(user) => {
                        debug!(%op, provisional, id = user.id, "add confirmed");
                        match self.layout.iter_mut().find(|id| **id == provisional) {
                            Some(slot) => *slot = user.id,
                            None => self.layout.insert(0, user.id),
                        }
                        self.state.update(|d| {
                            match d.users.iter().position(|u| u.id == provisional) {
                                Some(index) => d.users[index] = user,
                                None => d.users.insert(0, user),
                            }
                        });
                        Completion::Confirmed
                    }
                    Err(e) => {
                        warn!(%op, provisional, error = %e, "add rolled back");
                        self.layout.retain(|id| *id != provisional);
                        self.roll_back(&e, |users| users.retain(|u| u.id != provisional));
                        Completion::RolledBack
                    }
                }
            }

            Pending::Update { id } => {
                match outcome.and_then(|r| self.client.parse_update_user(r)) {
                    Ok(_) => {
                        debug!(%op, id, "update confirmed");
                        self.settle_rename(id, op, true);
                        Completion::Confirmed
                    }
                    Err(e) => {
                        warn!(%op, id, error = %e, "update rolled back");
                        let standing = self.settle_rename(id, op, false);
                        if let Some(name) = &standing {
                            self.rename_hidden(id, name);
                        }
                        self.roll_back(&e, |users| {
                            let current = users.iter_mut().find(|u| u.id == id);
                            if let (Some(current), Some(name)) = (current, standing) {
                                current.name = name;
                            }
                        });
                        Completion::RolledBack
                    }
                }
            }

            Pending::Delete { removed } => {
                match outcome.and_then(|r| self.client.parse_delete_user(r)) {
                    Ok(()) => {
                        debug!(%op, id = removed.id, "delete confirmed");
                        self.layout.retain(|id| *id != removed.id);
                        Completion::Confirmed
                    }
                    Err(e) => {
                        warn!(%op, id = removed.id, error = %e, "delete rolled back");
                        let at = self.restore_position(removed.id);
                        self.roll_back(&e, |users| {
                            if !users.iter().any(|u| u.id == removed.id) {
                                let at = at.min(users.len());
                                users.insert(at, removed);
                            }
                        });
                        Completion::RolledBack
                    }
                }
            }
        }
    }

    /// Undo a mutation and record why, as one write. Cancellation undoes
    /// without an error message.
    fn roll_back(&mut self, error: &ApiError, undo: impl FnOnce(&mut Vec<User>)) {
        let message = (!error.is_cancelled()).then(|| error.to_string());
        self.state.update(|d| {
            undo(d.users);
            if let Some(message) = message {
                *d.error = message;
            }
        });
    }

    /// Retire one pending rename of `id`. A confirmed rename becomes the
    /// row's confirmed name and supersedes the renames sent before it.
    /// Returns the name the row should show once a failed rename is gone.
    fn settle_rename(&mut self, id: UserId, op: OpId, confirmed: bool) -> Option<String> {
        let renames = self.names.get_mut(&id)?;
        let position = renames.pending.iter().position(|(pending, _)| *pending == op)?;
        if confirmed {
            let (_, name) = renames.pending.remove(position);
            renames.confirmed = name;
            renames.pending.drain(..position);
        } else {
            renames.pending.remove(position);
        }
        let standing = renames.shown().to_string();
        if renames.pending.is_empty() {
            self.names.remove(&id);
        }
        Some(standing)
    }

    /// Keep a row hidden by an in-flight delete in step with its renames, so
    /// a failed delete brings back the name that is still standing.
    fn rename_hidden(&mut self, id: UserId, name: &str) {
        for pending in self.pending.values_mut() {
            if let Pending::Delete { removed } = pending {
                if removed.id == id {
                    removed.name = name.to_string();
                }
            }
        }
    }

    /// Where a row with a failed delete goes back: after every row that
    /// preceded it in `layout` and is visible now.
    fn restore_position(&self, id: UserId) -> usize {
        let visible: HashSet<UserId> = self.state.users().iter().map(|u| u.id).collect();
        match self.layout.iter().position(|other| *other == id) {
            Some(slot) => self.layout[..slot]
                .iter()
                .filter(|other| visible.contains(other))
                .count(),
            None => 0,
        }
    }

    /// Index of a user that may be updated or deleted right now.
    fn editable(&self, id: UserId) -> Option<usize> {
        if !self.is_mounted() {
            return None;
        }
        let index = self.state.users().iter().position(|u| u.id == id);
        match index {
            Some(index) if !self.state.users()[index].is_provisional() => Some(index),
            Some(_) => {
                debug!(id, "user is still provisional");
                None
            }
            None => {
                debug!(id, "no such user");
                None
            }
        }
    }

    fn register(&mut self, pending: Pending) -> OpId {
        self.next_op += 1;
        let op = OpId(self.next_op);
        self.pending.insert(op, pending);
        op
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "http://localhost:3000";

    fn ok(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse::new(status, body))
    }

    fn network_error() -> Result<HttpResponse, ApiError> {
        Err(ApiError::Transport("Network Error".to_string()))
    }

    fn users_json(users: &[User]) -> String {
        serde_json::to_string(users).unwrap()
    }

    fn mounted_with(users: &[User]) -> UserList {
        let mut list = UserList::new(UsersClient::new(BASE_URL));
        let load = list.mount().unwrap();
        let done = list.complete(load.op, ok(200, &users_json(users)));
        assert_eq!(done, Completion::Confirmed);
        list
    }

    fn alice_bob() -> Vec<User> {
        vec![User::new(1, "Alice"), User::new(2, "Bob")]
    }

    // --- initial load ---

    #[test]
    fn mount_sets_loading_and_requests_users() {
        let mut list = UserList::new(UsersClient::new(BASE_URL));
        let load = list.mount().unwrap();
        assert_eq!(load.request.path, "http://localhost:3000/users");
        assert!(list.state().loading());
        assert!(list.mount().is_none(), "effect runs once");
    }

    #[test]
    fn initial_load_shows_one_row() {
        let list = mounted_with(&[User::new(1, "Alice")]);
        assert_eq!(list.state().users(), &[User::new(1, "Alice")]);
        assert!(!list.state().loading());
        let tree = list.render();
        assert_eq!(tree.find_all("li").len(), 1);
        assert!(tree.text().contains("Alice"));
    }

    #[test]
    fn failed_load_records_error_and_stops_loading() {
        let mut list = UserList::new(UsersClient::new(BASE_URL));
        let load = list.mount().unwrap();
        let done = list.complete(load.op, ok(500, "oops"));
        assert_eq!(done, Completion::Failed);
        assert_eq!(list.state().error(), "Request failed with status code 500");
        assert!(!list.state().loading());
    }

    #[test]
    fn cancelled_load_writes_nothing() {
        let mut list = UserList::new(UsersClient::new(BASE_URL));
        let load = list.mount().unwrap();
        let before = list.state().clone();
        let done = list.complete(load.op, Err(ApiError::Cancelled));
        assert_eq!(done, Completion::Ignored);
        assert_eq!(list.state(), &before);
    }

    #[test]
    fn unmount_during_load_suppresses_late_response() {
        let mut list = UserList::new(UsersClient::new(BASE_URL));
        let load = list.mount().unwrap();
        assert_eq!(list.unmount(), vec![load.op]);
        let before = list.state().clone();

        let done = list.complete(load.op, ok(200, r#"[{"id":1,"name":"Alice"}]"#));
        assert_eq!(done, Completion::Ignored);
        assert_eq!(list.state(), &before);
        assert_eq!(list.state().error(), "");
    }

    // --- add ---

    #[test]
    fn add_prepends_provisional_user() {
        let mut list = mounted_with(&alice_bob());
        let add = list.add_user("Saif").unwrap().unwrap();
        let first = &list.state().users()[0];
        assert!(first.is_provisional());
        assert_eq!(first.name, "Saif");
        assert_eq!(list.state().users().len(), 3);

        let body: User = serde_json::from_str(add.request.body.as_deref().unwrap()).unwrap();
        assert_eq!(&body, first);
    }

    #[test]
    fn add_success_replaces_provisional_id() {
        let mut list = mounted_with(&alice_bob());
        let add = list.dispatch(Action::Add).unwrap().unwrap();
        let done = list.complete(add.op, ok(201, r#"{"id":42,"name":"Saif"}"#));
        assert_eq!(done, Completion::Confirmed);
        assert_eq!(list.state().users()[0], User::new(42, "Saif"));
        assert_eq!(list.state().users().len(), 3);
        assert!(list.state().users().iter().all(|u| !u.is_provisional()));
    }

    #[test]
    fn failed_add_restores_snapshot() {
        let mut list = mounted_with(&alice_bob());
        let snapshot = list.state().users().to_vec();
        let add = list.dispatch(Action::Add).unwrap().unwrap();
        let done = list.complete(add.op, network_error());
        assert_eq!(done, Completion::RolledBack);
        assert_eq!(list.state().users(), snapshot.as_slice());
        assert_eq!(list.state().error(), "Network Error");
    }

    #[test]
    fn add_success_keeps_deletes_that_finished_meanwhile() {
        let mut list = mounted_with(&alice_bob());
        let add = list.dispatch(Action::Add).unwrap().unwrap();
        let delete = list.delete_user(1).unwrap();
        assert_eq!(list.complete(delete.op, ok(204, "")), Completion::Confirmed);
        assert_eq!(
            list.complete(add.op, ok(201, r#"{"id":42,"name":"Saif"}"#)),
            Completion::Confirmed
        );
        assert_eq!(
            list.state().users(),
            &[User::new(42, "Saif"), User::new(2, "Bob")]
        );
    }

    // --- update ---

    #[test]
    fn update_renames_immediately_and_stands_on_success() {
        let mut list = mounted_with(&alice_bob());
        let update = list.dispatch(Action::Update(2)).unwrap().unwrap();
        assert_eq!(update.request.path, "http://localhost:3000/users/2");
        assert_eq!(list.state().users()[1].name, DEFAULT_UPDATED_NAME);

        let revision = list.state().revision();
        let done = list.complete(update.op, ok(200, r#"{"id":2,"name":"whatever"}"#));
        assert_eq!(done, Completion::Confirmed);
        assert_eq!(list.state().users()[1].name, DEFAULT_UPDATED_NAME);
        assert_eq!(list.state().revision(), revision, "no write on success");
    }

    #[test]
    fn failed_update_restores_previous_fields() {
        let mut list = mounted_with(&alice_bob());
        let update = list.dispatch(Action::Update(1)).unwrap().unwrap();
        let done = list.complete(update.op, ok(404, ""));
        assert_eq!(done, Completion::RolledBack);
        assert_eq!(list.state().users(), alice_bob().as_slice());
        assert_eq!(list.state().error(), "Request failed with status code 404");
    }

    #[test]
    fn failed_update_does_not_undo_a_later_rename() {
        let mut list = mounted_with(&alice_bob());
        let first = list.update_user(1, "Al").unwrap().unwrap();
        let second = list.update_user(1, "Ali").unwrap().unwrap();
        list.complete(first.op, network_error());
        assert_eq!(list.state().users()[0].name, "Ali");
        assert_eq!(list.complete(second.op, ok(200, r#"{"id":1,"name":"Ali"}"#)), Completion::Confirmed);
    }

    #[test]
    fn repeated_update_button_keeps_the_confirmed_press() {
        let mut list = mounted_with(&alice_bob());
        let first = list.dispatch(Action::Update(1)).unwrap().unwrap();
        let second = list.dispatch(Action::Update(1)).unwrap().unwrap();

        assert_eq!(list.complete(first.op, network_error()), Completion::RolledBack);
        assert_eq!(list.state().users()[0].name, DEFAULT_UPDATED_NAME);
        assert_eq!(list.state().error(), "Network Error");

        let done = list.complete(second.op, ok(200, r#"{"id":1,"name":"Saif Maknojia!"}"#));
        assert_eq!(done, Completion::Confirmed);
        assert_eq!(list.state().users()[0].name, DEFAULT_UPDATED_NAME);
    }

    #[test]
    fn later_rename_failing_falls_back_to_the_earlier_one() {
        let mut list = mounted_with(&alice_bob());
        let first = list.update_user(1, "Al").unwrap().unwrap();
        let second = list.update_user(1, "Ali").unwrap().unwrap();

        list.complete(second.op, network_error());
        assert_eq!(list.state().users()[0].name, "Al");
        list.complete(first.op, network_error());
        assert_eq!(list.state().users(), alice_bob().as_slice());
    }

    #[test]
    fn confirmed_rename_outlives_an_earlier_failure() {
        let mut list = mounted_with(&alice_bob());
        let first = list.update_user(1, "Al").unwrap().unwrap();
        let second = list.update_user(1, "Ali").unwrap().unwrap();

        list.complete(second.op, ok(200, r#"{"id":1,"name":"Ali"}"#));
        list.complete(first.op, network_error());
        assert_eq!(list.state().users()[0].name, "Ali");
    }

    #[test]
    fn unknown_and_provisional_users_are_not_editable() {
        let mut list = mounted_with(&alice_bob());
        assert!(list.update_user(99, "x").unwrap().is_none());
        assert!(list.delete_user(99).is_none());

        list.dispatch(Action::Add).unwrap().unwrap();
        let provisional = list.state().users()[0].id;
        assert!(list.update_user(provisional, "x").unwrap().is_none());
        assert!(list.delete_user(provisional).is_none());
    }

    // --- delete ---

    #[test]
    fn successful_delete_removes_row_without_error() {
        let mut list = mounted_with(&alice_bob());
        let delete = list.dispatch(Action::Delete(1)).unwrap().unwrap();
        assert_eq!(list.complete(delete.op, ok(204, "")), Completion::Confirmed);
        assert!(list.state().users().iter().all(|u| u.id != 1));
        assert_eq!(list.state().error(), "");
    }

    #[test]
    fn failed_delete_restores_snapshot_and_shows_error() {
        let mut list = mounted_with(&alice_bob());
        let snapshot = list.state().users().to_vec();
        let delete = list.delete_user(1).unwrap();
        assert_eq!(list.state().users(), &[User::new(2, "Bob")]);

        let done = list.complete(delete.op, network_error());
        assert_eq!(done, Completion::RolledBack);
        assert_eq!(list.state().users(), snapshot.as_slice());
        assert_eq!(list.state().error(), "Network Error");
        assert!(list.render().text().contains("Network Error"));
    }

    #[test]
    fn cancelled_delete_rolls_back_silently() {
        let mut list = mounted_with(&alice_bob());
        let delete = list.delete_user(2).unwrap();
        list.complete(delete.op, Err(ApiError::Cancelled));
        assert_eq!(list.state().users(), alice_bob().as_slice());
        assert_eq!(list.state().error(), "");
    }

    #[test]
    fn overlapping_failed_deletes_restore_original_order() {
        let mut list = mounted_with(&alice_bob());
        let snapshot = list.state().users().to_vec();
        let first = list.delete_user(1).unwrap();
        let second = list.delete_user(2).unwrap();
        assert!(list.state().users().is_empty());

        list.complete(first.op, network_error());
        list.complete(second.op, network_error());
        assert_eq!(list.state().users(), snapshot.as_slice());
    }

    #[test]
    fn overlapping_failed_deletes_in_reverse_order() {
        let users = vec![User::new(1, "Alice"), User::new(2, "Bob"), User::new(3, "Carol")];
        let mut list = mounted_with(&users);
        let first = list.delete_user(1).unwrap();
        let second = list.delete_user(3).unwrap();
        let third = list.delete_user(2).unwrap();

        list.complete(third.op, network_error());
        assert_eq!(list.state().users(), &[User::new(2, "Bob")]);
        list.complete(second.op, network_error());
        list.complete(first.op, network_error());
        assert_eq!(list.state().users(), users.as_slice());
    }

    #[test]
    fn failed_add_and_failed_delete_restore_original_order() {
        let mut list = mounted_with(&alice_bob());
        let snapshot = list.state().users().to_vec();
        let add = list.dispatch(Action::Add).unwrap().unwrap();
        let delete = list.delete_user(1).unwrap();

        list.complete(add.op, network_error());
        list.complete(delete.op, network_error());
        assert_eq!(list.state().users(), snapshot.as_slice());
    }

    #[test]
    fn failed_delete_goes_back_below_a_confirmed_add() {
        let mut list = mounted_with(&alice_bob());
        let add = list.dispatch(Action::Add).unwrap().unwrap();
        let delete = list.delete_user(2).unwrap();

        list.complete(add.op, ok(201, r#"{"id":42,"name":"Saif"}"#));
        list.complete(delete.op, network_error());
        assert_eq!(
            list.state().users(),
            &[User::new(42, "Saif"), User::new(1, "Alice"), User::new(2, "Bob")]
        );
    }

    #[test]
    fn failed_delete_brings_back_the_standing_name() {
        let mut list = mounted_with(&alice_bob());
        let update = list.update_user(1, "Al").unwrap().unwrap();
        let delete = list.delete_user(1).unwrap();

        list.complete(update.op, network_error());
        list.complete(delete.op, network_error());
        assert_eq!(list.state().users(), alice_bob().as_slice());
    }

    // --- write accounting and lifecycle ---

    #[test]
    fn each_mutation_is_one_write_and_each_completion_at_most_one() {
        let mut list = mounted_with(&alice_bob());
        let start = list.state().revision();

        let delete = list.delete_user(1).unwrap();
        assert_eq!(list.state().revision(), start + 1);
        list.complete(delete.op, network_error());
        assert_eq!(list.state().revision(), start + 2);

        let add = list.add_user("Saif").unwrap().unwrap();
        assert_eq!(list.state().revision(), start + 3);
        list.complete(add.op, ok(201, r#"{"id":7,"name":"Saif"}"#));
        assert_eq!(list.state().revision(), start + 4);
    }

    #[test]
    fn errors_are_not_cleared_by_later_success() {
        let mut list = mounted_with(&alice_bob());
        let delete = list.delete_user(1).unwrap();
        list.complete(delete.op, network_error());
        let delete = list.delete_user(2).unwrap();
        list.complete(delete.op, ok(204, ""));
        assert_eq!(list.state().error(), "Network Error");
    }

    #[test]
    fn handlers_do_nothing_after_unmount() {
        let mut list = mounted_with(&alice_bob());
        let delete = list.delete_user(1).unwrap();
        assert_eq!(list.unmount(), vec![delete.op]);
        let before = list.state().clone();

        assert!(list.dispatch(Action::Add).unwrap().is_none());
        assert!(list.dispatch(Action::Delete(2)).unwrap().is_none());
        assert_eq!(list.complete(delete.op, network_error()), Completion::Ignored);
        assert_eq!(list.state(), &before);
        assert_eq!(list.pending_count(), 0);
    }

    #[test]
    fn completing_twice_is_ignored() {
        let mut list = mounted_with(&alice_bob());
        let delete = list.delete_user(1).unwrap();
        assert!(list.is_pending(delete.op));
        list.complete(delete.op, ok(204, ""));
        assert!(!list.is_pending(delete.op));
        assert_eq!(list.complete(delete.op, network_error()), Completion::Ignored);
        assert_eq!(list.state().users(), &[User::new(2, "Bob")]);
    }
}
