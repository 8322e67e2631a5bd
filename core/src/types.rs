//! Domain DTOs for the users API.
//!
//! # Design
//! `User` is both the wire shape and the row shape held by the view state.
//! Server ids are positive; the component hands out negative ids to entities
//! it creates locally, so a provisional row can always be told apart from a
//! confirmed one and the two id spaces never collide.

use serde::{Deserialize, Serialize};

/// Identifier of a user. Negative values are provisional.
pub type UserId = i64;

/// A single user as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// True while the user only exists locally and awaits a server id.
    pub fn is_provisional(&self) -> bool {
        self.id < 0
    }
}

/// Source of provisional ids: `-1`, `-2`, ... for the lifetime of one
/// component.
#[derive(Debug, Default)]
pub struct ProvisionalIds {
    issued: i64,
}

impl ProvisionalIds {
    pub fn next(&mut self) -> UserId {
        self.issued += 1;
        -self.issued
    }
}
