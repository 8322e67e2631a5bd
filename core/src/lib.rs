//! Sans-IO core of the user list component.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the stateless
//! client sits `UserList`, which owns the view state, applies add / update /
//! delete optimistically and reconciles server outcomes handed back by the
//! host.
//!
//! # Design
//! - `UsersClient` is stateless; it holds only `base_url`.
//! - Each request is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `UserList` handlers return a `Dispatch`; the host runs it and calls
//!   `UserList::complete` with the outcome.
//! - `render` is a pure function of `ViewState`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod list;
pub mod render;
pub mod state;
pub mod types;

pub use client::UsersClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{Completion, Dispatch, OpId, UserList, DEFAULT_NEW_NAME, DEFAULT_UPDATED_NAME};
pub use render::{render, Action, Node};
pub use state::ViewState;
pub use types::{User, UserId};
