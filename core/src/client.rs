//! Stateless HTTP request builder and response parser for the users API.
//!
//! # Design
//! `UsersClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any 2xx status counts as success; the public services this talks to
//! disagree on 200 versus 201/204 for writes.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{User, UserId};

/// Synchronous, stateless client for the `/users` resource.
#[derive(Debug, Clone)]
pub struct UsersClient {
    base_url: String,
}

impl UsersClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_users(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/users", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The provisional id travels in the body; the server assigns its own.
    pub fn build_create_user(&self, user: &User) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/users", self.base_url),
            headers: json_headers(),
            body: Some(to_body(user)?),
        })
    }

    pub fn build_update_user(&self, user: &User) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            path: format!("{}/users/{}", self.base_url, user.id),
            headers: json_headers(),
            body: Some(to_body(user)?),
        })
    }

    pub fn build_delete_user(&self, id: UserId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/users/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        check_status(&response)?;
        from_body(&response.body)
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response)?;
        from_body(&response.body)
    }

    pub fn parse_update_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response)?;
        from_body(&response.body)
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_body(user: &User) -> Result<String, ApiError> {
    serde_json::to_string(user).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
