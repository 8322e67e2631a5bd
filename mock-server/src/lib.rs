use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// Create payload. Any client-side `id` in the body is ignored.
#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
}

/// Users in insertion order, plus the next id to hand out.
#[derive(Debug)]
pub struct Users {
    rows: Vec<User>,
    next_id: i64,
}

impl Users {
    fn seeded(rows: Vec<User>) -> Self {
        let next_id = rows.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self { rows, next_id }
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.rows.iter().position(|u| u.id == id)
    }
}

pub type Db = Arc<RwLock<Users>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router whose store starts out holding `users`.
pub fn app_with(users: Vec<User>) -> Router {
    let db: Db = Arc::new(RwLock::new(Users::seeded(users)));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).patch(update_user).delete(delete_user))
        .with_state(db)
}

pub async fn run_with(listener: TcpListener, users: Vec<User>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(users)).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let users = db.read().await;
    debug!(count = users.rows.len(), "list users");
    Json(users.rows.clone())
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<User>) {
    let mut users = db.write().await;
    let user = User {
        id: users.next_id,
        name: input.name,
    };
    users.next_id += 1;
    users.rows.push(user.clone());
    debug!(id = user.id, "created user");
    (StatusCode::CREATED, Json(user))
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<User>, StatusCode> {
    let users = db.read().await;
    let index = users.position(id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(users.rows[index].clone()))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, StatusCode> {
    let mut users = db.write().await;
    let index = users.position(id).ok_or(StatusCode::NOT_FOUND)?;
    let user = &mut users.rows[index];
    if let Some(name) = input.name {
        user.name = name;
    }
    debug!(id, "updated user");
    Ok(Json(user.clone()))
}

async fn delete_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut users = db.write().await;
    let index = users.position(id).ok_or(StatusCode::NOT_FOUND)?;
    users.rows.remove(index);
    debug!(id, "deleted user");
    Ok(StatusCode::NO_CONTENT)
}
