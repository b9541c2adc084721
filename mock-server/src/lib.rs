//! In-memory REST service for user records.
//!
//! Ids are assigned sequentially from 1. `PUT` applies only the fields
//! present in the body, matching the client's merge semantics.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub age: u32,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    #[serde(default)]
    pub age: u32,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub age: Option<u32>,
}

#[derive(Debug, Default)]
pub struct Users {
    records: HashMap<u64, User>,
    last_id: u64,
}

impl Users {
    fn insert(&mut self, user: User) {
        self.last_id = self.last_id.max(user.id);
        self.records.insert(user.id, user);
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

pub type Db = Arc<RwLock<Users>>;

pub fn app() -> Router {
    app_with_users(Vec::new())
}

/// Router pre-populated with `users`; new ids continue after the largest.
pub fn app_with_users(users: Vec<User>) -> Router {
    let mut store = Users::default();
    for user in users {
        store.insert(user);
    }
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_users(listener, Vec::new()).await
}

pub async fn run_with_users(listener: TcpListener, users: Vec<User>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_users(users)).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let users = db.read().await;
    let mut all: Vec<User> = users.records.values().cloned().collect();
    all.sort_by_key(|user| user.id);
    Json(all)
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<User>) {
    let mut users = db.write().await;
    let user = User {
        id: users.next_id(),
        name: input.name,
        age: input.age,
    };
    users.insert(user.clone());
    tracing::info!(id = user.id, "created user");
    (StatusCode::CREATED, Json(user))
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<User>, StatusCode> {
    let users = db.read().await;
    users.records.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, StatusCode> {
    let mut users = db.write().await;
    let user = users.records.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(age) = input.age {
        user.age = age;
    }
    tracing::info!(id, "updated user");
    Ok(Json(user.clone()))
}

async fn delete_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut users = db.write().await;
    users.records.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}
