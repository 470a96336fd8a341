//! In-memory stand-in for the Hatena Blog member API.
//!
//! Serves `GET`/`POST /{owner}/{blog_host}/api/members` and
//! `DELETE /{owner}/{blog_host}/api/members/{username}`. Members are kept per
//! blog in insertion order. Every request is counted, and requests without a
//! WSSE `UsernameToken` header are rejected with 401.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const ROLES: [&str; 3] = ["admin", "editor", "contributor"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub username: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MembersBody {
    pub members: Vec<Member>,
}

type BlogKey = (String, String);

#[derive(Clone, Default)]
pub struct AppState {
    blogs: Arc<RwLock<HashMap<BlogKey, Vec<Member>>>>,
    requests: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests received so far, rejected ones included.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub async fn seed(&self, owner: &str, blog_host: &str, members: Vec<Member>) {
        self.blogs
            .write()
            .await
            .insert((owner.to_string(), blog_host.to_string()), members);
    }

    pub async fn members(&self, owner: &str, blog_host: &str) -> Vec<Member> {
        self.blogs
            .read()
            .await
            .get(&(owner.to_string(), blog_host.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

pub fn app() -> Router {
    router(AppState::new())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{owner}/{blog_host}/api/members", get(list_members).post(add_member))
        .route("/{owner}/{blog_host}/api/members/{username}", delete(delete_member))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, AppState::new()).await
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state)).await
}

async fn authenticate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let signed = request
        .headers()
        .get("x-wsse")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("UsernameToken "));
    if !signed {
        return (StatusCode::UNAUTHORIZED, "missing X-WSSE header").into_response();
    }
    next.run(request).await
}

async fn list_members(
    State(state): State<AppState>,
    Path((owner, blog_host)): Path<(String, String)>,
) -> Json<MembersBody> {
    let members = state.members(&owner, &blog_host).await;
    Json(MembersBody { members })
}

async fn add_member(
    State(state): State<AppState>,
    Path((owner, blog_host)): Path<(String, String)>,
    Json(input): Json<Member>,
) -> Response {
    if !ROLES.contains(&input.role.as_str()) {
        return (StatusCode::BAD_REQUEST, "invalid role").into_response();
    }

    let mut blogs = state.blogs.write().await;
    let members = blogs.entry((owner, blog_host)).or_default();
    match members.iter_mut().find(|m| m.username == input.username) {
        Some(existing) => existing.role = input.role.clone(),
        None => members.push(input.clone()),
    }
    info!(username = %input.username, role = %input.role, "member saved");

    (StatusCode::CREATED, Json(input)).into_response()
}

async fn delete_member(
    State(state): State<AppState>,
    Path((owner, blog_host, username)): Path<(String, String, String)>,
) -> Response {
    let mut blogs = state.blogs.write().await;
    let members = blogs.entry((owner, blog_host)).or_default();
    let before = members.len();
    members.retain(|m| m.username != username);

    if members.len() == before {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }
    info!(%username, "member deleted");
    StatusCode::OK.into_response()
}
