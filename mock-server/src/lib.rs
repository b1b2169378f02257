use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Feed {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
    pub title: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stream {
    pub id: String,
    pub name: String,
    pub permalink: String,
}

#[derive(Clone, Debug)]
pub struct StreamAssignment {
    pub id: String,
    pub stream_id: String,
    pub feed_id: String,
}

/// An assignment joined with its feed, as returned by the stream endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreamFeed {
    pub id: String,
    pub feed_id: String,
    pub uri: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Serialize, Deserialize)]
pub struct FeedList {
    pub feeds: Vec<Feed>,
}

#[derive(Serialize, Deserialize)]
pub struct StreamList {
    pub streams: Vec<Stream>,
}

#[derive(Serialize, Deserialize)]
pub struct StreamFeedList {
    pub feeds: Vec<StreamFeed>,
}

#[derive(Deserialize)]
pub struct CreateFeedRequest {
    pub feed: CreateFeed,
}

#[derive(Deserialize)]
pub struct CreateFeed {
    pub uri: String,
    pub use_googlebot_agent: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateStreamRequest {
    pub stream: CreateStream,
}

#[derive(Deserialize)]
pub struct CreateStream {
    pub name: String,
    pub permalink: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateAssignmentRequest {
    pub stream_assignment: CreateAssignment,
}

#[derive(Deserialize)]
pub struct CreateAssignment {
    pub stream_id: String,
    pub feed_id: String,
}

/// In-memory service state. Vectors keep insertion order, which is the
/// order every list endpoint returns.
#[derive(Default)]
pub struct Store {
    feeds: Vec<Feed>,
    streams: Vec<Stream>,
    assignments: Vec<StreamAssignment>,
}

impl Store {
    fn join(&self, assignment: &StreamAssignment) -> Option<StreamFeed> {
        let feed = self.feeds.iter().find(|f| f.id == assignment.feed_id)?;
        Some(StreamFeed {
            id: assignment.id.clone(),
            feed_id: feed.id.clone(),
            uri: feed.uri.clone(),
            title: feed.title.clone(),
            kind: feed.kind.clone(),
        })
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    token: Arc<str>,
}

/// Mount point of the API, matching the client's default base URL.
pub const API_PREFIX: &str = "/api/v3";

/// Router for the feed service API under `API_PREFIX`. Every route requires
/// `Authorization: Bearer <token>`.
pub fn app(token: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        token: Arc::from(token),
    };
    let api = Router::new()
        .route("/feeds.json", get(list_feeds).post(create_feed))
        .route("/streams.json", get(list_streams).post(create_stream))
        .route("/streams/{file}", get(list_stream_feeds))
        .route("/stream_assignments.json", post(create_assignment))
        .route("/stream_assignments/{file}", delete(delete_assignment))
        .layer(middleware::from_fn_with_state(state.clone(), require_token));
    Router::new().nest(API_PREFIX, api).with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.token);
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented != Some(expected.as_str()) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

/// `abc.json` -> `abc`; anything without the suffix is not a resource.
fn resource_id(file: &str) -> Result<&str, StatusCode> {
    file.strip_suffix(".json")
        .filter(|id| !id.is_empty())
        .ok_or(StatusCode::NOT_FOUND)
}

/// Lowercase the name and collapse every run of other characters to `-`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

async fn list_feeds(State(state): State<AppState>) -> Json<FeedList> {
    let store = state.db.read().await;
    Json(FeedList {
        feeds: store.feeds.clone(),
    })
}

async fn create_feed(
    State(state): State<AppState>,
    Json(input): Json<CreateFeedRequest>,
) -> Result<(StatusCode, Json<Feed>), StatusCode> {
    let CreateFeed {
        uri,
        use_googlebot_agent,
    } = input.feed;
    // The flag is either absent or true; an explicit false is rejected.
    if uri.is_empty() || use_googlebot_agent == Some(false) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let feed = Feed {
        id: Uuid::new_v4().to_string(),
        kind: "rss".to_string(),
        title: uri.clone(),
        uri,
    };
    state.db.write().await.feeds.push(feed.clone());
    Ok((StatusCode::CREATED, Json(feed)))
}

async fn list_streams(State(state): State<AppState>) -> Json<StreamList> {
    let store = state.db.read().await;
    Json(StreamList {
        streams: store.streams.clone(),
    })
}

async fn create_stream(
    State(state): State<AppState>,
    Json(input): Json<CreateStreamRequest>,
) -> Result<(StatusCode, Json<Stream>), StatusCode> {
    let CreateStream { name, permalink } = input.stream;
    if name.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let permalink = permalink
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| slugify(&name));
    let stream = Stream {
        id: Uuid::new_v4().to_string(),
        name,
        permalink,
    };
    state.db.write().await.streams.push(stream.clone());
    Ok((StatusCode::CREATED, Json(stream)))
}

async fn list_stream_feeds(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Json<StreamFeedList>, StatusCode> {
    let id = resource_id(&file)?;
    let store = state.db.read().await;
    if !store.streams.iter().any(|s| s.id == id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let feeds = store
        .assignments
        .iter()
        .filter(|a| a.stream_id == id)
        .filter_map(|a| store.join(a))
        .collect();
    Ok(Json(StreamFeedList { feeds }))
}

async fn create_assignment(
    State(state): State<AppState>,
    Json(input): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<StreamFeed>), StatusCode> {
    let CreateAssignment { stream_id, feed_id } = input.stream_assignment;
    let mut store = state.db.write().await;
    if !store.streams.iter().any(|s| s.id == stream_id) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    // Duplicate (stream, feed) pairs are accepted.
    let assignment = StreamAssignment {
        id: Uuid::new_v4().to_string(),
        stream_id,
        feed_id,
    };
    let joined = store
        .join(&assignment)
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    store.assignments.push(assignment);
    Ok((StatusCode::CREATED, Json(joined)))
}

async fn delete_assignment(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let id = resource_id(&file)?;
    let mut store = state.db.write().await;
    let index = store
        .assignments
        .iter()
        .position(|a| a.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    store.assignments.remove(index);
    Ok(StatusCode::NO_CONTENT)
}
