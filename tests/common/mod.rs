use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, header},
};
use quire::{
    build_router,
    config::Config,
    state::AppState,
    storage::{BookStore, MemoryBookStore},
};
use quire_traits::InMemoryResourceProvider;
use quire_types::{Book, BookId, Chapter, UserId};
use serde_json::{Value, json};
use std::sync::Arc;

pub const ADA_TOKEN: &str = "token-ada";
pub const GRACE_TOKEN: &str = "token-grace";

pub fn test_config() -> Config {
    serde_json::from_value(json!({
        "server": { "host": "127.0.0.1", "port": 0 },
        "storage": { "books_dir": "unused", "assets_dir": "unused" },
        "export": { "max_concurrent_exports": 2, "stream_chunk_size": 1024 },
        "auth": { "tokens": [
            { "token": ADA_TOKEN, "user_id": "ada" },
            { "token": GRACE_TOKEN, "user_id": "grace" }
        ]}
    }))
    .unwrap()
}

pub fn atlas() -> Book {
    Book {
        id: BookId::from("atlas"),
        owner_id: UserId::from("ada"),
        title: "Atlas of Clouds".to_string(),
        subtitle: None,
        author: Some("Ada Lovelace".to_string()),
        cover_image: None,
        chapters: vec![
            Chapter {
                title: Some("Beginnings".to_string()),
                content: Some("# Heading\n\nSome **bold** text.".to_string()),
                description: None,
            },
            Chapter {
                title: Some("Broken".to_string()),
                content: Some(format!("{} too deep", ">".repeat(64))),
                description: None,
            },
        ],
    }
}

/// A store whose backend is down; its error text must never reach clients.
#[derive(Debug)]
pub struct UnavailableStore;

pub const STORE_FAILURE: &str = "connection refused by db-primary:5432";

#[async_trait]
impl BookStore for UnavailableStore {
    async fn get(&self, _id: &BookId) -> Result<Option<Book>, String> {
        Err(STORE_FAILURE.to_string())
    }

    async fn put(&self, _book: Book) -> Result<(), String> {
        Err(STORE_FAILURE.to_string())
    }
}

pub fn app_with_store(store: Arc<dyn BookStore>) -> Router {
    let state = AppState::new(
        test_config(),
        store,
        Arc::new(InMemoryResourceProvider::new()),
    );
    build_router(state)
}

pub fn app() -> Router {
    app_with_store(Arc::new(MemoryBookStore::new().with(atlas())))
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
