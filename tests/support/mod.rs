// In-memory store shared by the router tests.
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chrono::NaiveDateTime;
use http_body_util::BodyExt;
use tower::ServiceExt;
use worklog::{WorkItem, WorkItemStore};
use worklog_core::errors::{Result, WorklogError};

const ACCEPTED_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Mirrors the Postgres repository: serial ids, ascending listing, text timestamps.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    next_id: i32,
    items: Vec<WorkItem>,
}

impl InMemoryStore {
    pub fn snapshot(&self) -> Vec<WorkItem> {
        self.state.lock().unwrap().items.clone()
    }
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| {
            WorklogError::Database(format!(
                "invalid input syntax for type timestamp: \"{raw}\""
            ))
        })
}

#[async_trait]
impl WorkItemStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<WorkItem>> {
        let mut items = self.snapshot();
        items.sort_by_key(|item| item.work_datetime);
        Ok(items)
    }

    async fn get_by_id(&self, id: i32) -> Result<WorkItem> {
        let state = self.state.lock().unwrap();
        Ok(state
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert(&self, user_id: i32, work_datetime: &str, time_type: &str) -> Result<()> {
        let work_datetime = parse_timestamp(work_datetime)?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.items.push(WorkItem {
            id,
            user_id,
            work_datetime,
            time_type: time_type.to_string(),
        });
        Ok(())
    }

    async fn update(&self, id: i32, work_datetime: &str, time_type: &str) -> Result<()> {
        let work_datetime = parse_timestamp(work_datetime)?;
        let mut state = self.state.lock().unwrap();
        if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
            item.work_datetime = work_datetime;
            item.time_type = time_type.to_string();
        }
        Ok(())
    }
}

/// Store whose every call fails like a dropped connection.
pub struct FailingStore;

#[async_trait]
impl WorkItemStore for FailingStore {
    async fn list_all(&self) -> Result<Vec<WorkItem>> {
        Err(WorklogError::Database("connection refused".into()))
    }

    async fn get_by_id(&self, _id: i32) -> Result<WorkItem> {
        Err(WorklogError::Database("connection refused".into()))
    }

    async fn insert(&self, _user_id: i32, _work_datetime: &str, _time_type: &str) -> Result<()> {
        Err(WorklogError::Database("connection refused".into()))
    }

    async fn update(&self, _id: i32, _work_datetime: &str, _time_type: &str) -> Result<()> {
        Err(WorklogError::Database("connection refused".into()))
    }
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn assert_redirected_home(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[header::LOCATION], "/");
}
