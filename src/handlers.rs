use axum::extract::{Form, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::{debug, error, warn};
use worklog_core::errors::WorklogError;

use crate::index::aggregate;
use crate::routing::AppState;
use crate::views;

type AppResult<T> = Result<T, AppError>;

/// Form body posted to `/create`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateForm {
    #[serde(default)]
    pub userid: String,
    #[serde(default)]
    pub workdatetime: String,
    #[serde(default)]
    pub timetype: String,
}

/// Form body posted to `/update`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub workdatetime: String,
    #[serde(default)]
    pub timetype: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditQuery {
    #[serde(default)]
    pub id: String,
}

/// `GET /`
pub async fn list_work_items(State(state): State<AppState>) -> AppResult<Html<String>> {
    let items = state.store.list_all().await?;
    let index = aggregate(items);
    Ok(Html(views::render_index(&index)))
}

/// `POST /create`
pub async fn create_work_item(
    State(state): State<AppState>,
    form: Option<Form<CreateForm>>,
) -> Response {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let user_id = coerce_int("userid", &form.userid);

    if let Err(err) = state
        .store
        .insert(user_id, &form.workdatetime, &form.timetype)
        .await
    {
        warn!(%err, user_id, "failed to insert work item");
    }

    redirect_home().await
}

/// `GET /edit?id=`
pub async fn edit_work_item(
    State(state): State<AppState>,
    query: Option<Query<EditQuery>>,
) -> AppResult<Html<String>> {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let id = coerce_int("id", &query.id);

    let item = state.store.get_by_id(id).await?;
    if item.is_empty() {
        debug!(id, "no work item for edit");
    }

    Ok(Html(views::render_edit(&item)))
}

/// `POST /update`
pub async fn update_work_item(
    State(state): State<AppState>,
    form: Option<Form<UpdateForm>>,
) -> Response {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let id = coerce_int("id", &form.id);

    if let Err(err) = state
        .store
        .update(id, &form.workdatetime, &form.timetype)
        .await
    {
        warn!(%err, id, "failed to update work item");
    }

    redirect_home().await
}

/// Sends the browser back to the listing with a 301, whatever happened before.
pub async fn redirect_home() -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/")]).into_response()
}

pub async fn health_check() -> &'static str {
    "ok"
}

/// Parses an integer form field, falling back to zero on anything malformed.
pub fn coerce_int(field: &'static str, raw: &str) -> i32 {
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            debug!(field, raw, "coercing malformed integer to zero");
            0
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Html(format!(
            "<!DOCTYPE html>\n<html><body><h1>{}</h1><p>{}</p></body></html>\n",
            self.status,
            views::escape(&self.message)
        ));
        (self.status, body).into_response()
    }
}

impl From<WorklogError> for AppError {
    fn from(err: WorklogError) -> Self {
        error!(%err, "request failed");
        AppError::internal(err.to_string())
    }
}
