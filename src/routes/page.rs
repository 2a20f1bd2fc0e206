use crate::state::AppState;
use askama::Template;
use axum::extract::State;
use std::sync::Arc;

/// The upload page. The backend url is only shown to the user, every call
/// the page makes goes through `/api`.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub backend_url: String,
}

pub async fn index(State(app_state): State<Arc<AppState>>) -> IndexTemplate {
    IndexTemplate {
        backend_url: app_state
            .backend()
            .base_url()
            .as_str()
            .trim_end_matches('/')
            .to_string(),
    }
}
