use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use crate::session;
use crate::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub username: Option<String>,
    pub message: Option<String>,
    pub files: Vec<String>,
}

#[instrument(skip(state, jar))]
pub async fn handler(State(state): State<AppState>, jar: CookieJar) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);

    let files = match state.documents().list().await {
        Ok(files) => files,
        Err(e) => {
            tracing::error!("Failed to list documents: {}", e);
            return error_response("Failed to list documents");
        }
    };

    let template = IndexTemplate {
        username: state.sessions().username(&token).await,
        message: state.sessions().take_message(&token).await,
        files,
    };

    (jar, template).into_response()
}

fn error_response(message: &str) -> askama_axum::Response {
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        format!("Error: {}", message),
    )
        .into_response()
}
