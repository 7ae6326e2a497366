use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use store::StoreError;
use tracing::instrument;

use super::markdown;
use crate::session;
use crate::AppState;

#[derive(Template)]
#[template(path = "document.html")]
pub struct DocumentTemplate {
    pub username: Option<String>,
    pub message: Option<String>,
    pub name: String,
    /// already-rendered markup, injected unescaped
    pub html: String,
}

/// Read-only document view; the one route the guard never touches.
/// `.md` documents render to HTML inside the page template, everything else
/// is intentional unrendered `text/plain` passthrough.
#[instrument(skip(state, jar))]
pub async fn view_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(name): Path<String>,
) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);

    match state.documents().read(&name).await {
        Ok(content) => {
            if name.ends_with(".md") {
                let template = DocumentTemplate {
                    username: state.sessions().username(&token).await,
                    message: state.sessions().take_message(&token).await,
                    html: markdown::to_html(&content),
                    name,
                };
                (jar, template).into_response()
            } else {
                (
                    jar,
                    (
                        StatusCode::OK,
                        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                        content,
                    ),
                )
                    .into_response()
            }
        }
        Err(StoreError::NotFound(_)) | Err(StoreError::InvalidName(_)) => {
            state
                .sessions()
                .set_message(&token, format!("{} does not exist.", name))
                .await;
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to read document: {}", e);
            error_response("Failed to read document")
        }
    }
}

#[instrument(skip(state, jar))]
pub async fn delete_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(name): Path<String>,
) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);
    if let Err(redirect) = session::require_signin(state.sessions(), &token).await {
        return (jar, redirect).into_response();
    }

    match state.documents().delete(&name).await {
        Ok(()) => {
            state
                .sessions()
                .set_message(&token, format!("{} has been deleted.", name))
                .await;
            (jar, Redirect::to("/")).into_response()
        }
        // A missing document is a user message, never a crashed request.
        Err(StoreError::NotFound(_)) | Err(StoreError::InvalidName(_)) => {
            state
                .sessions()
                .set_message(&token, format!("{} does not exist.", name))
                .await;
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to delete document: {}", e);
            error_response("Failed to delete document")
        }
    }
}

fn error_response(message: &str) -> askama_axum::Response {
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        format!("Error: {}", message),
    )
        .into_response()
}
