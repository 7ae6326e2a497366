use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use store::StoreError;
use tracing::instrument;

use crate::session;
use crate::AppState;

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditorTemplate {
    pub username: Option<String>,
    pub message: Option<String>,
    pub name: String,
    pub content: String,
}

#[instrument(skip(state, jar))]
pub async fn form_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(name): Path<String>,
) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);
    let username = match session::require_signin(state.sessions(), &token).await {
        Ok(username) => Some(username),
        Err(redirect) => return (jar, redirect).into_response(),
    };

    let content = match state.documents().read(&name).await {
        Ok(content) => content,
        Err(StoreError::NotFound(_)) | Err(StoreError::InvalidName(_)) => {
            state
                .sessions()
                .set_message(&token, format!("{} does not exist.", name))
                .await;
            return (jar, Redirect::to("/")).into_response();
        }
        Err(e) => {
            tracing::error!("Failed to read document: {}", e);
            return error_response("Failed to read document");
        }
    };

    let template = EditorTemplate {
        username,
        message: state.sessions().take_message(&token).await,
        name,
        content,
    };
    (jar, template).into_response()
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub text_changes: String,
}

#[instrument(skip(state, jar, form))]
pub async fn save_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(name): Path<String>,
    Form(form): Form<EditForm>,
) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);
    if let Err(redirect) = session::require_signin(state.sessions(), &token).await {
        return (jar, redirect).into_response();
    }

    match state.documents().write(&name, &form.text_changes).await {
        Ok(()) => {
            state
                .sessions()
                .set_message(&token, format!("{} has been updated.", name))
                .await;
            (jar, Redirect::to("/")).into_response()
        }
        Err(StoreError::InvalidName(_)) => {
            state
                .sessions()
                .set_message(&token, format!("{} does not exist.", name))
                .await;
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to save document: {}", e);
            error_response("Failed to save document")
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
