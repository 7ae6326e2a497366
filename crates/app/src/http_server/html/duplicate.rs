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
#[template(path = "duplicate.html")]
pub struct DuplicateTemplate {
    pub username: Option<String>,
    pub message: Option<String>,
    pub name: String,
    pub new_name: String,
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

    let template = DuplicateTemplate {
        username,
        message: state.sessions().take_message(&token).await,
        new_name: name.clone(),
        name,
        content,
    };
    (jar, template).into_response()
}

#[derive(Debug, Deserialize)]
pub struct DuplicateForm {
    #[serde(default)]
    pub new_name: String,
    #[serde(default)]
    pub text_changes: String,
}

#[instrument(skip(state, jar, form))]
pub async fn submit_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(name): Path<String>,
    Form(form): Form<DuplicateForm>,
) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);
    let username = match session::require_signin(state.sessions(), &token).await {
        Ok(username) => Some(username),
        Err(redirect) => return (jar, redirect).into_response(),
    };

    if form.new_name.trim().is_empty() {
        let template = DuplicateTemplate {
            username,
            message: Some("A file name is required.".to_string()),
            name,
            new_name: String::new(),
            content: form.text_changes,
        };
        return (jar, template).into_response();
    }

    // Duplicating onto the source name would overwrite it; pending a
    // confirmation step, this performs neither write nor message.
    if form.new_name == name {
        let template = DuplicateTemplate {
            username,
            message: None,
            new_name: form.new_name,
            name,
            content: form.text_changes,
        };
        return (jar, template).into_response();
    }

    match state
        .documents()
        .write(&form.new_name, &form.text_changes)
        .await
    {
        Ok(()) => {
            state
                .sessions()
                .set_message(&token, format!("{} was duplicated.", name))
                .await;
            (jar, Redirect::to("/")).into_response()
        }
        Err(StoreError::InvalidName(_)) => {
            let template = DuplicateTemplate {
                username,
                message: Some("A file name is required.".to_string()),
                name,
                new_name: form.new_name,
                content: form.text_changes,
            };
            (jar, template).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to duplicate document: {}", e);
            error_response("Failed to duplicate document")
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
