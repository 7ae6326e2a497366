use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::response::Redirect;
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use store::StoreError;
use tracing::instrument;

use crate::session;
use crate::AppState;

#[derive(Template)]
#[template(path = "new.html")]
pub struct NewDocumentTemplate {
    pub username: Option<String>,
    pub message: Option<String>,
}

#[instrument(skip(state, jar))]
pub async fn form_handler(State(state): State<AppState>, jar: CookieJar) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);
    let username = match session::require_signin(state.sessions(), &token).await {
        Ok(username) => Some(username),
        Err(redirect) => return (jar, redirect).into_response(),
    };

    let template = NewDocumentTemplate {
        username,
        message: state.sessions().take_message(&token).await,
    };
    (jar, template).into_response()
}

#[derive(Debug, Deserialize)]
pub struct CreateForm {
    #[serde(default)]
    pub filename: String,
}

#[instrument(skip(state, jar, form))]
pub async fn create_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateForm>,
) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);
    let username = match session::require_signin(state.sessions(), &token).await {
        Ok(username) => Some(username),
        Err(redirect) => return (jar, redirect).into_response(),
    };

    let filename = form.filename.as_str();
    if filename.trim().is_empty() {
        let template = NewDocumentTemplate {
            username,
            message: Some("A file name is required.".to_string()),
        };
        return (jar, template).into_response();
    }

    match state.documents().create(filename).await {
        Ok(()) => {
            state
                .sessions()
                .set_message(&token, format!("{} was created.", filename))
                .await;
            (jar, Redirect::to("/")).into_response()
        }
        Err(StoreError::InvalidName(_)) => {
            let template = NewDocumentTemplate {
                username,
                message: Some("A file name is required.".to_string()),
            };
            (jar, template).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create document: {}", e);
            error_response("Failed to create document")
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
