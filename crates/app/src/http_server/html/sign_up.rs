use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::response::Redirect;
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::instrument;

use crate::session;
use crate::AppState;

#[derive(Template)]
#[template(path = "sign_up.html")]
pub struct SignUpTemplate {
    pub username: Option<String>,
    pub message: Option<String>,
    /// echoed back into the form on a failed attempt
    pub user_input: String,
}

#[instrument(skip(state, jar))]
pub async fn form_handler(State(state): State<AppState>, jar: CookieJar) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);

    let template = SignUpTemplate {
        username: state.sessions().username(&token).await,
        message: state.sessions().take_message(&token).await,
        user_input: String::new(),
    };
    (jar, template).into_response()
}

#[derive(Debug, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[instrument(skip(state, jar, form))]
pub async fn submit_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignUpForm>,
) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);
    let username = state.sessions().username(&token).await;

    if form.username.is_empty() || form.password.is_empty() {
        let template = SignUpTemplate {
            username,
            message: Some("Please enter valid username and password.".to_string()),
            user_input: form.username,
        };
        return (jar, template).into_response();
    }

    let mut credentials = match state.credentials().load().await {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("Failed to load credentials: {}", e);
            return error_response("Failed to load credentials");
        }
    };

    if credentials.contains_key(&form.username) {
        let template = SignUpTemplate {
            username,
            message: Some("Username already exists. Choose another username.".to_string()),
            user_input: form.username,
        };
        return (jar, template).into_response();
    }

    if form.password != form.confirm_password {
        let template = SignUpTemplate {
            username,
            message: Some("Passwords do not match.".to_string()),
            user_input: form.username,
        };
        return (jar, template).into_response();
    }

    credentials.insert(form.username.clone(), store::digest(&form.password));
    if let Err(e) = state.credentials().save(&credentials).await {
        tracing::error!("Failed to save credentials: {}", e);
        return error_response("Failed to save credentials");
    }

    state
        .sessions()
        .set_message(
            &token,
            format!(
                "New account for user {} successfully created.",
                form.username
            ),
        )
        .await;
    (jar, Redirect::to("/")).into_response()
}

fn error_response(message: &str) -> askama_axum::Response {
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        format!("Error: {}", message),
    )
        .into_response()
}
