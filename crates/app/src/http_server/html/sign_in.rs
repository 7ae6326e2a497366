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
#[template(path = "sign_in.html")]
pub struct SignInTemplate {
    pub username: Option<String>,
    pub message: Option<String>,
    /// echoed back into the form on a failed attempt
    pub user_input: String,
}

#[instrument(skip(state, jar))]
pub async fn form_handler(State(state): State<AppState>, jar: CookieJar) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);

    let template = SignInTemplate {
        username: state.sessions().username(&token).await,
        message: state.sessions().take_message(&token).await,
        user_input: String::new(),
    };
    (jar, template).into_response()
}

#[derive(Debug, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[instrument(skip(state, jar, form))]
pub async fn submit_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignInForm>,
) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);

    match state
        .credentials()
        .verify(&form.username, &form.password)
        .await
    {
        Ok(true) => {
            state.sessions().set_username(&token, &form.username).await;
            state.sessions().set_message(&token, "Welcome!").await;
            (jar, Redirect::to("/")).into_response()
        }
        Ok(false) => {
            let template = SignInTemplate {
                username: state.sessions().username(&token).await,
                message: Some("Invalid credentials.".to_string()),
                user_input: form.username,
            };
            (jar, template).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to verify credentials: {}", e);
            error_response("Failed to verify credentials")
        }
    }
}

#[instrument(skip(state, jar))]
pub async fn signout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> askama_axum::Response {
    let (jar, token) = session::ensure_token(jar);

    state.sessions().clear_username(&token).await;
    state
        .sessions()
        .set_message(&token, "You have been signed out.")
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
