use axum::routing::{get, post};
use axum::Router;

mod document;
mod duplicate;
mod editor;
mod index;
pub mod markdown;
mod new_document;
mod sign_in;
mod sign_up;

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::handler))
        .route("/new", get(new_document::form_handler))
        .route("/create", post(new_document::create_handler))
        .route(
            "/users/signin",
            get(sign_in::form_handler).post(sign_in::submit_handler),
        )
        .route("/users/signout", post(sign_in::signout_handler))
        .route(
            "/signup",
            get(sign_up::form_handler).post(sign_up::submit_handler),
        )
        .route(
            "/:name",
            get(document::view_handler).post(editor::save_handler),
        )
        .route("/:name/edit", get(editor::form_handler))
        .route("/:name/delete", post(document::delete_handler))
        .route(
            "/:name/duplicate",
            get(duplicate::form_handler).post(duplicate::submit_handler),
        )
        .with_state(state)
}
