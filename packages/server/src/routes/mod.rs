use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers::{blog, note, person};
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/blogs", blog_routes())
        .nest("/notes", note_routes())
        .nest("/persons", person_routes())
}

fn blog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(blog::list_blogs, blog::create_blog))
        .routes(routes!(blog::get_blog, blog::update_blog, blog::delete_blog))
}

fn note_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(note::list_notes, note::create_note))
        .routes(routes!(note::get_note, note::update_note, note::delete_note))
}

fn person_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(person::list_persons, person::create_person))
        .routes(routes!(
            person::get_person,
            person::update_person,
            person::delete_person
        ))
}
