pub mod artists;
pub mod health;
pub mod html;
pub mod shows;
pub mod venues;

use axum::{
    extract::Path,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{error::AppError, state::AppState};

/// JSON body whose rejection is answered with the API error body.
pub type JsonBody<T> = WithRejection<Json<T>, AppError>;

/// Row id in an API path; an id that does not parse is a 404.
pub type IdPath = WithRejection<Path<i32>, AppError>;

/// Body of a name search, posted as a form field or JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub search_term: String,
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Venue endpoints
        .route("/venues", get(venues::list_venues).post(venues::create_venue))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/:id",
            get(venues::get_venue)
                .put(venues::update_venue)
                .delete(venues::delete_venue),
        )

        // Artist endpoints
        .route("/artists", get(artists::list_artists).post(artists::create_artist))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/:id",
            get(artists::get_artist)
                .put(artists::update_artist)
                .delete(artists::delete_artist),
        )

        // Show endpoints
        .route("/shows", get(shows::list_shows).post(shows::create_show))
}

pub fn html_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(html::index))

        .route("/venues", get(html::venues))
        .route("/venues/search", post(html::search_venues))
        .route(
            "/venues/create",
            get(html::create_venue_form).post(html::create_venue_submission),
        )
        .route("/venues/:id", get(html::show_venue).delete(html::delete_venue))
        .route(
            "/venues/:id/edit",
            get(html::edit_venue_form).post(html::edit_venue_submission),
        )

        .route("/artists", get(html::artists))
        .route("/artists/search", post(html::search_artists))
        .route(
            "/artists/create",
            get(html::create_artist_form).post(html::create_artist_submission),
        )
        .route("/artists/:id", get(html::show_artist).delete(html::delete_artist))
        .route(
            "/artists/:id/edit",
            get(html::edit_artist_form).post(html::edit_artist_submission),
        )

        .route("/shows", get(html::shows))
        .route(
            "/shows/create",
            get(html::create_show_form).post(html::create_show_submission),
        )
}
