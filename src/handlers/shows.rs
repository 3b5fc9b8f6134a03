use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;

use super::JsonBody;
use crate::{
    db::{entities::show, repositories::ShowRepository},
    error::Result,
    forms::ShowForm,
    services::shows::{self, ShowListing},
    state::AppState,
};

pub async fn list_shows(State(state): State<AppState>) -> Result<Json<Vec<ShowListing>>> {
    let shows = shows::list(&state.db).await?;
    Ok(Json(shows))
}

/// Book a show; both referenced rows must exist
pub async fn create_show(
    State(state): State<AppState>,
    WithRejection(Json(form), _): JsonBody<ShowForm>,
) -> Result<(StatusCode, Json<show::Model>)> {
    let data = form.validate()?;
    let show = ShowRepository::new(state.db.clone()).create(data).await?;
    Ok((StatusCode::CREATED, Json(show)))
}
