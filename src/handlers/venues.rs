use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use super::{IdPath, JsonBody, SearchRequest};
use crate::{
    db::{entities::venue, repositories::VenueRepository},
    error::Result,
    forms::VenueForm,
    services::{
        timeline,
        venues::{self, VenueArea, VenueDetail},
        SearchResults,
    },
    state::AppState,
};

/// Venues grouped by (city, state)
pub async fn list_venues(State(state): State<AppState>) -> Result<Json<Vec<VenueArea>>> {
    let areas = venues::grouped_by_location(&state.db, timeline::now()).await?;
    Ok(Json(areas))
}

pub async fn search_venues(
    State(state): State<AppState>,
    WithRejection(Json(request), _): JsonBody<SearchRequest>,
) -> Result<Json<SearchResults>> {
    let results = venues::search_by_name(&state.db, &request.search_term).await?;
    Ok(Json(results))
}

/// Venue with past and upcoming shows
pub async fn get_venue(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<VenueDetail>> {
    let detail = venues::detail(&state.db, id, timeline::now()).await?;
    Ok(Json(detail))
}

pub async fn create_venue(
    State(state): State<AppState>,
    WithRejection(Json(form), _): JsonBody<VenueForm>,
) -> Result<(StatusCode, Json<venue::Model>)> {
    let data = form.validate()?;
    let venue = VenueRepository::new(state.db.clone()).create(data).await?;
    Ok((StatusCode::CREATED, Json(venue)))
}

/// Full overwrite of an existing venue
pub async fn update_venue(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(form), _): JsonBody<VenueForm>,
) -> Result<Json<venue::Model>> {
    let data = form.validate()?;
    let venue = VenueRepository::new(state.db.clone()).update(id, data).await?;
    Ok(Json(venue))
}

/// Delete a venue and every show booked there
pub async fn delete_venue(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<StatusCode> {
    VenueRepository::new(state.db.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
