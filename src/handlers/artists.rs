use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use super::{IdPath, JsonBody, SearchRequest};
use crate::{
    db::{entities::artist, repositories::ArtistRepository},
    error::Result,
    forms::ArtistForm,
    services::{
        artists::{self, ArtistDetail, ArtistSummary},
        timeline, SearchResults,
    },
    state::AppState,
};

/// List artists with their upcoming show counts
pub async fn list_artists(State(state): State<AppState>) -> Result<Json<Vec<ArtistSummary>>> {
    let artists = artists::list(&state.db, timeline::now()).await?;
    Ok(Json(artists))
}

pub async fn search_artists(
    State(state): State<AppState>,
    WithRejection(Json(request), _): JsonBody<SearchRequest>,
) -> Result<Json<SearchResults>> {
    let results = artists::search_by_name(&state.db, &request.search_term).await?;
    Ok(Json(results))
}

pub async fn get_artist(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<ArtistDetail>> {
    let detail = artists::detail(&state.db, id, timeline::now()).await?;
    Ok(Json(detail))
}

pub async fn create_artist(
    State(state): State<AppState>,
    WithRejection(Json(form), _): JsonBody<ArtistForm>,
) -> Result<(StatusCode, Json<artist::Model>)> {
    let data = form.validate()?;
    let artist = ArtistRepository::new(state.db.clone()).create(data).await?;
    Ok((StatusCode::CREATED, Json(artist)))
}

pub async fn update_artist(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(form), _): JsonBody<ArtistForm>,
) -> Result<Json<artist::Model>> {
    let data = form.validate()?;
    let artist = ArtistRepository::new(state.db.clone()).update(id, data).await?;
    Ok(Json(artist))
}

pub async fn delete_artist(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<StatusCode> {
    ArtistRepository::new(state.db.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
