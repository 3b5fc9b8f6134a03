use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;

use super::{name_contains, timeline, NamedRef, SearchResults};
use crate::{
    db::entities::{artist, show, venue},
    error::{AppError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// A show on an artist page, seen from the venue's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct VenueAppearance {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: artist::Model,
    pub past_shows: Vec<VenueAppearance>,
    pub upcoming_shows: Vec<VenueAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Every artist with a count of upcoming shows, in id order.
pub async fn list(db: &DatabaseConnection, now: DateTime<FixedOffset>) -> Result<Vec<ArtistSummary>> {
    let artists = artist::Entity::find()
        .order_by_asc(artist::Column::Id)
        .find_with_related(show::Entity)
        .all(db)
        .await?;

    Ok(artists
        .into_iter()
        .map(|(artist, shows)| ArtistSummary {
            id: artist.id,
            name: artist.name,
            num_upcoming_shows: shows
                .iter()
                .filter(|s| timeline::is_upcoming(&s.start_time, &now))
                .count(),
        })
        .collect())
}

pub async fn search_by_name(db: &DatabaseConnection, term: &str) -> Result<SearchResults> {
    let mut select = artist::Entity::find();

    let term = term.trim();
    if !term.is_empty() {
        select = select.filter(name_contains(artist::Column::Name, term));
    }

    let data = select
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .into_model::<NamedRef>()
        .all(db)
        .await?;

    Ok(data.into())
}

pub async fn detail(
    db: &DatabaseConnection,
    id: i32,
    now: DateTime<FixedOffset>,
) -> Result<ArtistDetail> {
    let artist = artist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

    let appearances = show::Entity::find()
        .select_only()
        .column(show::Column::VenueId)
        .column_as(venue::Column::Name, "venue_name")
        .column_as(venue::Column::ImageLink, "venue_image_link")
        .column(show::Column::StartTime)
        .join(JoinType::InnerJoin, show::Relation::Venue.def())
        .filter(show::Column::ArtistId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .into_model::<VenueAppearance>()
        .all(db)
        .await?;

    let (past_shows, upcoming_shows) = timeline::partition(appearances, |a| &a.start_time, &now);

    Ok(ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}
