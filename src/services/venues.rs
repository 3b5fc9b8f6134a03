use std::collections::HashMap;

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
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: Option<String>,
    pub state: Option<String>,
    pub venues: Vec<VenueSummary>,
}

/// A show on a venue page, seen from the artist's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct ArtistAppearance {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: venue::Model,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// All venues grouped by (city, state).
///
/// Venues are visited in id order and areas appear in the order their first
/// venue is met, so the output is stable across backends.
pub async fn grouped_by_location(
    db: &DatabaseConnection,
    now: DateTime<FixedOffset>,
) -> Result<Vec<VenueArea>> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::Id)
        .find_with_related(show::Entity)
        .all(db)
        .await?;

    let summaries = venues.into_iter().map(|(venue, shows)| {
        let num_upcoming_shows = shows
            .iter()
            .filter(|s| timeline::is_upcoming(&s.start_time, &now))
            .count();
        (venue, num_upcoming_shows)
    });

    Ok(group_by_location(summaries))
}

fn group_by_location(venues: impl IntoIterator<Item = (venue::Model, usize)>) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();
    let mut index: HashMap<(Option<String>, Option<String>), usize> = HashMap::new();

    for (venue, num_upcoming_shows) in venues {
        let key = (venue.city.clone(), venue.state.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            areas.push(VenueArea {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: Vec::new(),
            });
            areas.len() - 1
        });

        areas[slot].venues.push(VenueSummary {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows,
        });
    }

    areas
}

/// Case-insensitive substring search on the venue name. An empty term
/// matches every venue.
pub async fn search_by_name(db: &DatabaseConnection, term: &str) -> Result<SearchResults> {
    let mut select = venue::Entity::find();

    let term = term.trim();
    if !term.is_empty() {
        select = select.filter(name_contains(venue::Column::Name, term));
    }

    let data = select
        .select_only()
        .column(venue::Column::Id)
        .column(venue::Column::Name)
        .order_by_asc(venue::Column::Id)
        .into_model::<NamedRef>()
        .all(db)
        .await?;

    Ok(data.into())
}

/// A venue with its shows split into past and upcoming.
pub async fn detail(
    db: &DatabaseConnection,
    id: i32,
    now: DateTime<FixedOffset>,
) -> Result<VenueDetail> {
    let venue = venue::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

    let appearances = show::Entity::find()
        .select_only()
        .column(show::Column::ArtistId)
        .column_as(artist::Column::Name, "artist_name")
        .column_as(artist::Column::ImageLink, "artist_image_link")
        .column(show::Column::StartTime)
        .join(JoinType::InnerJoin, show::Relation::Artist.def())
        .filter(show::Column::VenueId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .into_model::<ArtistAppearance>()
        .all(db)
        .await?;

    let (past_shows, upcoming_shows) = timeline::partition(appearances, |a| &a.start_time, &now);

    Ok(VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}
