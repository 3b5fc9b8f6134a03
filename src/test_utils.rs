//! Test utilities for Fyyur
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories
//! - Test data generators

use chrono::{DateTime, Duration, FixedOffset};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::{
    db::entities::{artist, show, venue, GenreList},
    services::timeline,
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state() -> AppState {
    AppState::new(setup_test_db().await)
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test venue in the database
pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venue::Model {
    let venue = venue::ActiveModel {
        name: Set(name.to_string()),
        city: Set(Some(city.to_string())),
        state: Set(Some(state.to_string())),
        address: Set(Some("1015 Folsom Street".to_string())),
        phone: Set(Some("123-123-1234".to_string())),
        image_link: Set(None),
        facebook_link: Set(None),
        website: Set(None),
        genres: Set(GenreList(vec!["Jazz".to_string(), "Folk".to_string()])),
        seeking_talent: Set(false),
        seeking_description: Set(None),
        ..Default::default()
    };

    venue.insert(db).await.expect("Failed to insert test venue")
}

/// Create a test artist in the database
pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    let artist = artist::ActiveModel {
        name: Set(name.to_string()),
        city: Set(Some("San Francisco".to_string())),
        state: Set(Some("CA".to_string())),
        phone: Set(None),
        image_link: Set(Some("https://images.example.com/artist.jpg".to_string())),
        facebook_link: Set(None),
        website: Set(None),
        genres: Set(GenreList(vec!["Rock".to_string()])),
        seeking_venue: Set(false),
        seeking_description: Set(None),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

/// Create a test show starting `offset` away from `now` (negative = past)
pub async fn create_test_show(
    db: &DatabaseConnection,
    artist_id: i32,
    venue_id: i32,
    now: DateTime<FixedOffset>,
    offset: Duration,
) -> show::Model {
    create_test_show_at(db, artist_id, venue_id, now + offset).await
}

/// Create a test show at an exact start time
pub async fn create_test_show_at(
    db: &DatabaseConnection,
    artist_id: i32,
    venue_id: i32,
    start_time: DateTime<FixedOffset>,
) -> show::Model {
    let show = show::ActiveModel {
        artist_id: Set(artist_id),
        venue_id: Set(venue_id),
        start_time: Set(start_time),
        ..Default::default()
    };

    show.insert(db).await.expect("Failed to insert test show")
}

/// Current time, truncated to whole seconds so it survives a database round trip
pub fn test_now() -> DateTime<FixedOffset> {
    let now = timeline::now();
    now - Duration::nanoseconds(i64::from(now.timestamp_subsec_nanos()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        let venues = venue::Entity::find().all(&db).await.unwrap();
        assert_eq!(venues.len(), 0);
    }

    #[tokio::test]
    async fn test_create_test_show() {
        let db = setup_test_db().await;
        let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = create_test_artist(&db, "Guns N Petals").await;
        let now = test_now();
        let show = create_test_show(&db, artist.id, venue.id, now, Duration::hours(2)).await;

        assert_eq!(show.artist_id, artist.id);
        assert_eq!(show.venue_id, venue.id);
        assert_eq!(show.start_time, now + Duration::hours(2));
    }

    #[tokio::test]
    async fn test_parallel_databases() {
        let (db1, db2) = tokio::join!(setup_test_db(), setup_test_db());

        let venue1 = create_test_venue(&db1, "Venue 1", "Austin", "TX").await;
        let venue2 = create_test_venue(&db2, "Venue 2", "Austin", "TX").await;

        // Separate databases, separate id sequences
        assert_eq!(venue1.id, 1);
        assert_eq!(venue2.id, 1);

        let db1_venues = venue::Entity::find().all(&db1).await.unwrap();
        let db2_venues = venue::Entity::find().all(&db2).await.unwrap();
        assert_eq!(db1_venues.len(), 1);
        assert_eq!(db2_venues[0].name, "Venue 2");
    }
}
