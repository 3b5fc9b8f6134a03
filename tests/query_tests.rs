//! Query layer integration tests
//!
//! Exercises grouping, search and the past/upcoming partition against a real
//! (in-memory) database, with "now" pinned by the test.

use std::collections::HashSet;

use chrono::Duration;
use fake::{faker::company::en::CompanyName, Fake};
use pretty_assertions::assert_eq;

use fyyur::services::{artists, shows, venues};
use fyyur::test_utils::*;

#[tokio::test]
async fn test_every_venue_lands_in_exactly_one_area() {
    let db = setup_test_db().await;
    let now = test_now();
    let locations = [
        ("San Francisco", "CA"),
        ("New York", "NY"),
        ("San Francisco", "CA"),
        ("Portland", "OR"),
        ("Portland", "ME"),
        ("New York", "NY"),
    ];

    let mut ids = HashSet::new();
    for (city, state) in locations {
        let name: String = CompanyName().fake();
        ids.insert(create_test_venue(&db, &name, city, state).await.id);
    }

    let areas = venues::grouped_by_location(&db, now).await.unwrap();

    assert_eq!(areas.len(), 4);
    let mut seen = HashSet::new();
    for area in &areas {
        for venue in &area.venues {
            assert!(seen.insert(venue.id), "venue {} listed twice", venue.id);
        }
    }
    assert_eq!(seen, ids);

    let keys: Vec<(Option<&str>, Option<&str>)> = areas
        .iter()
        .map(|a| (a.city.as_deref(), a.state.as_deref()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (Some("San Francisco"), Some("CA")),
            (Some("New York"), Some("NY")),
            (Some("Portland"), Some("OR")),
            (Some("Portland"), Some("ME")),
        ]
    );
}

#[tokio::test]
async fn test_grouped_listing_counts_upcoming_only() {
    let db = setup_test_db().await;
    let now = test_now();
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    create_test_show(&db, artist.id, venue.id, now, Duration::days(-2)).await;
    create_test_show(&db, artist.id, venue.id, now, Duration::days(2)).await;
    create_test_show(&db, artist.id, venue.id, now, Duration::zero()).await;

    let areas = venues::grouped_by_location(&db, now).await.unwrap();

    assert_eq!(areas[0].venues[0].num_upcoming_shows, 2);
}

#[tokio::test]
async fn test_fillmore_show_an_hour_ago_is_past() {
    let db = setup_test_db().await;
    let now = test_now();
    let venue = create_test_venue(&db, "The Fillmore", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    create_test_show(&db, artist.id, venue.id, now, Duration::hours(-1)).await;

    let detail = venues::detail(&db, venue.id, now).await.unwrap();

    assert_eq!(detail.past_shows_count, 1);
    assert_eq!(detail.upcoming_shows_count, 0);
    assert_eq!(detail.past_shows[0].artist_name, "Guns N Petals");
    assert_eq!(detail.past_shows[0].start_time, now - Duration::hours(1));
}

#[tokio::test]
async fn test_show_exactly_at_now_is_upcoming_everywhere() {
    let db = setup_test_db().await;
    let now = test_now();
    let venue = create_test_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
    let artist = create_test_artist(&db, "Matt Quevedo").await;
    create_test_show_at(&db, artist.id, venue.id, now).await;

    let venue_detail = venues::detail(&db, venue.id, now).await.unwrap();
    let artist_detail = artists::detail(&db, artist.id, now).await.unwrap();
    let areas = venues::grouped_by_location(&db, now).await.unwrap();
    let listing = artists::list(&db, now).await.unwrap();

    assert_eq!(venue_detail.upcoming_shows_count, 1);
    assert_eq!(venue_detail.past_shows_count, 0);
    assert_eq!(artist_detail.upcoming_shows_count, 1);
    assert_eq!(areas[0].venues[0].num_upcoming_shows, 1);
    assert_eq!(listing[0].num_upcoming_shows, 1);
}

#[tokio::test]
async fn test_every_show_is_either_past_or_upcoming() {
    let db = setup_test_db().await;
    let now = test_now();
    let venue = create_test_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "The Wild Sax Band").await;

    let offsets = [-30, -1, 0, 1, 30];
    for minutes in offsets {
        create_test_show(&db, artist.id, venue.id, now, Duration::minutes(minutes)).await;
    }

    let detail = venues::detail(&db, venue.id, now).await.unwrap();

    assert_eq!(
        detail.past_shows_count + detail.upcoming_shows_count,
        offsets.len()
    );
    assert!(detail.past_shows.iter().all(|s| s.start_time < now));
    assert!(detail.upcoming_shows.iter().all(|s| s.start_time >= now));
    assert_eq!(detail.past_shows_count, 2);

    // Each partition stays in start-time order
    let upcoming: Vec<_> = detail.upcoming_shows.iter().map(|s| s.start_time).collect();
    let mut sorted = upcoming.clone();
    sorted.sort();
    assert_eq!(upcoming, sorted);
}

#[tokio::test]
async fn test_artist_detail_lists_venues() {
    let db = setup_test_db().await;
    let now = test_now();
    let hop = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let bar = create_test_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
    let artist = create_test_artist(&db, "The Wild Sax Band").await;
    create_test_show(&db, artist.id, bar.id, now, Duration::days(7)).await;
    create_test_show(&db, artist.id, hop.id, now, Duration::days(-7)).await;

    let detail = artists::detail(&db, artist.id, now).await.unwrap();

    assert_eq!(detail.artist.name, "The Wild Sax Band");
    assert_eq!(detail.past_shows[0].venue_name, "The Musical Hop");
    assert_eq!(detail.upcoming_shows[0].venue_id, bar.id);
}

#[tokio::test]
async fn test_detail_of_missing_rows_is_not_found() {
    let db = setup_test_db().await;
    let now = test_now();

    assert!(venues::detail(&db, 1, now).await.unwrap_err().is_not_found());
    assert!(artists::detail(&db, 1, now).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let db = setup_test_db().await;
    create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    create_test_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;

    let hop = venues::search_by_name(&db, "Hop").await.unwrap();
    let music = venues::search_by_name(&db, "MUSIC").await.unwrap();
    let everything = venues::search_by_name(&db, "   ").await.unwrap();
    let nothing = venues::search_by_name(&db, "zzz-no-match").await.unwrap();

    assert_eq!(hop.count, 1);
    assert_eq!(hop.data[0].name, "The Musical Hop");
    assert_eq!(
        music.data.iter().map(|v| v.id).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(everything.count, 3);
    assert_eq!(nothing.count, 0);
    assert!(nothing.data.is_empty());
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let db = setup_test_db().await;
    create_test_artist(&db, "Guns N Petals").await;
    create_test_artist(&db, "100% Pure").await;

    let percent = artists::search_by_name(&db, "%").await.unwrap();
    let underscore = artists::search_by_name(&db, "_").await.unwrap();
    let band = artists::search_by_name(&db, "a").await.unwrap();

    assert_eq!(percent.count, 1);
    assert_eq!(percent.data[0].name, "100% Pure");
    assert_eq!(underscore.count, 0);
    assert_eq!(band.count, 1);
}

#[tokio::test]
async fn test_show_listing_is_ordered_by_start_time() {
    let db = setup_test_db().await;
    let now = test_now();
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let guns = create_test_artist(&db, "Guns N Petals").await;
    let sax = create_test_artist(&db, "The Wild Sax Band").await;
    let later = create_test_show(&db, guns.id, venue.id, now, Duration::days(10)).await;
    let earlier = create_test_show(&db, sax.id, venue.id, now, Duration::days(-10)).await;

    let listing = shows::list(&db).await.unwrap();

    assert_eq!(
        listing.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![earlier.id, later.id]
    );
    assert_eq!(listing[0].artist_name, "The Wild Sax Band");
    assert_eq!(listing[0].venue_name, "The Musical Hop");
    assert_eq!(
        listing[1].artist_image_link.as_deref(),
        Some("https://images.example.com/artist.jpg")
    );
}
