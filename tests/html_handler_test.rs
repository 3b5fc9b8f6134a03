//! Integration tests for the server-rendered pages
//!
//! Drives the full application router: form posts, redirects with flash
//! notices, htmx deletes, the 404 fallback and the health check.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::Value;
use tower::util::ServiceExt;

use fyyur::create_router;
use fyyur::db::entities::{show, venue};
use fyyur::state::AppState;
use fyyur::test_utils::*;

fn app(state: &AppState) -> Router {
    create_router(state.clone())
}

async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// `name=value` of the flash cookie set by `response`
fn flash_cookie(response: &axum::response::Response) -> String {
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_home_page() {
    let state = setup_test_app_state().await;

    let response = app(&state).oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Post a venue"));
}

#[tokio::test]
async fn test_create_venue_form_post_redirects_with_notice() {
    let state = setup_test_app_state().await;
    let router = app(&state);

    let response = router
        .clone()
        .oneshot(form_post(
            "/venues/create",
            "name=The+Musical+Hop&city=San+Francisco&state=CA&address=1015+Folsom+Street\
             &phone=123-123-1234&genres=Jazz&genres=Reggae&genres=Swing&seeking_talent=y",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = flash_cookie(&response);
    assert!(cookie.starts_with("flash=success"));

    let stored = venue::Entity::find().all(&state.db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(
        stored[0].genres.0,
        vec!["Jazz".to_string(), "Reggae".to_string(), "Swing".to_string()]
    );
    assert!(stored[0].seeking_talent);

    // The next page shows the notice once
    let response = router
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().contains_key(header::SET_COOKIE));
    let page = body_text(response).await;
    assert!(page.contains("Venue The Musical Hop was successfully listed!"));
}

#[tokio::test]
async fn test_invalid_venue_form_is_rendered_again() {
    let state = setup_test_app_state().await;

    let response = app(&state)
        .oneshot(form_post(
            "/venues/create",
            "name=&city=Austin&state=TX&address=&genres=Jazz&phone=12345",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let page = body_text(response).await;
    assert!(page.contains("Venue could not be listed."));
    assert!(page.contains("value=\"Austin\""));
    assert_eq!(venue::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_venue_pages_render() {
    let state = setup_test_app_state().await;
    let now = test_now();
    let venue = create_test_venue(&state.db, "The Fillmore", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, artist.id, venue.id, now, Duration::hours(-1)).await;
    let router = app(&state);

    let listing = router.clone().oneshot(get("/venues")).await.unwrap();
    assert_eq!(listing.status(), StatusCode::OK);
    let page = body_text(listing).await;
    assert!(page.contains("San Francisco, CA"));
    assert!(page.contains("The Fillmore"));

    let detail = router
        .clone()
        .oneshot(get(&format!("/venues/{}", venue.id)))
        .await
        .unwrap();
    assert_eq!(detail.status(), StatusCode::OK);
    let page = body_text(detail).await;
    assert!(page.contains("1 Past Shows"));
    assert!(page.contains("0 Upcoming Shows"));

    let edit = router
        .oneshot(get(&format!("/venues/{}/edit", venue.id)))
        .await
        .unwrap();
    assert_eq!(edit.status(), StatusCode::OK);
    assert!(body_text(edit).await.contains("value=\"The Fillmore\""));
}

#[tokio::test]
async fn test_unknown_venue_redirects_to_listing() {
    let state = setup_test_app_state().await;

    let response = app(&state).oneshot(get("/venues/41")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/venues");
    assert!(flash_cookie(&response).starts_with("flash=error"));
}

#[tokio::test]
async fn test_unparseable_ids_render_404_page() {
    let state = setup_test_app_state().await;
    let router = app(&state);

    for uri in ["/venues/abc", "/artists/99999999999", "/venues/abc/edit"] {
        let response = router.clone().oneshot(get(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"), "{uri}: {content_type}");
        assert!(body_text(response).await.contains("404"), "{uri}");
    }
}

#[tokio::test]
async fn test_invalid_edit_of_missing_venue_redirects_to_listing() {
    let state = setup_test_app_state().await;

    let response = app(&state)
        .oneshot(form_post("/venues/99/edit", "name=&state=ZZ"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/venues");
    assert!(flash_cookie(&response).starts_with("flash=error"));
}

#[tokio::test]
async fn test_invalid_edit_keeps_artist_name_in_title() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;

    let response = app(&state)
        .oneshot(form_post(
            &format!("/artists/{}/edit", artist.id),
            "name=&city=San+Francisco&state=CA&genres=Rock",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Edit artist Guns N Petals"));
}

#[tokio::test]
async fn test_edit_venue_submission_redirects_to_detail() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let response = app(&state)
        .oneshot(form_post(
            &format!("/venues/{}/edit", venue.id),
            "name=The+Musical+Hop&city=Oakland&state=CA&address=1+Broadway&genres=Funk",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/venues/{}", venue.id));
    let stored = venue::Entity::find_by_id(venue.id)
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.city.as_deref(), Some("Oakland"));
    assert_eq!(stored.phone, None);
}

#[tokio::test]
async fn test_htmx_delete_uses_hx_redirect() {
    let state = setup_test_app_state().await;
    let now = test_now();
    let venue = create_test_venue(&state.db, "The Dueling Pianos Bar", "New York", "NY").await;
    let artist = create_test_artist(&state.db, "Matt Quevedo").await;
    create_test_show(&state.db, artist.id, venue.id, now, Duration::days(1)).await;

    let response = app(&state)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/venues/{}", venue.id))
                .header("HX-Request", "true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["hx-redirect"], "/venues");
    assert_eq!(venue::Entity::find().count(&state.db).await.unwrap(), 0);
    assert_eq!(show::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_plain_delete_of_missing_artist_redirects() {
    let state = setup_test_app_state().await;

    let response = app(&state)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/artists/8")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/artists");
    assert!(flash_cookie(&response).starts_with("flash=error"));
}

#[tokio::test]
async fn test_search_venues_page() {
    let state = setup_test_app_state().await;
    create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_venue(&state.db, "The Dueling Pianos Bar", "New York", "NY").await;

    let response = app(&state)
        .oneshot(form_post("/venues/search", "search_term=Music"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("The Musical Hop"));
    assert!(!page.contains("The Dueling Pianos Bar"));
}

#[tokio::test]
async fn test_create_artist_form_post() {
    let state = setup_test_app_state().await;

    let response = app(&state)
        .oneshot(form_post(
            "/artists/create",
            "name=Guns+N+Petals&city=San+Francisco&state=CA&genres=Rock&genres=hip-hop",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_show_form_post_with_missing_artist() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let response = app(&state)
        .oneshot(form_post(
            "/shows/create",
            &format!("artist_id=5&venue_id={}&start_time=2035-01-01T21%3A30", venue.id),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("artist 5 does not exist"));
    assert_eq!(show::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_show_form_post() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    let router = app(&state);

    let response = router
        .clone()
        .oneshot(form_post(
            "/shows/create",
            &format!(
                "artist_id={}&venue_id={}&start_time=2035-01-01+21%3A30%3A00",
                artist.id, venue.id
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = router.oneshot(get("/shows")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Guns N Petals"));
    assert!(page.contains("Mon Jan 1, 2035 9:30PM"));
}

#[tokio::test]
async fn test_unknown_path_renders_404_page() {
    let state = setup_test_app_state().await;

    let response = app(&state).oneshot(get("/nowhere")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("404"));
}

#[tokio::test]
async fn test_health_check() {
    let state = setup_test_app_state().await;

    let response = app(&state).oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}
