use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form, WithRejection};
use maud::Markup;
use sea_orm::EntityTrait;

use super::SearchRequest;
use crate::{
    db::{
        entities::{artist, venue},
        repositories::{ArtistRepository, ShowRepository, VenueRepository},
    },
    error::{AppError, PageResult},
    flash::{self, Flash},
    forms::{ArtistForm, ShowForm, VenueForm},
    services::{artists, shows, timeline, venues},
    state::AppState,
    templates::{
        artist_detail_page, artist_form_page, artists_page, home_page, not_found_page,
        search_results_page, show_form_page, shows_page, venue_detail_page, venue_form_page,
        venues_page,
    },
};

/// Renders a page, consuming any pending notice.
fn render(jar: CookieJar, page: impl FnOnce(Option<&Flash>) -> Markup) -> (CookieJar, Html<String>) {
    let (jar, notice) = flash::take(jar);
    let markup = page(notice.as_ref());
    (jar, Html(markup.into_string()))
}

/// 303 to `target` carrying `notice` for the next page.
fn redirect(jar: CookieJar, target: &str, notice: Flash) -> Response {
    (flash::push(jar, notice), Redirect::to(target)).into_response()
}

/// htmx follows `HX-Redirect` itself; a plain 303 would only swap the body.
fn redirect_after_delete(headers: &HeaderMap, jar: CookieJar, target: &str, notice: Flash) -> Response {
    let jar = flash::push(jar, notice);
    if headers.contains_key("hx-request") {
        (StatusCode::OK, jar, [("HX-Redirect", target.to_string())]).into_response()
    } else {
        (jar, Redirect::to(target)).into_response()
    }
}

/// Re-renders a rejected form with its input intact.
fn rejected_form(markup: Markup) -> Response {
    (StatusCode::BAD_REQUEST, Html(markup.into_string())).into_response()
}

pub async fn index(jar: CookieJar) -> (CookieJar, Html<String>) {
    render(jar, home_page)
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    not_found_response()
}

fn not_found_response() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(not_found_page().into_string()))
}

/// An id segment that does not parse as a row id gets the 404 page.
#[derive(Debug)]
pub struct UnknownPage;

impl From<PathRejection> for UnknownPage {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Unroutable id: {}", rejection.body_text());
        Self
    }
}

impl IntoResponse for UnknownPage {
    fn into_response(self) -> Response {
        not_found_response().into_response()
    }
}

type PageId = WithRejection<Path<i32>, UnknownPage>;

// ============================================================================
// Venues
// ============================================================================

pub async fn venues(
    State(state): State<AppState>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let areas = venues::grouped_by_location(&state.db, timeline::now()).await?;
    Ok(render(jar, |notice| venues_page(notice, &areas)))
}

pub async fn search_venues(
    State(state): State<AppState>,
    Form(request): Form<SearchRequest>,
) -> PageResult<Html<String>> {
    let results = venues::search_by_name(&state.db, &request.search_term).await?;
    Ok(Html(
        search_results_page("venues", &request.search_term, &results).into_string(),
    ))
}

pub async fn show_venue(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PageId,
    jar: CookieJar,
) -> PageResult<Response> {
    match venues::detail(&state.db, id, timeline::now()).await {
        Ok(detail) => Ok(render(jar, |notice| venue_detail_page(notice, &detail)).into_response()),
        Err(e) if e.is_not_found() => Ok(venue_not_found(jar, id)),
        Err(e) => Err(e.into()),
    }
}

fn venue_not_found(jar: CookieJar, id: i32) -> Response {
    redirect(
        jar,
        "/venues",
        Flash::error(format!("Venue with ID {} not found.", id)),
    )
}

pub async fn create_venue_form(jar: CookieJar) -> (CookieJar, Html<String>) {
    render(jar, |notice| {
        venue_form_page(notice, "List a new venue", "/venues/create", &VenueForm::default(), "Create Venue")
    })
}

pub async fn create_venue_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> Response {
    let data = match form.validate() {
        Ok(data) => data,
        Err(errors) => {
            let notice = Flash::error(format!("Venue could not be listed. {}", errors));
            return rejected_form(venue_form_page(
                Some(&notice),
                "List a new venue",
                "/venues/create",
                &form,
                "Create Venue",
            ));
        }
    };

    match VenueRepository::new(state.db.clone()).create(data).await {
        Ok(venue) => redirect(
            jar,
            "/",
            Flash::success(format!("Venue {} was successfully listed!", venue.name)),
        ),
        Err(e) => {
            tracing::error!("Failed to create venue '{}': {}", form.name, e);
            redirect(
                jar,
                "/venues/create",
                Flash::error(format!(
                    "An error occurred. Venue {} could not be listed.",
                    form.name
                )),
            )
        }
    }
}

pub async fn edit_venue_form(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PageId,
    jar: CookieJar,
) -> PageResult<Response> {
    let Some(venue) = venue::Entity::find_by_id(id).one(&state.db).await? else {
        return Ok(venue_not_found(jar, id));
    };

    let title = format!("Edit venue {}", venue.name);
    let action = format!("/venues/{}/edit", id);
    let form = VenueForm::from(&venue);
    Ok(render(jar, |notice| venue_form_page(notice, &title, &action, &form, "Save Changes")).into_response())
}

pub async fn edit_venue_submission(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PageId,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> PageResult<Response> {
    let Some(venue) = venue::Entity::find_by_id(id).one(&state.db).await? else {
        return Ok(venue_not_found(jar, id));
    };

    let action = format!("/venues/{}/edit", id);
    let data = match form.validate() {
        Ok(data) => data,
        Err(errors) => {
            let notice = Flash::error(format!("Venue could not be updated. {}", errors));
            return Ok(rejected_form(venue_form_page(
                Some(&notice),
                &format!("Edit venue {}", venue.name),
                &action,
                &form,
                "Save Changes",
            )));
        }
    };

    let response = match VenueRepository::new(state.db.clone()).update(id, data).await {
        Ok(venue) => redirect(
            jar,
            &format!("/venues/{}", id),
            Flash::success(format!("Venue {} was successfully updated!", venue.name)),
        ),
        Err(e) if e.is_not_found() => venue_not_found(jar, id),
        Err(e) => {
            tracing::error!(venue_id = id, "Failed to update venue: {}", e);
            redirect(
                jar,
                &action,
                Flash::error("An error occurred. Venue could not be updated."),
            )
        }
    };
    Ok(response)
}

pub async fn delete_venue(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PageId,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let notice = match VenueRepository::new(state.db.clone()).delete(id).await {
        Ok(venue) => Flash::success(format!("Venue {} was successfully deleted!", venue.name)),
        Err(AppError::NotFound(_)) => Flash::error(format!("Venue with ID {} not found.", id)),
        Err(e) => {
            tracing::error!(venue_id = id, "Failed to delete venue: {}", e);
            Flash::error("An error occurred. Venue could not be deleted.")
        }
    };
    redirect_after_delete(&headers, jar, "/venues", notice)
}

// ============================================================================
// Artists
// ============================================================================

pub async fn artists(
    State(state): State<AppState>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let artists = artists::list(&state.db, timeline::now()).await?;
    Ok(render(jar, |notice| artists_page(notice, &artists)))
}

pub async fn search_artists(
    State(state): State<AppState>,
    Form(request): Form<SearchRequest>,
) -> PageResult<Html<String>> {
    let results = artists::search_by_name(&state.db, &request.search_term).await?;
    Ok(Html(
        search_results_page("artists", &request.search_term, &results).into_string(),
    ))
}

pub async fn show_artist(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PageId,
    jar: CookieJar,
) -> PageResult<Response> {
    match artists::detail(&state.db, id, timeline::now()).await {
        Ok(detail) => Ok(render(jar, |notice| artist_detail_page(notice, &detail)).into_response()),
        Err(e) if e.is_not_found() => Ok(artist_not_found(jar, id)),
        Err(e) => Err(e.into()),
    }
}

fn artist_not_found(jar: CookieJar, id: i32) -> Response {
    redirect(
        jar,
        "/artists",
        Flash::error(format!("Artist with ID {} not found.", id)),
    )
}

pub async fn create_artist_form(jar: CookieJar) -> (CookieJar, Html<String>) {
    render(jar, |notice| {
        artist_form_page(notice, "List a new artist", "/artists/create", &ArtistForm::default(), "Create Artist")
    })
}

pub async fn create_artist_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> Response {
    let data = match form.validate() {
        Ok(data) => data,
        Err(errors) => {
            let notice = Flash::error(format!("Artist could not be listed. {}", errors));
            return rejected_form(artist_form_page(
                Some(&notice),
                "List a new artist",
                "/artists/create",
                &form,
                "Create Artist",
            ));
        }
    };

    match ArtistRepository::new(state.db.clone()).create(data).await {
        Ok(artist) => redirect(
            jar,
            "/",
            Flash::success(format!("Artist {} was successfully listed!", artist.name)),
        ),
        Err(e) => {
            tracing::error!("Failed to create artist '{}': {}", form.name, e);
            redirect(
                jar,
                "/artists/create",
                Flash::error(format!(
                    "An error occurred. Artist {} could not be listed.",
                    form.name
                )),
            )
        }
    }
}

pub async fn edit_artist_form(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PageId,
    jar: CookieJar,
) -> PageResult<Response> {
    let Some(artist) = artist::Entity::find_by_id(id).one(&state.db).await? else {
        return Ok(artist_not_found(jar, id));
    };

    let title = format!("Edit artist {}", artist.name);
    let action = format!("/artists/{}/edit", id);
    let form = ArtistForm::from(&artist);
    Ok(render(jar, |notice| artist_form_page(notice, &title, &action, &form, "Save Changes")).into_response())
}

pub async fn edit_artist_submission(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PageId,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> PageResult<Response> {
    let Some(artist) = artist::Entity::find_by_id(id).one(&state.db).await? else {
        return Ok(artist_not_found(jar, id));
    };

    let action = format!("/artists/{}/edit", id);
    let data = match form.validate() {
        Ok(data) => data,
        Err(errors) => {
            let notice = Flash::error(format!("Artist could not be updated. {}", errors));
            return Ok(rejected_form(artist_form_page(
                Some(&notice),
                &format!("Edit artist {}", artist.name),
                &action,
                &form,
                "Save Changes",
            )));
        }
    };

    let response = match ArtistRepository::new(state.db.clone()).update(id, data).await {
        Ok(artist) => redirect(
            jar,
            &format!("/artists/{}", id),
            Flash::success(format!("Artist {} was successfully updated!", artist.name)),
        ),
        Err(e) if e.is_not_found() => artist_not_found(jar, id),
        Err(e) => {
            tracing::error!(artist_id = id, "Failed to update artist: {}", e);
            redirect(
                jar,
                &action,
                Flash::error("An error occurred. Artist could not be updated."),
            )
        }
    };
    Ok(response)
}

pub async fn delete_artist(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PageId,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let notice = match ArtistRepository::new(state.db.clone()).delete(id).await {
        Ok(artist) => Flash::success(format!("Artist {} was successfully deleted!", artist.name)),
        Err(AppError::NotFound(_)) => Flash::error(format!("Artist with ID {} not found.", id)),
        Err(e) => {
            tracing::error!(artist_id = id, "Failed to delete artist: {}", e);
            Flash::error("An error occurred. Artist could not be deleted.")
        }
    };
    redirect_after_delete(&headers, jar, "/artists", notice)
}

// ============================================================================
// Shows
// ============================================================================

pub async fn shows(
    State(state): State<AppState>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let shows = shows::list(&state.db).await?;
    Ok(render(jar, |notice| shows_page(notice, &shows)))
}

pub async fn create_show_form(jar: CookieJar) -> (CookieJar, Html<String>) {
    render(jar, |notice| show_form_page(notice, &ShowForm::default()))
}

pub async fn create_show_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ShowForm>,
) -> Response {
    let data = match form.validate() {
        Ok(data) => data,
        Err(errors) => {
            let notice = Flash::error(format!("Show could not be listed. {}", errors));
            return rejected_form(show_form_page(Some(&notice), &form));
        }
    };

    match ShowRepository::new(state.db.clone()).create(data).await {
        Ok(_) => redirect(jar, "/", Flash::success("Show was successfully listed!")),
        Err(AppError::InvalidReference(reason)) => {
            let notice = Flash::error(format!("Show could not be listed: {}.", reason));
            rejected_form(show_form_page(Some(&notice), &form))
        }
        Err(e) => {
            tracing::error!("Failed to create show: {}", e);
            redirect(
                jar,
                "/shows/create",
                Flash::error("An error occurred. Show could not be listed."),
            )
        }
    }
}
