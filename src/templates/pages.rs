use maud::{html, Markup};

use super::components::{
    checkbox, entity_row, format_start_time, genre_select, genre_tags, image_or_placeholder,
    search_form, show_card, state_select, submit_button, text_input,
};
use super::layout::base_layout;
use crate::flash::Flash;
use crate::forms::{ArtistForm, ShowForm, VenueForm};
use crate::services::{
    artists::{ArtistDetail, ArtistSummary},
    shows::ShowListing,
    venues::{VenueArea, VenueDetail},
    SearchResults,
};

pub fn home_page(flash: Option<&Flash>) -> Markup {
    base_layout(
        "Home",
        flash,
        html! {
            div class="text-center py-16" {
                h1 class="text-4xl font-bold text-gray-900 mb-4" { "Fyyur" }
                p class="text-gray-600 mb-8" { "Find venues, artists and the shows that bring them together." }
                div class="flex justify-center flex-wrap gap-4" {
                    a href="/venues/create" class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white font-semibold rounded-md" { "Post a venue" }
                    a href="/artists/create" class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white font-semibold rounded-md" { "Post an artist" }
                    a href="/shows/create" class="px-4 py-2 bg-gray-700 hover:bg-gray-800 text-white font-semibold rounded-md" { "List a show" }
                }
            }
        },
    )
}

pub fn venues_page(flash: Option<&Flash>, areas: &[VenueArea]) -> Markup {
    base_layout(
        "Venues",
        flash,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { "Venues" }
            (search_form("/venues/search", "Find a venue", ""))

            @if areas.is_empty() {
                p class="text-gray-600" { "No venues listed yet." }
            }
            @for area in areas {
                section class="mb-8" {
                    h2 class="text-xl font-semibold text-gray-800 mb-3" {
                        (area.city.as_deref().unwrap_or("Unknown city")) ", "
                        (area.state.as_deref().unwrap_or("??"))
                    }
                    ul class="space-y-2" {
                        @for venue in &area.venues {
                            (entity_row(&format!("/venues/{}", venue.id), &venue.name, Some(venue.num_upcoming_shows)))
                        }
                    }
                }
            }
        },
    )
}

pub fn artists_page(flash: Option<&Flash>, artists: &[ArtistSummary]) -> Markup {
    base_layout(
        "Artists",
        flash,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { "Artists" }
            (search_form("/artists/search", "Find an artist", ""))

            @if artists.is_empty() {
                p class="text-gray-600" { "No artists listed yet." }
            } @else {
                ul class="space-y-2" {
                    @for artist in artists {
                        (entity_row(&format!("/artists/{}", artist.id), &artist.name, Some(artist.num_upcoming_shows)))
                    }
                }
            }
        },
    )
}

/// `kind` is the path segment of the searched listing: `venues` or `artists`.
pub fn search_results_page(kind: &str, term: &str, results: &SearchResults) -> Markup {
    let title = format!("Search {}", kind);
    base_layout(
        &title,
        None,
        html! {
            (search_form(&format!("/{}/search", kind), "Search again", term))
            h1 class="text-2xl font-bold text-gray-900 mb-4" {
                "Number of search results for \"" (term) "\": " (results.count)
            }
            ul class="space-y-2" {
                @for item in &results.data {
                    (entity_row(&format!("/{}/{}", kind, item.id), &item.name, None))
                }
            }
        },
    )
}

fn detail_field(label: &str, value: Option<&str>) -> Markup {
    html! {
        @if let Some(value) = value.filter(|v| !v.is_empty()) {
            div {
                dt class="text-sm font-medium text-gray-500" { (label) }
                dd class="mt-1 text-gray-900 break-all" { (value) }
            }
        }
    }
}

fn delete_button(path: &str, label: &str) -> Markup {
    html! {
        button
            class="px-4 py-2 bg-gray-700 hover:bg-gray-800 text-white font-semibold rounded-md"
            hx-delete=(path)
            hx-confirm="Its shows will be deleted too. Continue?" {
            (label)
        }
    }
}

pub fn venue_detail_page(flash: Option<&Flash>, detail: &VenueDetail) -> Markup {
    let venue = &detail.venue;
    base_layout(
        &venue.name,
        flash,
        html! {
            div class="flex flex-col md:flex-row gap-8" {
                div class="flex-grow" {
                    h1 class="text-3xl font-bold text-gray-900" { (venue.name) }
                    p class="text-sm text-gray-500 mb-4" { "ID: " (venue.id) }
                    (genre_tags(venue.genres.iter()))

                    dl class="space-y-4 mt-6" {
                        (detail_field("Address", venue.address.as_deref()))
                        (detail_field("City", venue.city.as_deref()))
                        (detail_field("State", venue.state.as_deref()))
                        (detail_field("Phone", venue.phone.as_deref()))
                        (detail_field("Website", venue.website.as_deref()))
                        (detail_field("Facebook", venue.facebook_link.as_deref()))
                    }

                    div class="mt-6" {
                        @if venue.seeking_talent {
                            div class="p-4 bg-green-50 rounded-md text-green-800" {
                                p class="font-semibold" { "Currently seeking talent" }
                                @if let Some(description) = &venue.seeking_description {
                                    p { (description) }
                                }
                            }
                        } @else {
                            p class="text-gray-500" { "Not currently seeking talent" }
                        }
                    }

                    div class="mt-6 flex gap-3" {
                        a href={(format!("/venues/{}/edit", venue.id))}
                          class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white font-semibold rounded-md" {
                            "Edit"
                        }
                        (delete_button(&format!("/venues/{}", venue.id), "Delete venue"))
                    }
                }
                div class="flex-shrink-0" {
                    img src=(image_or_placeholder(venue.image_link.as_deref())) alt=(venue.name)
                        class="w-full md:w-80 rounded-lg shadow-md";
                }
            }

            section class="mt-10" {
                h2 class="text-xl font-semibold mb-3" { (detail.upcoming_shows_count) " Upcoming Shows" }
                div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                    @for show in &detail.upcoming_shows {
                        (show_card(&format!("/artists/{}", show.artist_id), &show.artist_name,
                            show.artist_image_link.as_deref(), &show.start_time))
                    }
                }
            }

            section class="mt-10" {
                h2 class="text-xl font-semibold mb-3" { (detail.past_shows_count) " Past Shows" }
                div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                    @for show in &detail.past_shows {
                        (show_card(&format!("/artists/{}", show.artist_id), &show.artist_name,
                            show.artist_image_link.as_deref(), &show.start_time))
                    }
                }
            }
        },
    )
}

pub fn artist_detail_page(flash: Option<&Flash>, detail: &ArtistDetail) -> Markup {
    let artist = &detail.artist;
    base_layout(
        &artist.name,
        flash,
        html! {
            div class="flex flex-col md:flex-row gap-8" {
                div class="flex-grow" {
                    h1 class="text-3xl font-bold text-gray-900" { (artist.name) }
                    p class="text-sm text-gray-500 mb-4" { "ID: " (artist.id) }
                    (genre_tags(artist.genres.iter()))

                    dl class="space-y-4 mt-6" {
                        (detail_field("City", artist.city.as_deref()))
                        (detail_field("State", artist.state.as_deref()))
                        (detail_field("Phone", artist.phone.as_deref()))
                        (detail_field("Website", artist.website.as_deref()))
                        (detail_field("Facebook", artist.facebook_link.as_deref()))
                    }

                    div class="mt-6" {
                        @if artist.seeking_venue {
                            div class="p-4 bg-green-50 rounded-md text-green-800" {
                                p class="font-semibold" { "Currently seeking performance venues" }
                                @if let Some(description) = &artist.seeking_description {
                                    p { (description) }
                                }
                            }
                        } @else {
                            p class="text-gray-500" { "Not currently seeking performance venues" }
                        }
                    }

                    div class="mt-6 flex gap-3" {
                        a href={(format!("/artists/{}/edit", artist.id))}
                          class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white font-semibold rounded-md" {
                            "Edit"
                        }
                        (delete_button(&format!("/artists/{}", artist.id), "Delete artist"))
                    }
                }
                div class="flex-shrink-0" {
                    img src=(image_or_placeholder(artist.image_link.as_deref())) alt=(artist.name)
                        class="w-full md:w-80 rounded-lg shadow-md";
                }
            }

            section class="mt-10" {
                h2 class="text-xl font-semibold mb-3" { (detail.upcoming_shows_count) " Upcoming Shows" }
                div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                    @for show in &detail.upcoming_shows {
                        (show_card(&format!("/venues/{}", show.venue_id), &show.venue_name,
                            show.venue_image_link.as_deref(), &show.start_time))
                    }
                }
            }

            section class="mt-10" {
                h2 class="text-xl font-semibold mb-3" { (detail.past_shows_count) " Past Shows" }
                div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                    @for show in &detail.past_shows {
                        (show_card(&format!("/venues/{}", show.venue_id), &show.venue_name,
                            show.venue_image_link.as_deref(), &show.start_time))
                    }
                }
            }
        },
    )
}

pub fn shows_page(flash: Option<&Flash>, shows: &[ShowListing]) -> Markup {
    base_layout(
        "Shows",
        flash,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { "Shows" }
            @if shows.is_empty() {
                p class="text-gray-600" { "No shows listed yet." }
            }
            div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4" {
                @for show in shows {
                    div class="entity-card bg-white rounded-lg shadow-sm overflow-hidden transition" {
                        img src=(image_or_placeholder(show.artist_image_link.as_deref())) alt=(show.artist_name)
                            class="w-full h-48 object-cover" loading="lazy";
                        div class="p-4" {
                            p class="text-sm text-gray-500" { (format_start_time(&show.start_time)) }
                            a href={(format!("/artists/{}", show.artist_id))} class="block font-semibold text-gray-900 hover:underline" {
                                (show.artist_name)
                            }
                            p class="text-sm text-gray-600" {
                                "playing at "
                                a href={(format!("/venues/{}", show.venue_id))} class="hover:underline" { (show.venue_name) }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn form_shell(title: &str, action: &str, fields: Markup, submit_label: &str) -> Markup {
    html! {
        div class="max-w-2xl mx-auto bg-white rounded-lg shadow-sm p-6" {
            h1 class="text-2xl font-bold text-gray-900 mb-6" { (title) }
            form method="post" action=(action) class="space-y-4" {
                (fields)
                (submit_button(submit_label))
            }
        }
    }
}

pub fn venue_form_page(
    flash: Option<&Flash>,
    title: &str,
    action: &str,
    form: &VenueForm,
    submit_label: &str,
) -> Markup {
    let fields = html! {
        (text_input("Name", "name", &form.name, "text", true))
        div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
            (text_input("City", "city", &form.city, "text", true))
            (state_select(&form.state))
        }
        (text_input("Address", "address", &form.address, "text", true))
        (text_input("Phone", "phone", &form.phone, "tel", false))
        (genre_select(&form.genres))
        (text_input("Image Link", "image_link", &form.image_link, "url", false))
        (text_input("Facebook Link", "facebook_link", &form.facebook_link, "url", false))
        (text_input("Website Link", "website_link", &form.website_link, "url", false))
        (checkbox("Looking for Talent", "seeking_talent", form.seeking_talent))
        (text_input("Seeking Description", "seeking_description", &form.seeking_description, "text", false))
    };
    base_layout(title, flash, form_shell(title, action, fields, submit_label))
}

pub fn artist_form_page(
    flash: Option<&Flash>,
    title: &str,
    action: &str,
    form: &ArtistForm,
    submit_label: &str,
) -> Markup {
    let fields = html! {
        (text_input("Name", "name", &form.name, "text", true))
        div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
            (text_input("City", "city", &form.city, "text", true))
            (state_select(&form.state))
        }
        (text_input("Phone", "phone", &form.phone, "tel", false))
        (genre_select(&form.genres))
        (text_input("Image Link", "image_link", &form.image_link, "url", false))
        (text_input("Facebook Link", "facebook_link", &form.facebook_link, "url", false))
        (text_input("Website Link", "website_link", &form.website_link, "url", false))
        (checkbox("Looking for Venues", "seeking_venue", form.seeking_venue))
        (text_input("Seeking Description", "seeking_description", &form.seeking_description, "text", false))
    };
    base_layout(title, flash, form_shell(title, action, fields, submit_label))
}

pub fn show_form_page(flash: Option<&Flash>, form: &ShowForm) -> Markup {
    let fields = html! {
        (text_input("Artist ID", "artist_id", &form.artist_id, "number", true))
        (text_input("Venue ID", "venue_id", &form.venue_id, "number", true))
        (text_input("Start Time", "start_time", &form.start_time, "datetime-local", true))
    };
    base_layout(
        "List a show",
        flash,
        form_shell("List a new show", "/shows/create", fields, "Create Show"),
    )
}

pub fn not_found_page() -> Markup {
    base_layout(
        "Not Found",
        None,
        html! {
            div class="text-center py-16" {
                h1 class="text-5xl font-bold text-gray-900 mb-4" { "404" }
                p class="text-gray-600 mb-6" { "Sorry, the page you were looking for does not exist." }
                a href="/" class="text-red-600 hover:underline" { "Back to the home page" }
            }
        },
    )
}

pub fn server_error_page() -> Markup {
    base_layout(
        "Server Error",
        None,
        html! {
            div class="text-center py-16" {
                h1 class="text-5xl font-bold text-gray-900 mb-4" { "500" }
                p class="text-gray-600 mb-6" { "Something went wrong on our end. Please try again later." }
                a href="/" class="text-red-600 hover:underline" { "Back to the home page" }
            }
        },
    )
}
