use chrono::{DateTime, FixedOffset};
use maud::{html, Markup};

use crate::db::enums::{Genre, State};

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-red-500";
const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300/1a1a1a/ffffff?text=Fyyur";

pub fn notification(message: &str, notification_type: &str) -> Markup {
    let (bg_color, text_color, icon) = match notification_type {
        "success" => ("bg-green-50", "text-green-800", "✓"),
        "error" => ("bg-red-50", "text-red-800", "✗"),
        _ => ("bg-gray-50", "text-gray-800", "•"),
    };

    html! {
        div class={(format!("p-4 rounded-md {} {}", bg_color, text_color))} role="alert" {
            div class="flex items-center" {
                span class="font-bold mr-2" { (icon) }
                span { (message) }
            }
        }
    }
}

pub fn format_start_time(start_time: &DateTime<FixedOffset>) -> String {
    start_time.format("%a %b %-d, %Y %-I:%M%p").to_string()
}

pub fn image_or_placeholder(link: Option<&str>) -> &str {
    link.filter(|l| !l.is_empty()).unwrap_or(PLACEHOLDER_IMAGE)
}

pub fn genre_tags<'a>(genres: impl IntoIterator<Item = &'a str>) -> Markup {
    html! {
        div class="flex flex-wrap gap-2" {
            @for genre in genres {
                span class="px-2 py-1 bg-gray-100 text-gray-700 text-sm rounded" { (genre) }
            }
        }
    }
}

/// Link row used by listings and search results.
pub fn entity_row(href: &str, name: &str, upcoming: Option<usize>) -> Markup {
    html! {
        li {
            a href=(href) class="entity-card flex justify-between items-center bg-white rounded-lg shadow-sm px-4 py-3 transition" {
                span class="font-medium text-gray-900" { (name) }
                @if let Some(count) = upcoming {
                    span class="text-xs text-gray-500" {
                        (count) " upcoming " (if count == 1 { "show" } else { "shows" })
                    }
                }
            }
        }
    }
}

pub fn search_form(action: &str, placeholder: &str, term: &str) -> Markup {
    html! {
        form method="post" action=(action) class="flex gap-2 mb-6" {
            input type="search" name="search_term" value=(term) placeholder=(placeholder) class=(INPUT_CLASS);
            button type="submit" class="bg-red-600 hover:bg-red-700 text-white font-semibold py-2 px-4 rounded-md" {
                "Search"
            }
        }
    }
}

/// One show as a card: the counterpart's image and name plus the start time.
pub fn show_card(href: &str, name: &str, image_link: Option<&str>, start_time: &DateTime<FixedOffset>) -> Markup {
    html! {
        a href=(href) class="entity-card flex items-center gap-4 bg-white rounded-lg shadow-sm p-3 transition" {
            img src=(image_or_placeholder(image_link)) alt=(name) class="w-16 h-16 rounded object-cover" loading="lazy";
            div {
                p class="font-semibold text-gray-900" { (name) }
                p class="text-sm text-gray-600" { (format_start_time(start_time)) }
            }
        }
    }
}

pub fn text_input(label: &str, name: &str, value: &str, input_type: &str, required: bool) -> Markup {
    html! {
        div {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            input type=(input_type) id=(name) name=(name) value=(value) required[required] class=(INPUT_CLASS);
        }
    }
}

pub fn state_select(selected: &str) -> Markup {
    html! {
        div {
            label for="state" class="block text-sm font-medium text-gray-700 mb-2" { "State" }
            select id="state" name="state" required class=(INPUT_CLASS) {
                option value="" { "Choose a state" }
                @for state in State::ALL {
                    option value=(state.as_str()) selected[state.as_str().eq_ignore_ascii_case(selected)] {
                        (state.as_str())
                    }
                }
            }
        }
    }
}

pub fn genre_select(selected: &[String]) -> Markup {
    html! {
        div {
            label for="genres" class="block text-sm font-medium text-gray-700 mb-2" { "Genres" }
            select id="genres" name="genres" multiple required class=(INPUT_CLASS) {
                @for genre in Genre::ALL {
                    option value=(genre.as_str())
                        selected[selected.iter().any(|s| s.eq_ignore_ascii_case(genre.as_str()))] {
                        (genre.as_str())
                    }
                }
            }
            p class="text-xs text-gray-500 mt-1" { "Ctrl+Click to select multiple" }
        }
    }
}

pub fn checkbox(label: &str, name: &str, checked: bool) -> Markup {
    html! {
        div class="flex items-center gap-2" {
            input type="checkbox" id=(name) name=(name) value="y" checked[checked];
            label for=(name) class="text-sm font-medium text-gray-700" { (label) }
        }
    }
}

pub fn submit_button(label: &str) -> Markup {
    html! {
        button type="submit" class="w-full bg-red-600 hover:bg-red-700 text-white font-semibold py-2 px-4 rounded-md transition" {
            (label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn start_time_formatting() {
        let time = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap().fixed_offset();
        assert_eq!(format_start_time(&time), "Tue May 21, 2019 9:30PM");
    }

    #[test]
    fn placeholder_for_missing_images() {
        assert_eq!(image_or_placeholder(None), PLACEHOLDER_IMAGE);
        assert_eq!(image_or_placeholder(Some("")), PLACEHOLDER_IMAGE);
        assert_eq!(image_or_placeholder(Some("https://img/x.png")), "https://img/x.png");
    }

    #[test]
    fn genre_select_marks_selection() {
        let markup = genre_select(&["jazz".to_string()]).into_string();
        assert!(markup.contains(r#"<option value="Jazz" selected>"#));
        assert!(!markup.contains(r#"<option value="Rock" selected>"#));
    }
}
