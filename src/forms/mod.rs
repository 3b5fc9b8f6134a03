//! Form validation for venue, artist and show submissions.
//!
//! Venue and artist forms share a profile section. Each form borrows its shared
//! fields as a [`ProfileFields`] view, validates them into a [`Profile`], and
//! adds its own extras on top. Every violated rule is collected into
//! [`ValidationErrors`] before anything is returned.

pub mod artist;
pub mod show;
pub mod venue;

pub use artist::{ArtistData, ArtistForm};
pub use show::{ShowData, ShowForm};
pub use venue::{VenueData, VenueForm};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::db::enums::{Genre, State};

pub const REQUIRED: &str = "This field is required.";

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{10}|[0-9]{3}[-. ][0-9]{3}[-. ][0-9]{4})$")
        .expect("phone pattern compiles")
});

/// Violated rules keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| (*field, m.as_str())))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Shared fields of the venue and artist forms, borrowed from the submission.
pub struct ProfileFields<'a> {
    pub name: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub phone: &'a str,
    pub genres: &'a [String],
    pub facebook_link: &'a str,
    pub image_link: &'a str,
    pub website_link: &'a str,
    pub seeking_description: &'a str,
}

/// Validated profile section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub city: String,
    pub state: State,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_description: Option<String>,
}

impl Profile {
    pub fn genre_labels(&self) -> Vec<String> {
        self.genres.iter().copied().map(String::from).collect()
    }
}

impl ProfileFields<'_> {
    /// Returns the profile only when none of its fields failed.
    pub fn validate(&self, errors: &mut ValidationErrors) -> Option<Profile> {
        let before = errors.len();

        let name = required(errors, "name", self.name);
        let city = required(errors, "city", self.city);
        let state = state(errors, self.state);
        let phone = phone(errors, self.phone);
        let genres = genres(errors, self.genres);
        let facebook_link = url(errors, "facebook_link", self.facebook_link);
        let image_link = url(errors, "image_link", self.image_link);
        let website = url(errors, "website_link", self.website_link);
        let seeking_description = optional(self.seeking_description);

        if errors.len() > before {
            return None;
        }

        Some(Profile {
            name,
            city,
            state: state?,
            phone,
            genres,
            facebook_link,
            image_link,
            website,
            seeking_description,
        })
    }
}

pub(crate) fn required(errors: &mut ValidationErrors, field: &'static str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    }
    value.to_string()
}

pub(crate) fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn state(errors: &mut ValidationErrors, value: &str) -> Option<State> {
    if value.trim().is_empty() {
        errors.add("state", REQUIRED);
        return None;
    }
    let state = State::from_str(value);
    if state.is_none() {
        errors.add("state", "Invalid state.");
    }
    state
}

fn phone(errors: &mut ValidationErrors, value: &str) -> Option<String> {
    let phone = optional(value)?;
    if !PHONE_PATTERN.is_match(&phone) {
        errors.add(
            "phone",
            "Invalid phone number format. Expected formats: 1234567890, 123-456-7890, 123.456.7890, or 123 456 7890.",
        );
    }
    Some(phone)
}

fn genres(errors: &mut ValidationErrors, values: &[String]) -> Vec<Genre> {
    let submitted: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();

    if submitted.is_empty() {
        errors.add("genres", REQUIRED);
        return Vec::new();
    }

    let mut genres = Vec::with_capacity(submitted.len());
    let mut invalid = Vec::new();
    for value in submitted {
        match Genre::from_str(value) {
            Some(genre) if !genres.contains(&genre) => genres.push(genre),
            Some(_) => {}
            None => invalid.push(value),
        }
    }

    if !invalid.is_empty() {
        errors.add("genres", format!("Invalid genres: {}.", invalid.join(", ")));
    }
    genres
}

fn url(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<String> {
    let link = optional(value)?;
    let valid = url::Url::parse(&link)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some())
        .unwrap_or(false);
    if !valid {
        errors.add(field, "Invalid URL.");
    }
    Some(link)
}

/// Checkbox fields: absent means false, browsers send `y` or `on` when ticked,
/// JSON clients send a boolean.
pub(crate) fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Checkbox {
        Flag(bool),
        Text(String),
    }

    Ok(match Checkbox::deserialize(deserializer)? {
        Checkbox::Flag(flag) => flag,
        Checkbox::Text(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "y" | "yes" | "on" | "true" | "1"
        ),
    })
}
