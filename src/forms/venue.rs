use serde::Deserialize;

use super::{checkbox, required, Profile, ProfileFields, ValidationErrors};
use crate::db::entities::venue;

/// Venue submission as posted by the HTML form or the JSON API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: String,
    pub website_link: String,
    pub seeking_description: String,
    #[serde(deserialize_with = "checkbox")]
    pub seeking_talent: bool,
}

/// A validated venue: the shared profile plus venue-only fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueData {
    pub profile: Profile,
    pub address: String,
    pub seeking_talent: bool,
}

impl VenueForm {
    pub fn profile(&self) -> ProfileFields<'_> {
        ProfileFields {
            name: &self.name,
            city: &self.city,
            state: &self.state,
            phone: &self.phone,
            genres: &self.genres,
            facebook_link: &self.facebook_link,
            image_link: &self.image_link,
            website_link: &self.website_link,
            seeking_description: &self.seeking_description,
        }
    }

    pub fn validate(&self) -> Result<VenueData, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let profile = self.profile().validate(&mut errors);
        let address = required(&mut errors, "address", &self.address);

        match profile {
            Some(profile) if errors.is_empty() => Ok(VenueData {
                profile,
                address,
                seeking_talent: self.seeking_talent,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&venue::Model> for VenueForm {
    fn from(venue: &venue::Model) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone().unwrap_or_default(),
            state: venue.state.clone().unwrap_or_default(),
            address: venue.address.clone().unwrap_or_default(),
            phone: venue.phone.clone().unwrap_or_default(),
            genres: venue.genres.0.clone(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            website_link: venue.website.clone().unwrap_or_default(),
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent,
        }
    }
}
