use serde::Deserialize;

use super::{checkbox, Profile, ProfileFields, ValidationErrors};
use crate::db::entities::artist;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: String,
    pub website_link: String,
    pub seeking_description: String,
    #[serde(deserialize_with = "checkbox")]
    pub seeking_venue: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistData {
    pub profile: Profile,
    pub seeking_venue: bool,
}

impl ArtistForm {
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

    pub fn validate(&self) -> Result<ArtistData, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        match self.profile().validate(&mut errors) {
            Some(profile) => Ok(ArtistData {
                profile,
                seeking_venue: self.seeking_venue,
            }),
            None => Err(errors),
        }
    }
}

impl From<&artist::Model> for ArtistForm {
    fn from(artist: &artist::Model) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone().unwrap_or_default(),
            state: artist.state.clone().unwrap_or_default(),
            phone: artist.phone.clone().unwrap_or_default(),
            genres: artist.genres.0.clone(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            website_link: artist.website.clone().unwrap_or_default(),
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue,
        }
    }
}
