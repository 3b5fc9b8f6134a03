//! Writes. Every operation runs in its own transaction: on any early return
//! the uncommitted transaction is dropped and rolled back.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

use crate::db::entities::{artist, show, venue, GenreList};
use crate::error::{AppError, Result};
use crate::forms::{ArtistData, Profile, ShowData, VenueData};

pub struct VenueRepository {
    db: DatabaseConnection,
}

impl VenueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, data: VenueData) -> Result<venue::Model> {
        let txn = self.db.begin().await?;
        let mut active = venue::ActiveModel {
            ..Default::default()
        };
        data.apply(&mut active);
        let venue = active.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(venue_id = venue.id, "Venue '{}' created", venue.name);
        Ok(venue)
    }

    /// Overwrites every field of an existing venue.
    pub async fn update(&self, id: i32, data: VenueData) -> Result<venue::Model> {
        let txn = self.db.begin().await?;
        let existing = find_venue(&txn, id).await?;
        let mut active: venue::ActiveModel = existing.into();
        data.apply(&mut active);
        let venue = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(venue_id = venue.id, "Venue '{}' updated", venue.name);
        Ok(venue)
    }

    /// Deletes a venue together with its shows.
    pub async fn delete(&self, id: i32) -> Result<venue::Model> {
        let txn = self.db.begin().await?;
        let venue = find_venue(&txn, id).await?;
        let shows = show::Entity::delete_many()
            .filter(show::Column::VenueId.eq(id))
            .exec(&txn)
            .await?;
        venue::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            venue_id = id,
            shows_deleted = shows.rows_affected,
            "Venue '{}' deleted",
            venue.name
        );
        Ok(venue)
    }
}

pub struct ArtistRepository {
    db: DatabaseConnection,
}

impl ArtistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, data: ArtistData) -> Result<artist::Model> {
        let txn = self.db.begin().await?;
        let mut active = artist::ActiveModel {
            ..Default::default()
        };
        data.apply(&mut active);
        let artist = active.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(artist_id = artist.id, "Artist '{}' created", artist.name);
        Ok(artist)
    }

    pub async fn update(&self, id: i32, data: ArtistData) -> Result<artist::Model> {
        let txn = self.db.begin().await?;
        let existing = find_artist(&txn, id).await?;
        let mut active: artist::ActiveModel = existing.into();
        data.apply(&mut active);
        let artist = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(artist_id = artist.id, "Artist '{}' updated", artist.name);
        Ok(artist)
    }

    pub async fn delete(&self, id: i32) -> Result<artist::Model> {
        let txn = self.db.begin().await?;
        let artist = find_artist(&txn, id).await?;
        let shows = show::Entity::delete_many()
            .filter(show::Column::ArtistId.eq(id))
            .exec(&txn)
            .await?;
        artist::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            artist_id = id,
            shows_deleted = shows.rows_affected,
            "Artist '{}' deleted",
            artist.name
        );
        Ok(artist)
    }
}

pub struct ShowRepository {
    db: DatabaseConnection,
}

impl ShowRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Books a show. Both the artist and the venue must already exist.
    pub async fn create(&self, data: ShowData) -> Result<show::Model> {
        let txn = self.db.begin().await?;

        let mut missing = Vec::new();
        if artist::Entity::find_by_id(data.artist_id).one(&txn).await?.is_none() {
            missing.push(format!("artist {} does not exist", data.artist_id));
        }
        if venue::Entity::find_by_id(data.venue_id).one(&txn).await?.is_none() {
            missing.push(format!("venue {} does not exist", data.venue_id));
        }
        if !missing.is_empty() {
            return Err(AppError::InvalidReference(missing.join(", ")));
        }

        let show = show::ActiveModel {
            artist_id: Set(data.artist_id),
            venue_id: Set(data.venue_id),
            start_time: Set(data.start_time),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        tracing::info!(
            show_id = show.id,
            artist_id = show.artist_id,
            venue_id = show.venue_id,
            "Show listed for {}",
            show.start_time
        );
        Ok(show)
    }
}

async fn find_venue(txn: &DatabaseTransaction, id: i32) -> Result<venue::Model> {
    venue::Entity::find_by_id(id)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))
}

async fn find_artist(txn: &DatabaseTransaction, id: i32) -> Result<artist::Model> {
    artist::Entity::find_by_id(id)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))
}

fn genre_list(profile: &Profile) -> GenreList {
    GenreList(profile.genre_labels())
}

impl VenueData {
    /// Full-field overwrite of `active` from the validated submission.
    pub fn apply(self, active: &mut venue::ActiveModel) {
        active.genres = Set(genre_list(&self.profile));
        let Profile {
            name,
            city,
            state,
            phone,
            facebook_link,
            image_link,
            website,
            seeking_description,
            ..
        } = self.profile;

        active.name = Set(name);
        active.city = Set(Some(city));
        active.state = Set(Some(state.into()));
        active.address = Set(Some(self.address));
        active.phone = Set(phone);
        active.image_link = Set(image_link);
        active.facebook_link = Set(facebook_link);
        active.website = Set(website);
        active.seeking_talent = Set(self.seeking_talent);
        active.seeking_description = Set(seeking_description);
    }
}

impl ArtistData {
    pub fn apply(self, active: &mut artist::ActiveModel) {
        active.genres = Set(genre_list(&self.profile));
        let Profile {
            name,
            city,
            state,
            phone,
            facebook_link,
            image_link,
            website,
            seeking_description,
            ..
        } = self.profile;

        active.name = Set(name);
        active.city = Set(Some(city));
        active.state = Set(Some(state.into()));
        active.phone = Set(phone);
        active.image_link = Set(image_link);
        active.facebook_link = Set(facebook_link);
        active.website = Set(website);
        active.seeking_venue = Set(self.seeking_venue);
        active.seeking_description = Set(seeking_description);
    }
}
