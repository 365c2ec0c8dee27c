use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::geo::Coordinates;
use crate::domain::ports::{CachedPlace, PlaceStore};
use crate::models::place::{NewPlace, Place};
use crate::schema::places;

/// Geocode cache backed by the `places` table, keyed by address string.
pub struct DieselPlaceStore {
    pool: DbPool,
}

impl DieselPlaceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PlaceStore for DieselPlaceStore {
    fn find(&self, address: &str) -> Result<Option<CachedPlace>, DomainError> {
        let mut conn = self.pool.get()?;

        let place = places::table
            .filter(places::address.eq(address))
            .select(Place::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(place.map(|p| CachedPlace {
            // Both columns are written together; treat a half-set pair the
            // same as a negative entry.
            coordinates: match (p.longitude, p.latitude) {
                (Some(longitude), Some(latitude)) => Some(Coordinates {
                    longitude,
                    latitude,
                }),
                _ => None,
            },
            updated_at: p.updated_at,
        }))
    }

    fn upsert(&self, address: &str, coordinates: Option<Coordinates>) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let (longitude, latitude) = match coordinates {
            Some(c) => (Some(c.longitude), Some(c.latitude)),
            None => (None, None),
        };
        let now = Utc::now();

        diesel::insert_into(places::table)
            .values(&NewPlace {
                id: Uuid::new_v4(),
                address: address.to_string(),
                longitude,
                latitude,
                updated_at: now,
            })
            .on_conflict(places::address)
            .do_update()
            .set((
                places::longitude.eq(longitude),
                places::latitude.eq(latitude),
                places::updated_at.eq(now),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
