use crate::domain::errors::DomainError;
use crate::domain::geo::Coordinates;
use crate::domain::ports::{Geocoder, PlaceStore};

/// Cache-fronted address resolution.
///
/// Lookup policy:
/// - cached coordinates are trusted indefinitely and served without a
///   provider call;
/// - a cached negative outcome (address the provider could not resolve) is
///   always retried, and the entry is overwritten with whatever the retry
///   produces;
/// - a miss calls the provider and records the outcome, null included, so a
///   bad address is not re-sent to the provider on every request;
/// - a provider failure also records a null entry, then propagates.
pub struct AddressResolver<S, G> {
    store: S,
    geocoder: G,
}

impl<S: PlaceStore, G: Geocoder> AddressResolver<S, G> {
    pub fn new(store: S, geocoder: G) -> Self {
        Self { store, geocoder }
    }

    /// Take the resolver apart, e.g. to swap the geocoder while keeping the
    /// populated store.
    pub fn into_parts(self) -> (S, G) {
        (self.store, self.geocoder)
    }

    pub fn resolve(&self, address: &str) -> Result<Option<Coordinates>, DomainError> {
        if let Some(cached) = self.store.find(address)? {
            if let Some(coordinates) = cached.coordinates {
                return Ok(Some(coordinates));
            }
            log::debug!("retrying previously unresolved address '{address}'");
        }

        match self.geocoder.geocode(address) {
            Ok(outcome) => {
                self.store.upsert(address, outcome)?;
                Ok(outcome)
            }
            Err(e) => {
                self.store.upsert(address, None)?;
                Err(e.into())
            }
        }
    }
}
