use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::geo::{Coordinates, GeocodeError};
use super::menu::MenuRow;
use super::order::{NewOrderInput, OrderView, RestaurantView};
use super::product::ProductView;

/// External geocoding provider. `Ok(None)` means the provider answered but
/// found no location for the address; `Err` is reserved for transport,
/// HTTP and payload failures.
pub trait Geocoder: Send + Sync + 'static {
    fn geocode(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError>;
}

/// A cached geocoding outcome. `coordinates: None` records an address the
/// provider could not resolve, kept so it can be retried later.
#[derive(Debug, Clone)]
pub struct CachedPlace {
    pub coordinates: Option<Coordinates>,
    pub updated_at: DateTime<Utc>,
}

pub trait PlaceStore: Send + Sync + 'static {
    fn find(&self, address: &str) -> Result<Option<CachedPlace>, DomainError>;
    /// Insert or overwrite the entry for `address`, refreshing its
    /// timestamp. Last writer wins.
    fn upsert(&self, address: &str, coordinates: Option<Coordinates>) -> Result<(), DomainError>;
}

/// Read-only feed of menu availability and the restaurants behind it.
pub trait MenuSource: Send + Sync + 'static {
    fn menu_rows(&self) -> Result<Vec<MenuRow>, DomainError>;
    fn restaurants(&self) -> Result<Vec<RestaurantView>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Create the order and its lines, snapshotting each line's unit price
    /// from the current product price, in a single transaction. Fails with
    /// `InvalidInput` when a product id does not exist.
    fn create(&self, input: NewOrderInput) -> Result<Uuid, DomainError>;
    fn list_with_lines(&self) -> Result<Vec<OrderView>, DomainError>;
}

pub trait ProductCatalog: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<ProductView>, DomainError>;
    /// Fails with `ProtectedReference` while any order line references the
    /// product.
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
