use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::menu::MenuRow;
use crate::domain::order::RestaurantView;
use crate::domain::ports::MenuSource;
use crate::models::menu_entry::MenuEntry;
use crate::models::restaurant::Restaurant;
use crate::schema::{menu_entries, restaurants};

/// Menu-availability feed read straight from the database on every call;
/// availability flags are toggled by restaurant staff at any time.
pub struct DieselMenuSource {
    pool: DbPool,
}

impl DieselMenuSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl MenuSource for DieselMenuSource {
    fn menu_rows(&self) -> Result<Vec<MenuRow>, DomainError> {
        let mut conn = self.pool.get()?;

        let entries = menu_entries::table
            .select(MenuEntry::as_select())
            .load(&mut conn)?;

        Ok(entries
            .into_iter()
            .map(|e| MenuRow {
                restaurant_id: e.restaurant_id,
                product_id: e.product_id,
                availability: e.availability,
            })
            .collect())
    }

    fn restaurants(&self) -> Result<Vec<RestaurantView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = restaurants::table
            .select(Restaurant::as_select())
            .load(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|r| RestaurantView {
                id: r.id,
                name: r.name,
                address: r.address,
                contact_phone: r.contact_phone,
            })
            .collect())
    }
}
