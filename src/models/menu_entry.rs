use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::menu_entries;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = menu_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MenuEntry {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub product_id: Uuid,
    pub availability: bool,
}
