use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::restaurants;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub contact_phone: String,
}
