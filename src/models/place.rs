use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::places;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = places)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Place {
    pub id: Uuid,
    pub address: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = places)]
pub struct NewPlace {
    pub id: Uuid,
    pub address: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub updated_at: DateTime<Utc>,
}
