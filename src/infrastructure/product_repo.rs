use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductCatalog;
use crate::domain::product::{CategoryView, ProductView};
use crate::models::product::{Product, ProductCategory};
use crate::schema::{product_categories, products};

pub struct DieselProductCatalog {
    pool: DbPool,
}

impl DieselProductCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductCatalog for DieselProductCatalog {
    fn list(&self) -> Result<Vec<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<(Product, Option<ProductCategory>)> = products::table
            .left_join(product_categories::table)
            .select((
                Product::as_select(),
                Option::<ProductCategory>::as_select(),
            ))
            .order(products::name.asc())
            .load(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(product, category)| ProductView {
                id: product.id,
                name: product.name,
                price: product.price,
                description: product.description,
                special_status: product.special_status,
                category: category.map(|c| CategoryView {
                    id: c.id,
                    name: c.name,
                }),
            })
            .collect())
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        // RESTRICT foreign keys turn this into a ProtectedReference error
        // while any order line still points at the product.
        let deleted = diesel::delete(products::table.filter(products::id.eq(id)))
            .execute(&mut conn)?;

        if deleted == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}
