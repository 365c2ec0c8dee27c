use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrderInput, OrderView};
use crate::domain::ports::{OrderRepository, ProductCatalog};
use crate::domain::product::ProductView;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_order(&self, input: NewOrderInput) -> Result<Uuid, DomainError> {
        self.repo.create(input)
    }

    pub fn list_orders(&self) -> Result<Vec<OrderView>, DomainError> {
        self.repo.list_with_lines()
    }
}

pub struct ProductService<C> {
    catalog: C,
}

impl<C: ProductCatalog> ProductService<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn list_products(&self) -> Result<Vec<ProductView>, DomainError> {
        self.catalog.list()
    }

    pub fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        self.catalog.delete(id)
    }
}
