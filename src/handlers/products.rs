use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::product::ProductView;
use crate::errors::AppError;
use crate::AppProductService;

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    /// Decimal price as a string, e.g. "9.99"
    pub price: String,
    pub description: String,
    pub special_status: bool,
    pub category: Option<CategoryResponse>,
}

impl From<ProductView> for ProductResponse {
    fn from(p: ProductView) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price.to_string(),
            description: p.description,
            special_status: p.special_status,
            category: p.category.map(|c| CategoryResponse {
                id: c.id,
                name: c.name,
            }),
        }
    }
}

/// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Product catalog", body = [ProductResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn list_products(
    service: web::Data<AppProductService>,
) -> Result<HttpResponse, AppError> {
    let products = web::block(move || service.list_products())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// DELETE /api/products/{id}
///
/// Refused with 409 while any order line still references the product, so
/// historical orders keep their snapshots.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product is referenced by order lines"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    service: web::Data<AppProductService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || service.delete_product(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}
