use bigdecimal::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CategoryView {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub description: String,
    pub special_status: bool,
    pub category: Option<CategoryView>,
}
