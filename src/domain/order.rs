use std::collections::HashSet;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Unprocessed,
    Assembling,
    Delivery,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Unprocessed => "Unprocessed",
            OrderStatus::Assembling => "Assembling",
            OrderStatus::Delivery => "Delivery",
            OrderStatus::Completed => "Completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Unprocessed" => Some(OrderStatus::Unprocessed),
            "Assembling" => Some(OrderStatus::Assembling),
            "Delivery" => Some(OrderStatus::Delivery),
            "Completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Cash => "Cash",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Card" => Some(PaymentMethod::Card),
            "Cash" => Some(PaymentMethod::Cash),
            _ => None,
        }
    }
}

/// Line supplied by the submission API; the unit price is snapshotted from
/// the product catalog at creation time, not taken from the client.
#[derive(Debug, Clone)]
pub struct OrderLineInput {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct NewOrderInput {
    pub firstname: String,
    pub lastname: String,
    pub phonenumber: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub lines: Vec<OrderLineInput>,
}

#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub phonenumber: String,
    pub address: String,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub comment: Option<String>,
    pub performer_restaurant_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLineView>,
}

impl OrderView {
    /// Distinct products this order asks for.
    pub fn requested_products(&self) -> HashSet<Uuid> {
        self.lines.iter().map(|l| l.product_id).collect()
    }

    /// Σ quantity × snapshotted unit price.
    pub fn total_price(&self) -> BigDecimal {
        self.lines
            .iter()
            .map(|l| &l.unit_price * BigDecimal::from(l.quantity))
            .sum()
    }
}

#[derive(Debug, Clone)]
pub struct RestaurantView {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub contact_phone: String,
}

/// A candidate restaurant with its delivery distance, when both endpoints
/// geocoded successfully.
#[derive(Debug, Clone)]
pub struct RankedRestaurant {
    pub id: Uuid,
    pub name: String,
    pub distance_km: Option<f64>,
}

/// Matching outcome for one order. `NoCandidates` is distinct from an empty
/// list so the presentation layer can show a fixed sentinel message instead
/// of an absent annotation.
#[derive(Debug, Clone)]
pub enum Fulfillment {
    NoCandidates,
    Candidates(Vec<RankedRestaurant>),
}

#[derive(Debug, Clone)]
pub struct AnnotatedOrder {
    pub order: OrderView,
    pub fulfillment: Fulfillment,
}
