use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::{json, Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{
    AnnotatedOrder, Fulfillment, NewOrderInput, OrderLineInput, PaymentMethod,
};
use crate::errors::AppError;
use crate::{AppAvailabilityService, AppOrderService};

/// Shown instead of a restaurant list when no menu covers the whole order.
pub const NO_RESTAURANT_MESSAGE: &str = "No restaurant can fulfill this order";

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub unit_price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RankedRestaurantResponse {
    pub id: Uuid,
    pub name: String,
    /// Absent when either the order or the restaurant address could not be
    /// geocoded.
    pub distance_km: Option<f64>,
}

/// Either the candidate restaurants nearest-first, or a fixed sentinel
/// message when no restaurant can cook the whole order.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AvailabilityResponse {
    Restaurants(Vec<RankedRestaurantResponse>),
    Message(String),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnnotatedOrderResponse {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub phonenumber: String,
    pub address: String,
    pub status: String,
    pub payment_method: String,
    pub comment: Option<String>,
    /// Restaurant already assigned to cook this order, if any.
    pub performer_restaurant_id: Option<Uuid>,
    pub total_price: String,
    pub created_at: String,
    pub lines: Vec<OrderLineResponse>,
    pub available_restaurants: AvailabilityResponse,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/order
///
/// Order submission. The payload is validated field by field so the client
/// gets a message naming the offending field: missing, null or empty values
/// are a 400, wrong types and malformed phone numbers a 406. On success the
/// order and its lines are created in one transaction, with each line's unit
/// price snapshotted from the current product price.
#[utoipa::path(
    post,
    path = "/api/order",
    responses(
        (status = 201, description = "Order created", body = CreateOrderResponse),
        (status = 400, description = "Missing, null or empty field"),
        (status = 406, description = "Wrong field type or invalid phone number"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn register_order(
    service: web::Data<AppOrderService>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let input = parse_order_payload(&body.into_inner())?;

    let id = web::block(move || service.create_order(input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// GET /api/orders
///
/// Every order annotated with the restaurants able to fulfill it. Menu
/// availability is read once per request so the whole listing sees one
/// consistent snapshot; geocoding problems only degrade distances, they
/// never drop an order or a restaurant from the output.
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Annotated order list", body = [AnnotatedOrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    orders: web::Data<AppOrderService>,
    availability: web::Data<AppAvailabilityService>,
) -> Result<HttpResponse, AppError> {
    let annotated = web::block(move || {
        let all = orders.list_orders()?;
        availability.annotate(all)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<AnnotatedOrderResponse> = annotated.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(items))
}

fn to_response(annotated: AnnotatedOrder) -> AnnotatedOrderResponse {
    let order = annotated.order;

    let available_restaurants = match annotated.fulfillment {
        Fulfillment::NoCandidates => {
            AvailabilityResponse::Message(NO_RESTAURANT_MESSAGE.to_string())
        }
        Fulfillment::Candidates(list) => AvailabilityResponse::Restaurants(
            list.into_iter()
                .map(|r| RankedRestaurantResponse {
                    id: r.id,
                    name: r.name,
                    distance_km: r.distance_km,
                })
                .collect(),
        ),
    };

    let total_price = order.total_price().to_string();
    let lines = order
        .lines
        .iter()
        .map(|l| OrderLineResponse {
            id: l.id,
            product_id: l.product_id,
            quantity: l.quantity,
            unit_price: l.unit_price.to_string(),
        })
        .collect();

    AnnotatedOrderResponse {
        id: order.id,
        firstname: order.firstname,
        lastname: order.lastname,
        phonenumber: order.phonenumber,
        address: order.address,
        status: order.status.as_str().to_string(),
        payment_method: order.payment_method.as_str().to_string(),
        comment: order.comment,
        performer_restaurant_id: order.performer_restaurant_id,
        total_price,
        created_at: order.created_at.to_rfc3339(),
        lines,
        available_restaurants,
    }
}

// ── Payload validation ───────────────────────────────────────────────────────

fn parse_order_payload(payload: &Value) -> Result<NewOrderInput, AppError> {
    let Some(payload) = payload.as_object() else {
        return Err(AppError::NotAcceptable(
            "payload should be a JSON object".to_string(),
        ));
    };

    let products = match payload.get("products") {
        None => {
            return Err(AppError::BadRequest(
                "products is a required field".to_string(),
            ))
        }
        Some(Value::Null) => {
            return Err(AppError::BadRequest("products can not be null".to_string()))
        }
        Some(Value::Array(items)) if items.is_empty() => {
            return Err(AppError::BadRequest(
                "products list can not be empty".to_string(),
            ))
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(AppError::NotAcceptable(
                "products should be presented as a list".to_string(),
            ))
        }
    };

    let firstname = required_string(payload, "firstname")?;
    let lastname = required_string(payload, "lastname")?;

    let phonenumber = required_string(payload, "phonenumber")?;
    if !is_valid_phonenumber(&phonenumber) {
        return Err(AppError::NotAcceptable(
            "phonenumber is not correct, please make sure that you wrote correct number"
                .to_string(),
        ));
    }

    let address = required_string(payload, "address")?;

    let payment_method = match payload.get("payment_method") {
        None | Some(Value::Null) => PaymentMethod::Cash,
        Some(Value::String(s)) => PaymentMethod::parse(s).ok_or_else(|| {
            AppError::NotAcceptable("payment_method should be one of: Card, Cash".to_string())
        })?,
        Some(_) => {
            return Err(AppError::NotAcceptable(
                "payment_method should be str".to_string(),
            ))
        }
    };

    let lines = products
        .iter()
        .map(parse_order_line)
        .collect::<Result<Vec<OrderLineInput>, AppError>>()?;

    Ok(NewOrderInput {
        firstname,
        lastname,
        phonenumber,
        address,
        payment_method,
        lines,
    })
}

fn required_string(payload: &Map<String, Value>, field: &str) -> Result<String, AppError> {
    match payload.get(field) {
        None => Err(AppError::BadRequest(format!(
            "{field} is a required field"
        ))),
        Some(Value::Null) => Err(AppError::BadRequest(format!("{field} can not be empty"))),
        Some(Value::String(s)) if s.is_empty() => {
            Err(AppError::BadRequest(format!("{field} can not be empty")))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(AppError::NotAcceptable(format!("{field} should be str"))),
    }
}

fn parse_order_line(item: &Value) -> Result<OrderLineInput, AppError> {
    let Some(item) = item.as_object() else {
        return Err(AppError::NotAcceptable(
            "products entries should be objects".to_string(),
        ));
    };

    let product_id = match item.get("product") {
        None => {
            return Err(AppError::BadRequest(
                "product is a required field".to_string(),
            ))
        }
        Some(Value::Null) => {
            return Err(AppError::BadRequest("product can not be empty".to_string()))
        }
        Some(Value::String(s)) => Uuid::parse_str(s).map_err(|_| {
            AppError::NotAcceptable("product should be a valid product id".to_string())
        })?,
        Some(_) => {
            return Err(AppError::NotAcceptable(
                "product should be a valid product id".to_string(),
            ))
        }
    };

    // Quantity defaults to one portion when omitted.
    let quantity = match item.get("quantity") {
        None | Some(Value::Null) => 1,
        Some(Value::Number(n)) => match n.as_i64() {
            Some(q) if q >= 1 && q <= i32::MAX as i64 => q as i32,
            Some(_) => {
                return Err(AppError::BadRequest(
                    "quantity must be at least 1".to_string(),
                ))
            }
            None => {
                return Err(AppError::NotAcceptable(
                    "quantity should be a positive integer".to_string(),
                ))
            }
        },
        Some(_) => {
            return Err(AppError::NotAcceptable(
                "quantity should be a positive integer".to_string(),
            ))
        }
    };

    Ok(OrderLineInput {
        product_id,
        quantity,
    })
}

/// International format: a leading `+` followed by 10 to 15 digits.
fn is_valid_phonenumber(raw: &str) -> bool {
    match raw.strip_prefix('+') {
        Some(digits) => {
            (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
