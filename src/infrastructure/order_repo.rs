use std::collections::HashMap;

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    NewOrderInput, OrderLineView, OrderStatus, OrderView, PaymentMethod,
};
use crate::domain::ports::OrderRepository;
use crate::models::order::{NewOrder, Order};
use crate::models::order_line::{NewOrderLine, OrderLine};
use crate::schema::{order_lines, orders, products};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, input: NewOrderInput) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // Snapshot current catalog prices; the line price never gets
            // recomputed after this point.
            let requested_ids: Vec<Uuid> = input.lines.iter().map(|l| l.product_id).collect();
            let prices: HashMap<Uuid, BigDecimal> = products::table
                .filter(products::id.eq_any(&requested_ids))
                .select((products::id, products::price))
                .load::<(Uuid, BigDecimal)>(conn)?
                .into_iter()
                .collect();

            let order_id = Uuid::new_v4();
            diesel::insert_into(orders::table)
                .values(&NewOrder {
                    id: order_id,
                    firstname: input.firstname,
                    lastname: input.lastname,
                    phonenumber: input.phonenumber,
                    address: input.address,
                    status: OrderStatus::Unprocessed.as_str().to_string(),
                    payment_method: input.payment_method.as_str().to_string(),
                })
                .execute(conn)?;

            let new_lines: Result<Vec<NewOrderLine>, DomainError> = input
                .lines
                .iter()
                .map(|l| {
                    let unit_price = prices.get(&l.product_id).cloned().ok_or_else(|| {
                        DomainError::InvalidInput("product id does not exist".to_string())
                    })?;
                    Ok(NewOrderLine {
                        id: Uuid::new_v4(),
                        order_id,
                        product_id: l.product_id,
                        quantity: l.quantity,
                        unit_price,
                    })
                })
                .collect();
            diesel::insert_into(order_lines::table)
                .values(&new_lines?)
                .execute(conn)?;

            Ok(order_id)
        })
    }

    fn list_with_lines(&self) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order_rows = orders::table
            .select(Order::as_select())
            .order(orders::created_at.desc())
            .load(&mut conn)?;

        let line_rows = OrderLine::belonging_to(&order_rows)
            .select(OrderLine::as_select())
            .load(&mut conn)?;

        line_rows
            .grouped_by(&order_rows)
            .into_iter()
            .zip(order_rows)
            .map(|(lines, order)| to_view(order, lines))
            .collect()
    }
}

fn to_view(order: Order, lines: Vec<OrderLine>) -> Result<OrderView, DomainError> {
    let status = OrderStatus::parse(&order.status)
        .ok_or_else(|| DomainError::Internal(format!("unknown order status '{}'", order.status)))?;
    let payment_method = PaymentMethod::parse(&order.payment_method).ok_or_else(|| {
        DomainError::Internal(format!("unknown payment method '{}'", order.payment_method))
    })?;

    Ok(OrderView {
        id: order.id,
        firstname: order.firstname,
        lastname: order.lastname,
        phonenumber: order.phonenumber,
        address: order.address,
        status,
        payment_method,
        comment: order.comment,
        performer_restaurant_id: order.restaurant_id,
        created_at: order.created_at,
        lines: lines
            .into_iter()
            .map(|l| OrderLineView {
                id: l.id,
                product_id: l.product_id,
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect(),
    })
}
