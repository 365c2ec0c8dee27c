pub mod availability;
pub mod geocoding;
pub mod order_service;
