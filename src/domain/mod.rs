pub mod errors;
pub mod geo;
pub mod menu;
pub mod order;
pub mod ports;
pub mod product;
