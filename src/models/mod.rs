pub mod menu_entry;
pub mod order;
pub mod order_line;
pub mod place;
pub mod product;
pub mod restaurant;
