pub mod categories;
pub mod inventory_items;
pub mod users;
