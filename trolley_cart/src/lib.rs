pub mod cart_model;
pub mod sqlite_cart_storage;
pub mod subscribers;
