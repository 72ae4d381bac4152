// src/models/mod.rs

//! Data structures representing database entities and the read shapes
//! the web layer serves.

pub mod cart_entry;
pub mod order;
pub mod order_line;
pub mod product;
pub mod user;

// Re-export the model structs for convenient access
pub use cart_entry::{CartEntry, CartLine};
pub use order::{AdminStats, Order, OrderStatus, OrderStatusCounts, OrderSummary};
pub use order_line::{OrderLine, OrderLineView};
pub use product::{NewProduct, Product, ProductFilter};
pub use user::{CustomerSummary, NewUser, Role, User};
