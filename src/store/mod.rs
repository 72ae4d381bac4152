// src/store/mod.rs

//! Storage interface for the storefront.
//!
//! Exactly one production backend exists (`PgStore`, Postgres via sqlx);
//! everything above it talks to the [`Store`] trait so tests can swap in
//! an in-memory implementation that runs the same checkout engine.

pub mod checkout;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
  AdminStats, CartLine, CustomerSummary, NewProduct, NewUser, Order, OrderLineView, OrderStatusCounts, OrderSummary,
  Product, ProductFilter, Role, User,
};

pub use postgres::PgStore;

/// Page size shared by every paginated admin listing.
pub const PAGE_SIZE: i64 = 15;

/// Domain failures the storage layer can report. Web handlers translate
/// these into flash messages or HTTP statuses; none of them abort the
/// process.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Your cart is empty.")]
  EmptyCart,

  #[error("Insufficient stock for product {0}.")]
  InsufficientStock(Uuid),

  #[error("Invalid status '{0}'.")]
  InvalidStatus(String),

  #[error("Product {0} not found.")]
  ProductNotFound(Uuid),

  #[error("Order {0} not found.")]
  OrderNotFound(Uuid),

  #[error("User not found.")]
  UserNotFound,

  #[error("Email '{0}' is already registered.")]
  DuplicateEmail(String),

  #[error("The operation conflicted with a concurrent transaction.")]
  Conflict,

  #[error("Database error: {0}")]
  Db(#[from] sqlx::Error),
}

/// A page of results plus the figures the listing pages render.
#[derive(Debug, Clone, Serialize)]
pub struct Paged<T> {
  pub items: Vec<T>,
  pub total: i64,
  pub page: i64,
  pub pages: i64,
}

impl<T> Paged<T> {
  pub fn new(items: Vec<T>, total: i64, page: i64) -> Self {
    let pages = ((total + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
    Paged { items, total, page, pages }
  }
}

/// Admin/staff order listing filter. `q` searches the order id and the
/// customer's name and email as substrings.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
  pub status: Option<crate::models::OrderStatus>,
  pub q: Option<String>,
  pub page: i64,
}

/// Sort orders for the admin customer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomerSort {
  #[default]
  Newest,
  Oldest,
  Name,
}

impl CustomerSort {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "newest" => Some(CustomerSort::Newest),
      "oldest" => Some(CustomerSort::Oldest),
      "name" => Some(CustomerSort::Name),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
  pub q: Option<String>,
  pub sort: CustomerSort,
  pub page: i64,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
  pub q: Option<String>,
  pub role: Option<Role>,
  pub page: i64,
}

/// The single storage interface of the application.
///
/// Handlers hold it as `Arc<dyn Store>`; every read goes to the backing
/// storage (no in-process caching between requests). All mutating cart
/// and order methods are scoped by the acting user where ownership
/// matters.
#[async_trait]
pub trait Store: Send + Sync {
  // --- Catalog ---

  async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;
  async fn latest_products(&self, limit: i64) -> Result<Vec<Product>, StoreError>;
  async fn get_product(&self, id: Uuid) -> Result<Option<Product>, StoreError>;
  async fn create_product(&self, new: &NewProduct) -> Result<Product, StoreError>;
  /// Quick-edit of the admin product table: name, price and stock only.
  async fn update_product(&self, id: Uuid, name: &str, price_cents: i64, stock: i64) -> Result<(), StoreError>;
  async fn delete_product(&self, id: Uuid) -> Result<(), StoreError>;

  // --- Cart ---

  /// Adds `quantity` of a product to the user's cart, accumulating into
  /// an existing entry. Quantities below 1 are clamped to 1. Stock is
  /// not checked here; order placement is the only stock gate.
  async fn add_to_cart(&self, user_id: Uuid, product_id: Uuid, quantity: i64) -> Result<(), StoreError>;
  /// Sets an entry's quantity (clamped to at least 1). A silent no-op
  /// when the entry does not belong to `user_id`.
  async fn update_cart_quantity(&self, user_id: Uuid, entry_id: Uuid, quantity: i64) -> Result<(), StoreError>;
  async fn remove_cart_entry(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), StoreError>;
  async fn clear_cart(&self, user_id: Uuid) -> Result<(), StoreError>;
  async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, StoreError>;
  async fn count_cart_items(&self, user_id: Uuid) -> Result<i64, StoreError>;

  // --- Orders ---

  /// Places an order from the user's cart in one transaction: locked
  /// cart+product read, stock validation, total computation, order and
  /// line insertion, stock decrement, cart clear. Rolls everything back
  /// on any failure. See [`checkout`].
  async fn place_order(&self, user_id: Uuid, shipping_address: &str, payment_method: &str)
    -> Result<Uuid, StoreError>;
  /// Sets an order's status. The string must parse into the closed
  /// status set or the call fails with `InvalidStatus`. No inventory
  /// side effects; cancellation does not restock.
  async fn update_order_status(&self, order_id: Uuid, status: &str) -> Result<(), StoreError>;
  async fn orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError>;
  async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, StoreError>;
  async fn order_summary(&self, order_id: Uuid) -> Result<Option<OrderSummary>, StoreError>;
  async fn order_lines(&self, order_id: Uuid) -> Result<Vec<OrderLineView>, StoreError>;
  async fn admin_orders(&self, filter: &OrderFilter) -> Result<Paged<OrderSummary>, StoreError>;
  async fn recent_orders(&self, limit: i64) -> Result<Vec<OrderSummary>, StoreError>;
  async fn order_status_counts(&self) -> Result<OrderStatusCounts, StoreError>;
  async fn delete_order(&self, order_id: Uuid) -> Result<(), StoreError>;
  async fn admin_stats(&self) -> Result<AdminStats, StoreError>;

  // --- Users ---

  async fn create_user(&self, new: &NewUser) -> Result<User, StoreError>;
  async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
  async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
  async fn update_password(&self, user_id: Uuid, password_hash: &str) -> Result<(), StoreError>;
  async fn update_profile(
    &self,
    user_id: Uuid,
    name: &str,
    phone: Option<&str>,
    address: Option<&str>,
  ) -> Result<(), StoreError>;
  async fn update_profile_image(&self, user_id: Uuid, image: &str) -> Result<(), StoreError>;
  async fn customers(&self, filter: &CustomerFilter) -> Result<Paged<CustomerSummary>, StoreError>;
  async fn update_customer(
    &self,
    id: Uuid,
    name: &str,
    email: &str,
    phone: Option<&str>,
    address: Option<&str>,
  ) -> Result<(), StoreError>;
  async fn employees(&self, filter: &EmployeeFilter) -> Result<Paged<User>, StoreError>;
  /// Removes a user together with their cart, orders and order lines.
  async fn delete_user(&self, user_id: Uuid) -> Result<(), StoreError>;
}
