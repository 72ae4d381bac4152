// src/store/postgres.rs

//! Postgres-backed [`Store`] implementation.
//!
//! All queries are runtime-checked (`sqlx::query_as` with `.bind`), so
//! the crate builds without a live database. The checkout sequence runs
//! inside a `sqlx::Transaction` that implements [`CheckoutTx`]; the
//! initial cart read locks the joined rows with `FOR UPDATE`, which is
//! what serializes competing placements for the same products.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use super::checkout::{self, CheckoutLine, CheckoutTx};
use super::{CustomerFilter, CustomerSort, EmployeeFilter, OrderFilter, Paged, Store, StoreError, PAGE_SIZE};
use crate::models::{
  AdminStats, CartLine, CustomerSummary, NewProduct, NewUser, Order, OrderLine, OrderLineView, OrderStatus,
  OrderStatusCounts, OrderSummary, Product, ProductFilter, User,
};

/// Maps serialization failures and deadlocks (SQLSTATE 40001 / 40P01)
/// to [`StoreError::Conflict`]; the checkout handler retries those once.
fn conflict_or_db(e: sqlx::Error) -> StoreError {
  if let Some(db_err) = e.as_database_error() {
    if let Some(code) = db_err.code() {
      if code == "40001" || code == "40P01" {
        return StoreError::Conflict;
      }
    }
  }
  StoreError::Db(e)
}

/// Maps a unique violation (SQLSTATE 23505) on the email column to
/// [`StoreError::DuplicateEmail`].
fn duplicate_email_or_db(e: sqlx::Error, email: &str) -> StoreError {
  if let Some(db_err) = e.as_database_error() {
    if db_err.code().as_deref() == Some("23505") {
      return StoreError::DuplicateEmail(email.to_string());
    }
  }
  StoreError::Db(e)
}

const PRODUCT_COLUMNS: &str = "id, name, description, price_cents, size, color, category, image, stock, created_at";

const USER_COLUMNS: &str =
  "id, name, email, password_hash, role, phone, address, profile_image, security_question, security_answer, created_at";

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    PgStore { pool }
  }

  fn page_offset(page: i64) -> i64 {
    (page.max(1) - 1) * PAGE_SIZE
  }
}

#[async_trait]
impl<'c> CheckoutTx for Transaction<'c, Postgres> {
  async fn locked_cart_lines(&mut self, user_id: Uuid) -> Result<Vec<CheckoutLine>, StoreError> {
    // FOR UPDATE locks both the cart rows and the joined product rows
    // until commit; a competing placement for the same products blocks
    // here and then re-reads the decremented stock.
    let rows: Vec<(Uuid, i64, i64, i64)> = sqlx::query_as(
      "SELECT c.product_id, c.quantity, p.price_cents, p.stock \
       FROM cart_entries c \
       JOIN products p ON p.id = c.product_id \
       WHERE c.user_id = $1 \
       ORDER BY p.id \
       FOR UPDATE",
    )
    .bind(user_id)
    .fetch_all(&mut **self)
    .await
    .map_err(conflict_or_db)?;

    Ok(
      rows
        .into_iter()
        .map(|(product_id, quantity, price_cents, stock)| CheckoutLine {
          product_id,
          quantity,
          price_cents,
          stock,
        })
        .collect(),
    )
  }

  async fn insert_order(&mut self, order: &Order) -> Result<(), StoreError> {
    sqlx::query(
      "INSERT INTO orders (id, user_id, total_amount_cents, status, shipping_address, payment_method, created_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(order.id)
    .bind(order.user_id)
    .bind(order.total_amount_cents)
    .bind(order.status)
    .bind(&order.shipping_address)
    .bind(&order.payment_method)
    .bind(order.created_at)
    .execute(&mut **self)
    .await
    .map_err(conflict_or_db)?;
    Ok(())
  }

  async fn insert_order_line(&mut self, line: &OrderLine) -> Result<(), StoreError> {
    sqlx::query(
      "INSERT INTO order_lines (id, order_id, product_id, quantity, price_cents) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(line.id)
    .bind(line.order_id)
    .bind(line.product_id)
    .bind(line.quantity)
    .bind(line.price_cents)
    .execute(&mut **self)
    .await
    .map_err(conflict_or_db)?;
    Ok(())
  }

  async fn deduct_stock(&mut self, product_id: Uuid, quantity: i64) -> Result<(), StoreError> {
    sqlx::query("UPDATE products SET stock = stock - $2 WHERE id = $1")
      .bind(product_id)
      .bind(quantity)
      .execute(&mut **self)
      .await
      .map_err(conflict_or_db)?;
    Ok(())
  }

  async fn clear_cart(&mut self, user_id: Uuid) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM cart_entries WHERE user_id = $1")
      .bind(user_id)
      .execute(&mut **self)
      .await
      .map_err(conflict_or_db)?;
    Ok(())
  }
}

#[async_trait]
impl Store for PgStore {
  // --- Catalog ---

  async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
    let products: Vec<Product> = sqlx::query_as(&format!(
      "SELECT {PRODUCT_COLUMNS} FROM products \
       WHERE ($1::text IS NULL OR category = $1) \
         AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%' OR description ILIKE '%' || $2 || '%') \
       ORDER BY created_at DESC"
    ))
    .bind(filter.category.as_deref())
    .bind(filter.q.as_deref())
    .fetch_all(&self.pool)
    .await?;
    Ok(products)
  }

  async fn latest_products(&self, limit: i64) -> Result<Vec<Product>, StoreError> {
    let products: Vec<Product> =
      sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC LIMIT $1"))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
    Ok(products)
  }

  async fn get_product(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
    let product: Option<Product> = sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(product)
  }

  async fn create_product(&self, new: &NewProduct) -> Result<Product, StoreError> {
    let product: Product = sqlx::query_as(&format!(
      "INSERT INTO products (id, name, description, price_cents, size, color, category, image, stock) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
       RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(&new.name)
    .bind(new.description.as_deref())
    .bind(new.price_cents)
    .bind(new.size.as_deref())
    .bind(new.color.as_deref())
    .bind(new.category.as_deref())
    .bind(new.image.as_deref())
    .bind(new.stock)
    .fetch_one(&self.pool)
    .await?;
    Ok(product)
  }

  async fn update_product(&self, id: Uuid, name: &str, price_cents: i64, stock: i64) -> Result<(), StoreError> {
    let result = sqlx::query("UPDATE products SET name = $2, price_cents = $3, stock = $4 WHERE id = $1")
      .bind(id)
      .bind(name)
      .bind(price_cents)
      .bind(stock)
      .execute(&self.pool)
      .await?;
    if result.rows_affected() == 0 {
      return Err(StoreError::ProductNotFound(id));
    }
    Ok(())
  }

  async fn delete_product(&self, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1").bind(id).execute(&self.pool).await?;
    if result.rows_affected() == 0 {
      return Err(StoreError::ProductNotFound(id));
    }
    Ok(())
  }

  // --- Cart ---

  async fn add_to_cart(&self, user_id: Uuid, product_id: Uuid, quantity: i64) -> Result<(), StoreError> {
    let quantity = quantity.max(1);
    let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = $1")
      .bind(product_id)
      .fetch_optional(&self.pool)
      .await?;
    if exists.is_none() {
      return Err(StoreError::ProductNotFound(product_id));
    }

    sqlx::query(
      "INSERT INTO cart_entries (id, user_id, product_id, quantity) VALUES ($1, $2, $3, $4) \
       ON CONFLICT (user_id, product_id) \
       DO UPDATE SET quantity = cart_entries.quantity + EXCLUDED.quantity",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  async fn update_cart_quantity(&self, user_id: Uuid, entry_id: Uuid, quantity: i64) -> Result<(), StoreError> {
    let quantity = quantity.max(1);
    sqlx::query("UPDATE cart_entries SET quantity = $3 WHERE id = $2 AND user_id = $1")
      .bind(user_id)
      .bind(entry_id)
      .bind(quantity)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn remove_cart_entry(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM cart_entries WHERE id = $2 AND user_id = $1")
      .bind(user_id)
      .bind(entry_id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn clear_cart(&self, user_id: Uuid) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM cart_entries WHERE user_id = $1").bind(user_id).execute(&self.pool).await?;
    Ok(())
  }

  async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, StoreError> {
    let lines: Vec<CartLine> = sqlx::query_as(
      "SELECT c.id AS entry_id, c.product_id, p.name, p.image, p.price_cents, c.quantity, p.stock, \
              c.quantity * p.price_cents AS line_total_cents \
       FROM cart_entries c \
       JOIN products p ON p.id = c.product_id \
       WHERE c.user_id = $1 \
       ORDER BY c.added_at DESC",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(lines)
  }

  async fn count_cart_items(&self, user_id: Uuid) -> Result<i64, StoreError> {
    let count: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(quantity), 0)::BIGINT FROM cart_entries WHERE user_id = $1")
      .bind(user_id)
      .fetch_one(&self.pool)
      .await?;
    Ok(count)
  }

  // --- Orders ---

  #[instrument(name = "store::place_order", skip(self, shipping_address, payment_method), err(Display))]
  async fn place_order(
    &self,
    user_id: Uuid,
    shipping_address: &str,
    payment_method: &str,
  ) -> Result<Uuid, StoreError> {
    let mut tx = self.pool.begin().await.map_err(conflict_or_db)?;
    // Dropping the transaction on the error path rolls everything back.
    let order = checkout::run(&mut tx, user_id, shipping_address, payment_method).await?;
    tx.commit().await.map_err(conflict_or_db)?;
    Ok(order.id)
  }

  #[instrument(name = "store::update_order_status", skip(self), err(Display))]
  async fn update_order_status(&self, order_id: Uuid, status: &str) -> Result<(), StoreError> {
    let parsed = OrderStatus::parse(status).ok_or_else(|| StoreError::InvalidStatus(status.to_string()))?;
    let result = sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
      .bind(order_id)
      .bind(parsed)
      .execute(&self.pool)
      .await?;
    if result.rows_affected() == 0 {
      return Err(StoreError::OrderNotFound(order_id));
    }
    Ok(())
  }

  async fn orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError> {
    let orders: Vec<Order> = sqlx::query_as(
      "SELECT id, user_id, total_amount_cents, status, shipping_address, payment_method, created_at \
       FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(orders)
  }

  async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, StoreError> {
    let order: Option<Order> = sqlx::query_as(
      "SELECT id, user_id, total_amount_cents, status, shipping_address, payment_method, created_at \
       FROM orders WHERE id = $1",
    )
    .bind(order_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(order)
  }

  async fn order_summary(&self, order_id: Uuid) -> Result<Option<OrderSummary>, StoreError> {
    let summary: Option<OrderSummary> = sqlx::query_as(
      "SELECT o.id, o.user_id, o.total_amount_cents, o.status, o.created_at, \
              u.name AS customer_name, u.email AS customer_email \
       FROM orders o JOIN users u ON u.id = o.user_id \
       WHERE o.id = $1",
    )
    .bind(order_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(summary)
  }

  async fn order_lines(&self, order_id: Uuid) -> Result<Vec<OrderLineView>, StoreError> {
    let lines: Vec<OrderLineView> = sqlx::query_as(
      "SELECT ol.id, ol.order_id, ol.product_id, ol.quantity, ol.price_cents, \
              p.name AS product_name, p.image AS product_image \
       FROM order_lines ol \
       LEFT JOIN products p ON p.id = ol.product_id \
       WHERE ol.order_id = $1 \
       ORDER BY ol.id",
    )
    .bind(order_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(lines)
  }

  async fn admin_orders(&self, filter: &OrderFilter) -> Result<Paged<OrderSummary>, StoreError> {
    let offset = Self::page_offset(filter.page);
    let items: Vec<OrderSummary> = sqlx::query_as(
      "SELECT o.id, o.user_id, o.total_amount_cents, o.status, o.created_at, \
              u.name AS customer_name, u.email AS customer_email \
       FROM orders o JOIN users u ON u.id = o.user_id \
       WHERE ($1::order_status IS NULL OR o.status = $1) \
         AND ($2::text IS NULL OR o.id::text ILIKE '%' || $2 || '%' \
              OR u.name ILIKE '%' || $2 || '%' OR u.email ILIKE '%' || $2 || '%') \
       ORDER BY o.created_at DESC \
       LIMIT $3 OFFSET $4",
    )
    .bind(filter.status)
    .bind(filter.q.as_deref())
    .bind(PAGE_SIZE)
    .bind(offset)
    .fetch_all(&self.pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
      "SELECT COUNT(*) FROM orders o JOIN users u ON u.id = o.user_id \
       WHERE ($1::order_status IS NULL OR o.status = $1) \
         AND ($2::text IS NULL OR o.id::text ILIKE '%' || $2 || '%' \
              OR u.name ILIKE '%' || $2 || '%' OR u.email ILIKE '%' || $2 || '%')",
    )
    .bind(filter.status)
    .bind(filter.q.as_deref())
    .fetch_one(&self.pool)
    .await?;

    Ok(Paged::new(items, total, filter.page.max(1)))
  }

  async fn recent_orders(&self, limit: i64) -> Result<Vec<OrderSummary>, StoreError> {
    let orders: Vec<OrderSummary> = sqlx::query_as(
      "SELECT o.id, o.user_id, o.total_amount_cents, o.status, o.created_at, \
              u.name AS customer_name, u.email AS customer_email \
       FROM orders o JOIN users u ON u.id = o.user_id \
       ORDER BY o.created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;
    Ok(orders)
  }

  async fn order_status_counts(&self) -> Result<OrderStatusCounts, StoreError> {
    let counts: OrderStatusCounts = sqlx::query_as(
      "SELECT COUNT(*) AS total, \
              COUNT(*) FILTER (WHERE status = 'pending') AS pending, \
              COUNT(*) FILTER (WHERE status = 'shipped') AS shipped, \
              COUNT(*) FILTER (WHERE status = 'delivered') AS delivered \
       FROM orders",
    )
    .fetch_one(&self.pool)
    .await?;
    Ok(counts)
  }

  async fn delete_order(&self, order_id: Uuid) -> Result<(), StoreError> {
    // order_lines go with the order via ON DELETE CASCADE.
    let result = sqlx::query("DELETE FROM orders WHERE id = $1").bind(order_id).execute(&self.pool).await?;
    if result.rows_affected() == 0 {
      return Err(StoreError::OrderNotFound(order_id));
    }
    Ok(())
  }

  async fn admin_stats(&self) -> Result<AdminStats, StoreError> {
    let stats: AdminStats = sqlx::query_as(
      "SELECT (SELECT COUNT(*) FROM products) AS total_products, \
              (SELECT COUNT(*) FROM orders) AS total_orders, \
              (SELECT COUNT(*) FROM orders WHERE status = 'pending') AS pending_orders, \
              (SELECT COALESCE(SUM(total_amount_cents), 0)::BIGINT FROM orders WHERE status <> 'cancelled') AS revenue_cents",
    )
    .fetch_one(&self.pool)
    .await?;
    Ok(stats)
  }

  // --- Users ---

  #[instrument(name = "store::create_user", skip(self, new), fields(email = %new.email))]
  async fn create_user(&self, new: &NewUser) -> Result<User, StoreError> {
    let user: User = sqlx::query_as(&format!(
      "INSERT INTO users (id, name, email, password_hash, role, phone, address, security_question, security_answer) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
       RETURNING {USER_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.password_hash)
    .bind(new.role)
    .bind(new.phone.as_deref())
    .bind(new.address.as_deref())
    .bind(new.security_question.as_deref())
    .bind(new.security_answer.as_deref())
    .fetch_one(&self.pool)
    .await
    .map_err(|e| duplicate_email_or_db(e, &new.email))?;
    Ok(user)
  }

  async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
    let user: Option<User> = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
      .bind(email)
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }

  async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
    let user: Option<User> = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }

  async fn update_password(&self, user_id: Uuid, password_hash: &str) -> Result<(), StoreError> {
    let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
      .bind(user_id)
      .bind(password_hash)
      .execute(&self.pool)
      .await?;
    if result.rows_affected() == 0 {
      return Err(StoreError::UserNotFound);
    }
    Ok(())
  }

  async fn update_profile(
    &self,
    user_id: Uuid,
    name: &str,
    phone: Option<&str>,
    address: Option<&str>,
  ) -> Result<(), StoreError> {
    let result = sqlx::query("UPDATE users SET name = $2, phone = $3, address = $4 WHERE id = $1")
      .bind(user_id)
      .bind(name)
      .bind(phone)
      .bind(address)
      .execute(&self.pool)
      .await?;
    if result.rows_affected() == 0 {
      return Err(StoreError::UserNotFound);
    }
    Ok(())
  }

  async fn update_profile_image(&self, user_id: Uuid, image: &str) -> Result<(), StoreError> {
    let result = sqlx::query("UPDATE users SET profile_image = $2 WHERE id = $1")
      .bind(user_id)
      .bind(image)
      .execute(&self.pool)
      .await?;
    if result.rows_affected() == 0 {
      return Err(StoreError::UserNotFound);
    }
    Ok(())
  }

  async fn customers(&self, filter: &CustomerFilter) -> Result<Paged<CustomerSummary>, StoreError> {
    let order_clause = match filter.sort {
      CustomerSort::Newest => "u.created_at DESC",
      CustomerSort::Oldest => "u.created_at ASC",
      CustomerSort::Name => "u.name ASC",
    };
    let offset = Self::page_offset(filter.page);

    let items: Vec<CustomerSummary> = sqlx::query_as(&format!(
      "SELECT u.id, u.name, u.email, u.phone, u.created_at, \
              COUNT(o.id) AS order_count, \
              COALESCE(SUM(o.total_amount_cents) FILTER (WHERE o.status <> 'cancelled'), 0)::BIGINT AS total_spent_cents \
       FROM users u \
       LEFT JOIN orders o ON o.user_id = u.id \
       WHERE u.role = 'customer' \
         AND ($1::text IS NULL OR u.name ILIKE '%' || $1 || '%' \
              OR u.email ILIKE '%' || $1 || '%' OR u.phone ILIKE '%' || $1 || '%') \
       GROUP BY u.id \
       ORDER BY {order_clause} \
       LIMIT $2 OFFSET $3"
    ))
    .bind(filter.q.as_deref())
    .bind(PAGE_SIZE)
    .bind(offset)
    .fetch_all(&self.pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
      "SELECT COUNT(*) FROM users u \
       WHERE u.role = 'customer' \
         AND ($1::text IS NULL OR u.name ILIKE '%' || $1 || '%' \
              OR u.email ILIKE '%' || $1 || '%' OR u.phone ILIKE '%' || $1 || '%')",
    )
    .bind(filter.q.as_deref())
    .fetch_one(&self.pool)
    .await?;

    Ok(Paged::new(items, total, filter.page.max(1)))
  }

  async fn update_customer(
    &self,
    id: Uuid,
    name: &str,
    email: &str,
    phone: Option<&str>,
    address: Option<&str>,
  ) -> Result<(), StoreError> {
    let result = sqlx::query(
      "UPDATE users SET name = $2, email = $3, phone = $4, address = $5 WHERE id = $1 AND role = 'customer'",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(address)
    .execute(&self.pool)
    .await
    .map_err(|e| duplicate_email_or_db(e, email))?;
    if result.rows_affected() == 0 {
      return Err(StoreError::UserNotFound);
    }
    Ok(())
  }

  async fn employees(&self, filter: &EmployeeFilter) -> Result<Paged<User>, StoreError> {
    let offset = Self::page_offset(filter.page);
    let items: Vec<User> = sqlx::query_as(&format!(
      "SELECT {USER_COLUMNS} FROM users \
       WHERE role <> 'customer' \
         AND ($1::user_role IS NULL OR role = $1) \
         AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%' OR email ILIKE '%' || $2 || '%') \
       ORDER BY created_at DESC \
       LIMIT $3 OFFSET $4"
    ))
    .bind(filter.role)
    .bind(filter.q.as_deref())
    .bind(PAGE_SIZE)
    .bind(offset)
    .fetch_all(&self.pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
      "SELECT COUNT(*) FROM users \
       WHERE role <> 'customer' \
         AND ($1::user_role IS NULL OR role = $1) \
         AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%' OR email ILIKE '%' || $2 || '%')",
    )
    .bind(filter.role)
    .bind(filter.q.as_deref())
    .fetch_one(&self.pool)
    .await?;

    Ok(Paged::new(items, total, filter.page.max(1)))
  }

  #[instrument(name = "store::delete_user", skip(self), err(Display))]
  async fn delete_user(&self, user_id: Uuid) -> Result<(), StoreError> {
    // Cart entries and orders (with their lines) follow via ON DELETE CASCADE.
    let result = sqlx::query("DELETE FROM users WHERE id = $1").bind(user_id).execute(&self.pool).await?;
    if result.rows_affected() == 0 {
      return Err(StoreError::UserNotFound);
    }
    Ok(())
  }
}
