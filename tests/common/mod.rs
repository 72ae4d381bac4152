// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::Level;
use uuid::Uuid;

use outlayers::models::{
  AdminStats, CartEntry, CartLine, CustomerSummary, NewProduct, NewUser, Order, OrderLine, OrderLineView,
  OrderStatus, OrderStatusCounts, OrderSummary, Product, ProductFilter, Role, User,
};
use outlayers::store::checkout::{self, CheckoutLine, CheckoutTx};
use outlayers::store::{CustomerFilter, CustomerSort, EmployeeFilter, OrderFilter, Paged, Store, StoreError, PAGE_SIZE};

// --- In-memory Store implementation ---
//
// Runs the same checkout engine as the Postgres backend. A placement
// stages its writes on a transaction value and applies them only when
// the engine returns Ok; the tokio mutex around the whole attempt
// stands in for the row locks a database takes.

#[derive(Default)]
struct MemState {
  products: Vec<Product>,
  cart: Vec<CartEntry>,
  orders: Vec<Order>,
  order_lines: Vec<OrderLine>,
  users: Vec<User>,
}

#[derive(Default)]
pub struct MemStore {
  state: RwLock<MemState>,
  checkout_gate: Mutex<()>,
  /// Number of upcoming placements that should fail with `Conflict` at
  /// the cart-clear step, after the order and lines were already
  /// staged. Lets tests exercise rollback and the retry path.
  pub conflicts_to_inject: AtomicUsize,
}

impl MemStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn inject_conflicts(&self, count: usize) {
    self.conflicts_to_inject.store(count, Ordering::SeqCst);
  }

  fn take_injected_conflict(&self) -> bool {
    self
      .conflicts_to_inject
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
      .is_ok()
  }
}

struct MemCheckoutTx<'a> {
  store: &'a MemStore,
  staged_order: Option<Order>,
  staged_lines: Vec<OrderLine>,
  staged_deductions: Vec<(Uuid, i64)>,
  staged_clear: Option<Uuid>,
}

impl<'a> MemCheckoutTx<'a> {
  fn new(store: &'a MemStore) -> Self {
    MemCheckoutTx {
      store,
      staged_order: None,
      staged_lines: Vec::new(),
      staged_deductions: Vec::new(),
      staged_clear: None,
    }
  }

  /// Commit: apply every staged mutation. Dropping the value without
  /// calling this is the rollback path.
  fn apply(self) {
    let mut state = self.store.state.write();
    if let Some(order) = self.staged_order {
      state.orders.push(order);
    }
    state.order_lines.extend(self.staged_lines);
    for (product_id, quantity) in self.staged_deductions {
      if let Some(product) = state.products.iter_mut().find(|p| p.id == product_id) {
        product.stock -= quantity;
      }
    }
    if let Some(user_id) = self.staged_clear {
      state.cart.retain(|entry| entry.user_id != user_id);
    }
  }
}

#[async_trait]
impl<'a> CheckoutTx for MemCheckoutTx<'a> {
  async fn locked_cart_lines(&mut self, user_id: Uuid) -> Result<Vec<CheckoutLine>, StoreError> {
    let state = self.store.state.read();
    Ok(
      state
        .cart
        .iter()
        .filter(|entry| entry.user_id == user_id)
        .filter_map(|entry| {
          state.products.iter().find(|p| p.id == entry.product_id).map(|product| CheckoutLine {
            product_id: product.id,
            quantity: entry.quantity,
            price_cents: product.price_cents,
            stock: product.stock,
          })
        })
        .collect(),
    )
  }

  async fn insert_order(&mut self, order: &Order) -> Result<(), StoreError> {
    self.staged_order = Some(order.clone());
    Ok(())
  }

  async fn insert_order_line(&mut self, line: &OrderLine) -> Result<(), StoreError> {
    self.staged_lines.push(line.clone());
    Ok(())
  }

  async fn deduct_stock(&mut self, product_id: Uuid, quantity: i64) -> Result<(), StoreError> {
    self.staged_deductions.push((product_id, quantity));
    Ok(())
  }

  async fn clear_cart(&mut self, user_id: Uuid) -> Result<(), StoreError> {
    if self.store.take_injected_conflict() {
      return Err(StoreError::Conflict);
    }
    self.staged_clear = Some(user_id);
    Ok(())
  }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn paginate<T: Clone>(items: Vec<T>, page: i64) -> Paged<T> {
  let page = page.max(1);
  let total = items.len() as i64;
  let start = ((page - 1) * PAGE_SIZE) as usize;
  let page_items = items.into_iter().skip(start).take(PAGE_SIZE as usize).collect();
  Paged::new(page_items, total, page)
}

#[async_trait]
impl Store for MemStore {
  // --- Catalog ---

  async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
    let state = self.state.read();
    Ok(
      state
        .products
        .iter()
        .rev()
        .filter(|p| match &filter.category {
          Some(category) => p.category.as_deref() == Some(category.as_str()),
          None => true,
        })
        .filter(|p| match &filter.q {
          Some(q) => {
            contains_ci(&p.name, q) || p.description.as_deref().map(|d| contains_ci(d, q)).unwrap_or(false)
          }
          None => true,
        })
        .cloned()
        .collect(),
    )
  }

  async fn latest_products(&self, limit: i64) -> Result<Vec<Product>, StoreError> {
    let state = self.state.read();
    Ok(state.products.iter().rev().take(limit as usize).cloned().collect())
  }

  async fn get_product(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
    Ok(self.state.read().products.iter().find(|p| p.id == id).cloned())
  }

  async fn create_product(&self, new: &NewProduct) -> Result<Product, StoreError> {
    let product = Product {
      id: Uuid::new_v4(),
      name: new.name.clone(),
      description: new.description.clone(),
      price_cents: new.price_cents,
      size: new.size.clone(),
      color: new.color.clone(),
      category: new.category.clone(),
      image: new.image.clone(),
      stock: new.stock,
      created_at: Utc::now(),
    };
    self.state.write().products.push(product.clone());
    Ok(product)
  }

  async fn update_product(&self, id: Uuid, name: &str, price_cents: i64, stock: i64) -> Result<(), StoreError> {
    let mut state = self.state.write();
    let product = state.products.iter_mut().find(|p| p.id == id).ok_or(StoreError::ProductNotFound(id))?;
    product.name = name.to_string();
    product.price_cents = price_cents;
    product.stock = stock;
    Ok(())
  }

  async fn delete_product(&self, id: Uuid) -> Result<(), StoreError> {
    let mut state = self.state.write();
    let before = state.products.len();
    state.products.retain(|p| p.id != id);
    if state.products.len() == before {
      return Err(StoreError::ProductNotFound(id));
    }
    // Cart entries cascade with the product, order lines stay.
    state.cart.retain(|entry| entry.product_id != id);
    Ok(())
  }

  // --- Cart ---

  async fn add_to_cart(&self, user_id: Uuid, product_id: Uuid, quantity: i64) -> Result<(), StoreError> {
    let quantity = quantity.max(1);
    let mut state = self.state.write();
    if !state.products.iter().any(|p| p.id == product_id) {
      return Err(StoreError::ProductNotFound(product_id));
    }
    if let Some(entry) = state.cart.iter_mut().find(|e| e.user_id == user_id && e.product_id == product_id) {
      entry.quantity += quantity;
    } else {
      state.cart.push(CartEntry {
        id: Uuid::new_v4(),
        user_id,
        product_id,
        quantity,
        added_at: Utc::now(),
      });
    }
    Ok(())
  }

  async fn update_cart_quantity(&self, user_id: Uuid, entry_id: Uuid, quantity: i64) -> Result<(), StoreError> {
    let mut state = self.state.write();
    if let Some(entry) = state.cart.iter_mut().find(|e| e.id == entry_id && e.user_id == user_id) {
      entry.quantity = quantity.max(1);
    }
    Ok(())
  }

  async fn remove_cart_entry(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), StoreError> {
    self.state.write().cart.retain(|e| !(e.id == entry_id && e.user_id == user_id));
    Ok(())
  }

  async fn clear_cart(&self, user_id: Uuid) -> Result<(), StoreError> {
    self.state.write().cart.retain(|e| e.user_id != user_id);
    Ok(())
  }

  async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, StoreError> {
    let state = self.state.read();
    Ok(
      state
        .cart
        .iter()
        .rev()
        .filter(|entry| entry.user_id == user_id)
        .filter_map(|entry| {
          state.products.iter().find(|p| p.id == entry.product_id).map(|product| CartLine {
            entry_id: entry.id,
            product_id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            price_cents: product.price_cents,
            quantity: entry.quantity,
            stock: product.stock,
            line_total_cents: entry.quantity * product.price_cents,
          })
        })
        .collect(),
    )
  }

  async fn count_cart_items(&self, user_id: Uuid) -> Result<i64, StoreError> {
    Ok(
      self
        .state
        .read()
        .cart
        .iter()
        .filter(|e| e.user_id == user_id)
        .map(|e| e.quantity)
        .sum(),
    )
  }

  // --- Orders ---

  async fn place_order(
    &self,
    user_id: Uuid,
    shipping_address: &str,
    payment_method: &str,
  ) -> Result<Uuid, StoreError> {
    let _gate = self.checkout_gate.lock().await;
    let mut tx = MemCheckoutTx::new(self);
    let order = checkout::run(&mut tx, user_id, shipping_address, payment_method).await?;
    let order_id = order.id;
    tx.apply();
    Ok(order_id)
  }

  async fn update_order_status(&self, order_id: Uuid, status: &str) -> Result<(), StoreError> {
    let parsed = OrderStatus::parse(status).ok_or_else(|| StoreError::InvalidStatus(status.to_string()))?;
    let mut state = self.state.write();
    let order = state.orders.iter_mut().find(|o| o.id == order_id).ok_or(StoreError::OrderNotFound(order_id))?;
    order.status = parsed;
    Ok(())
  }

  async fn orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError> {
    Ok(self.state.read().orders.iter().rev().filter(|o| o.user_id == user_id).cloned().collect())
  }

  async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, StoreError> {
    Ok(self.state.read().orders.iter().find(|o| o.id == order_id).cloned())
  }

  async fn order_summary(&self, order_id: Uuid) -> Result<Option<OrderSummary>, StoreError> {
    let state = self.state.read();
    Ok(state.orders.iter().find(|o| o.id == order_id).and_then(|order| {
      state.users.iter().find(|u| u.id == order.user_id).map(|user| OrderSummary {
        id: order.id,
        user_id: order.user_id,
        total_amount_cents: order.total_amount_cents,
        status: order.status,
        created_at: order.created_at,
        customer_name: user.name.clone(),
        customer_email: user.email.clone(),
      })
    }))
  }

  async fn order_lines(&self, order_id: Uuid) -> Result<Vec<OrderLineView>, StoreError> {
    let state = self.state.read();
    Ok(
      state
        .order_lines
        .iter()
        .filter(|line| line.order_id == order_id)
        .map(|line| {
          let product = state.products.iter().find(|p| p.id == line.product_id);
          OrderLineView {
            id: line.id,
            order_id: line.order_id,
            product_id: line.product_id,
            quantity: line.quantity,
            price_cents: line.price_cents,
            product_name: product.map(|p| p.name.clone()),
            product_image: product.and_then(|p| p.image.clone()),
          }
        })
        .collect(),
    )
  }

  async fn admin_orders(&self, filter: &OrderFilter) -> Result<Paged<OrderSummary>, StoreError> {
    let state = self.state.read();
    let summaries: Vec<OrderSummary> = state
      .orders
      .iter()
      .rev()
      .filter(|order| filter.status.map(|wanted| order.status == wanted).unwrap_or(true))
      .filter_map(|order| {
        let user = state.users.iter().find(|u| u.id == order.user_id)?;
        let matches = match &filter.q {
          Some(q) => {
            contains_ci(&order.id.to_string(), q) || contains_ci(&user.name, q) || contains_ci(&user.email, q)
          }
          None => true,
        };
        matches.then(|| OrderSummary {
          id: order.id,
          user_id: order.user_id,
          total_amount_cents: order.total_amount_cents,
          status: order.status,
          created_at: order.created_at,
          customer_name: user.name.clone(),
          customer_email: user.email.clone(),
        })
      })
      .collect();
    Ok(paginate(summaries, filter.page))
  }

  async fn recent_orders(&self, limit: i64) -> Result<Vec<OrderSummary>, StoreError> {
    let state = self.state.read();
    Ok(
      state
        .orders
        .iter()
        .rev()
        .filter_map(|order| {
          state.users.iter().find(|u| u.id == order.user_id).map(|user| OrderSummary {
            id: order.id,
            user_id: order.user_id,
            total_amount_cents: order.total_amount_cents,
            status: order.status,
            created_at: order.created_at,
            customer_name: user.name.clone(),
            customer_email: user.email.clone(),
          })
        })
        .take(limit as usize)
        .collect(),
    )
  }

  async fn order_status_counts(&self) -> Result<OrderStatusCounts, StoreError> {
    let state = self.state.read();
    let mut counts = OrderStatusCounts::default();
    for order in &state.orders {
      counts.total += 1;
      match order.status {
        OrderStatus::Pending => counts.pending += 1,
        OrderStatus::Shipped => counts.shipped += 1,
        OrderStatus::Delivered => counts.delivered += 1,
        OrderStatus::Confirmed | OrderStatus::Cancelled => {}
      }
    }
    Ok(counts)
  }

  async fn delete_order(&self, order_id: Uuid) -> Result<(), StoreError> {
    let mut state = self.state.write();
    let before = state.orders.len();
    state.orders.retain(|o| o.id != order_id);
    if state.orders.len() == before {
      return Err(StoreError::OrderNotFound(order_id));
    }
    state.order_lines.retain(|line| line.order_id != order_id);
    Ok(())
  }

  async fn admin_stats(&self) -> Result<AdminStats, StoreError> {
    let state = self.state.read();
    Ok(AdminStats {
      total_products: state.products.len() as i64,
      total_orders: state.orders.len() as i64,
      pending_orders: state.orders.iter().filter(|o| o.status == OrderStatus::Pending).count() as i64,
      revenue_cents: state
        .orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .map(|o| o.total_amount_cents)
        .sum(),
    })
  }

  // --- Users ---

  async fn create_user(&self, new: &NewUser) -> Result<User, StoreError> {
    let mut state = self.state.write();
    if state.users.iter().any(|u| u.email == new.email) {
      return Err(StoreError::DuplicateEmail(new.email.clone()));
    }
    let user = User {
      id: Uuid::new_v4(),
      name: new.name.clone(),
      email: new.email.clone(),
      password_hash: new.password_hash.clone(),
      role: new.role,
      phone: new.phone.clone(),
      address: new.address.clone(),
      profile_image: None,
      security_question: new.security_question.clone(),
      security_answer: new.security_answer.clone(),
      created_at: Utc::now(),
    };
    state.users.push(user.clone());
    Ok(user)
  }

  async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
    Ok(self.state.read().users.iter().find(|u| u.email == email).cloned())
  }

  async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
    Ok(self.state.read().users.iter().find(|u| u.id == id).cloned())
  }

  async fn update_password(&self, user_id: Uuid, password_hash: &str) -> Result<(), StoreError> {
    let mut state = self.state.write();
    let user = state.users.iter_mut().find(|u| u.id == user_id).ok_or(StoreError::UserNotFound)?;
    user.password_hash = password_hash.to_string();
    Ok(())
  }

  async fn update_profile(
    &self,
    user_id: Uuid,
    name: &str,
    phone: Option<&str>,
    address: Option<&str>,
  ) -> Result<(), StoreError> {
    let mut state = self.state.write();
    let user = state.users.iter_mut().find(|u| u.id == user_id).ok_or(StoreError::UserNotFound)?;
    user.name = name.to_string();
    user.phone = phone.map(str::to_string);
    user.address = address.map(str::to_string);
    Ok(())
  }

  async fn update_profile_image(&self, user_id: Uuid, image: &str) -> Result<(), StoreError> {
    let mut state = self.state.write();
    let user = state.users.iter_mut().find(|u| u.id == user_id).ok_or(StoreError::UserNotFound)?;
    user.profile_image = Some(image.to_string());
    Ok(())
  }

  async fn customers(&self, filter: &CustomerFilter) -> Result<Paged<CustomerSummary>, StoreError> {
    let state = self.state.read();
    let mut summaries: Vec<CustomerSummary> = state
      .users
      .iter()
      .filter(|u| u.role == Role::Customer)
      .filter(|u| match &filter.q {
        Some(q) => {
          contains_ci(&u.name, q)
            || contains_ci(&u.email, q)
            || u.phone.as_deref().map(|p| contains_ci(p, q)).unwrap_or(false)
        }
        None => true,
      })
      .map(|user| {
        let orders: Vec<&Order> = state.orders.iter().filter(|o| o.user_id == user.id).collect();
        CustomerSummary {
          id: user.id,
          name: user.name.clone(),
          email: user.email.clone(),
          phone: user.phone.clone(),
          created_at: user.created_at,
          order_count: orders.len() as i64,
          total_spent_cents: orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .map(|o| o.total_amount_cents)
            .sum(),
        }
      })
      .collect();
    match filter.sort {
      CustomerSort::Newest => summaries.reverse(),
      CustomerSort::Oldest => {}
      CustomerSort::Name => summaries.sort_by(|a, b| a.name.cmp(&b.name)),
    }
    Ok(paginate(summaries, filter.page))
  }

  async fn update_customer(
    &self,
    id: Uuid,
    name: &str,
    email: &str,
    phone: Option<&str>,
    address: Option<&str>,
  ) -> Result<(), StoreError> {
    let mut state = self.state.write();
    if state.users.iter().any(|u| u.id != id && u.email == email) {
      return Err(StoreError::DuplicateEmail(email.to_string()));
    }
    let user = state
      .users
      .iter_mut()
      .find(|u| u.id == id && u.role == Role::Customer)
      .ok_or(StoreError::UserNotFound)?;
    user.name = name.to_string();
    user.email = email.to_string();
    user.phone = phone.map(str::to_string);
    user.address = address.map(str::to_string);
    Ok(())
  }

  async fn employees(&self, filter: &EmployeeFilter) -> Result<Paged<User>, StoreError> {
    let state = self.state.read();
    let employees: Vec<User> = state
      .users
      .iter()
      .rev()
      .filter(|u| u.role != Role::Customer)
      .filter(|u| filter.role.map(|wanted| u.role == wanted).unwrap_or(true))
      .filter(|u| match &filter.q {
        Some(q) => contains_ci(&u.name, q) || contains_ci(&u.email, q),
        None => true,
      })
      .cloned()
      .collect();
    Ok(paginate(employees, filter.page))
  }

  async fn delete_user(&self, user_id: Uuid) -> Result<(), StoreError> {
    let mut state = self.state.write();
    let before = state.users.len();
    state.users.retain(|u| u.id != user_id);
    if state.users.len() == before {
      return Err(StoreError::UserNotFound);
    }
    state.cart.retain(|entry| entry.user_id != user_id);
    let removed_orders: Vec<Uuid> =
      state.orders.iter().filter(|o| o.user_id == user_id).map(|o| o.id).collect();
    state.orders.retain(|o| o.user_id != user_id);
    state.order_lines.retain(|line| !removed_orders.contains(&line.order_id));
    Ok(())
  }
}

// --- Fixtures ---

pub fn mem_store() -> Arc<MemStore> {
  Arc::new(MemStore::new())
}

pub fn new_product(name: &str, price_cents: i64, stock: i64) -> NewProduct {
  NewProduct {
    name: name.to_string(),
    description: Some(format!("{} from the winter line", name)),
    price_cents,
    size: Some("M".to_string()),
    color: None,
    category: Some("jackets".to_string()),
    image: None,
    stock,
  }
}

pub async fn seed_product(store: &MemStore, name: &str, price_cents: i64, stock: i64) -> Product {
  store.create_product(&new_product(name, price_cents, stock)).await.expect("seed product")
}

pub fn new_user(name: &str, email: &str, role: Role) -> NewUser {
  NewUser {
    name: name.to_string(),
    email: email.to_string(),
    // Legacy plain-text credential; login upgrades it to Argon2.
    password_hash: "secret".to_string(),
    role,
    phone: None,
    address: None,
    security_question: None,
    security_answer: None,
  }
}

pub async fn seed_customer(store: &MemStore, name: &str, email: &str) -> User {
  store.create_user(&new_user(name, email, Role::Customer)).await.expect("seed customer")
}

pub async fn seed_employee(store: &MemStore, name: &str, email: &str, role: Role) -> User {
  store.create_user(&new_user(name, email, role)).await.expect("seed employee")
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
