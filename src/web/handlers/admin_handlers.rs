// src/web/handlers/admin_handlers.rs

//! Admin pages: dashboard, order management, customer management,
//! employee management and the product catalog. Product edit/delete are
//! shared with staff; everything else requires an admin session.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::see_other;
use crate::errors::AppError;
use crate::models::{NewProduct, NewUser, OrderStatus, Role};
use crate::services::auth_service;
use crate::state::AppState;
use crate::store::{CustomerFilter, CustomerSort, EmployeeFilter, OrderFilter, StoreError};
use crate::web::extractors::{AdminSession, StaffSession};

/// Orders shown on the admin dashboard.
const DASHBOARD_RECENT_ORDERS: i64 = 20;
const MIN_PASSWORD_LEN: usize = 6;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct AdminOrdersQuery {
  pub status: Option<String>,
  pub q: Option<String>,
  pub page: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateStatusPayload {
  pub status: String,
}

#[derive(Deserialize, Debug)]
pub struct CustomersQuery {
  pub q: Option<String>,
  pub sort: Option<String>,
  pub page: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct CreateCustomerPayload {
  pub name: String,
  pub email: String,
  pub password: String,
  pub phone: Option<String>,
  pub address: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateCustomerPayload {
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub address: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ResetPasswordPayload {
  pub password: String,
  pub confirm_password: String,
}

#[derive(Deserialize, Debug)]
pub struct EmployeesQuery {
  pub q: Option<String>,
  pub role: Option<String>,
  pub page: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct CreateEmployeePayload {
  pub name: String,
  pub email: String,
  pub password: String,
  pub role: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AdminProductsQuery {
  pub category: Option<String>,
  pub q: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateProductPayload {
  pub name: String,
  pub price_cents: i64,
  pub stock: i64,
}

fn trimmed_or_none(value: Option<&String>) -> Option<String> {
  value.map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string)
}

fn parse_status_filter(status: Option<&String>) -> Result<Option<OrderStatus>, AppError> {
  match status.map(|s| s.trim()).filter(|s| !s.is_empty()) {
    None => Ok(None),
    Some(s) => OrderStatus::parse(s)
      .map(Some)
      .ok_or_else(|| AppError::Validation("Unknown status filter.".to_string())),
  }
}

// --- Dashboard ---

#[instrument(name = "handler::admin_dashboard", skip(app_state, admin))]
pub async fn dashboard_handler(app_state: web::Data<AppState>, admin: AdminSession) -> Result<HttpResponse, AppError> {
  let stats = app_state.store.admin_stats().await?;
  let recent_orders = app_state.store.recent_orders(DASHBOARD_RECENT_ORDERS).await?;
  let flash = app_state.sessions.take_flash(admin.0.token);

  Ok(HttpResponse::Ok().json(json!({
      "stats": stats,
      "recent_orders": recent_orders,
      "flash": flash
  })))
}

// --- Orders ---

#[instrument(name = "handler::admin_orders", skip(app_state, admin, query))]
pub async fn orders_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  query: web::Query<AdminOrdersQuery>,
) -> Result<HttpResponse, AppError> {
  let filter = OrderFilter {
    status: parse_status_filter(query.status.as_ref())?,
    q: trimmed_or_none(query.q.as_ref()),
    page: query.page.unwrap_or(1),
  };
  let orders = app_state.store.admin_orders(&filter).await?;
  let counts = app_state.store.order_status_counts().await?;
  let flash = app_state.sessions.take_flash(admin.0.token);

  Ok(HttpResponse::Ok().json(json!({
      "orders": orders,
      "counts": counts,
      "flash": flash
  })))
}

#[instrument(name = "handler::admin_order_detail", skip(app_state, _admin, path), fields(order_id = %path.as_ref()))]
pub async fn order_detail_handler(
  app_state: web::Data<AppState>,
  _admin: AdminSession,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();
  let order = app_state
    .store
    .order_summary(order_id)
    .await?
    .ok_or_else(|| AppError::NotFound("Order not found.".to_string()))?;
  let items = app_state.store.order_lines(order_id).await?;

  Ok(HttpResponse::Ok().json(json!({ "order": order, "items": items })))
}

#[instrument(
    name = "handler::admin_update_order_status",
    skip(app_state, admin, path, payload),
    fields(order_id = %path.as_ref(), status = %payload.status)
)]
pub async fn update_order_status_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  path: web::Path<Uuid>,
  payload: web::Json<UpdateStatusPayload>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();
  match app_state.store.update_order_status(order_id, payload.status.trim()).await {
    Ok(()) => {
      info!("Order status updated.");
      app_state.sessions.set_flash(admin.0.token, "Order status updated.");
    }
    Err(StoreError::InvalidStatus(_)) => {
      warn!("Rejected unknown order status.");
      app_state.sessions.set_flash(admin.0.token, "Invalid status.");
    }
    Err(e) => return Err(e.into()),
  }
  Ok(see_other(&format!("/admin/orders/{}", order_id)))
}

#[instrument(name = "handler::admin_delete_order", skip(app_state, admin, path), fields(order_id = %path.as_ref()))]
pub async fn delete_order_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();
  app_state.store.delete_order(order_id).await?;

  info!("Order deleted.");
  app_state.sessions.set_flash(admin.0.token, "Order deleted.");
  Ok(see_other("/admin/orders"))
}

// --- Customers ---

#[instrument(name = "handler::admin_customers", skip(app_state, admin, query))]
pub async fn customers_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  query: web::Query<CustomersQuery>,
) -> Result<HttpResponse, AppError> {
  let sort = query
    .sort
    .as_deref()
    .and_then(CustomerSort::parse)
    .unwrap_or_default();
  let filter = CustomerFilter {
    q: trimmed_or_none(query.q.as_ref()),
    sort,
    page: query.page.unwrap_or(1),
  };
  let customers = app_state.store.customers(&filter).await?;
  let flash = app_state.sessions.take_flash(admin.0.token);

  Ok(HttpResponse::Ok().json(json!({ "customers": customers, "flash": flash })))
}

#[instrument(name = "handler::admin_create_customer", skip(app_state, admin, payload), fields(req_email = %payload.email))]
pub async fn create_customer_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  payload: web::Json<CreateCustomerPayload>,
) -> Result<HttpResponse, AppError> {
  let name = payload.name.trim();
  let email = payload.email.trim();
  if name.is_empty() || email.is_empty() || payload.password.is_empty() {
    return Err(AppError::Validation("Name, email and password are required.".to_string()));
  }

  let password_hash = auth_service::hash_password(&payload.password)?;
  let new_user = NewUser {
    name: name.to_string(),
    email: email.to_string(),
    password_hash,
    role: Role::Customer,
    phone: trimmed_or_none(payload.phone.as_ref()),
    address: trimmed_or_none(payload.address.as_ref()),
    security_question: None,
    security_answer: None,
  };
  let user = app_state.store.create_user(&new_user).await?;

  info!(user_id = %user.id, "Customer account created.");
  app_state.sessions.set_flash(admin.0.token, "Customer created.");
  Ok(see_other("/admin/customers"))
}

#[instrument(name = "handler::admin_update_customer", skip(app_state, admin, path, payload), fields(user_id = %path.as_ref()))]
pub async fn update_customer_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  path: web::Path<Uuid>,
  payload: web::Json<UpdateCustomerPayload>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let name = payload.name.trim();
  let email = payload.email.trim();
  if name.is_empty() || email.is_empty() {
    return Err(AppError::Validation("Name and email are required.".to_string()));
  }
  let phone = payload.phone.as_deref().map(str::trim).filter(|s| !s.is_empty());
  let address = payload.address.as_deref().map(str::trim).filter(|s| !s.is_empty());

  app_state.store.update_customer(user_id, name, email, phone, address).await?;

  app_state.sessions.set_flash(admin.0.token, "Customer updated.");
  Ok(see_other("/admin/customers"))
}

#[instrument(name = "handler::admin_reset_customer_password", skip(app_state, admin, path, payload), fields(user_id = %path.as_ref()))]
pub async fn reset_customer_password_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  path: web::Path<Uuid>,
  payload: web::Json<ResetPasswordPayload>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  if payload.password.len() < MIN_PASSWORD_LEN {
    return Err(AppError::Validation("Password must be at least 6 characters.".to_string()));
  }
  if payload.password != payload.confirm_password {
    return Err(AppError::Validation("Passwords do not match.".to_string()));
  }

  let password_hash = auth_service::hash_password(&payload.password)?;
  app_state.store.update_password(user_id, &password_hash).await?;

  info!("Customer password reset by admin.");
  app_state.sessions.set_flash(admin.0.token, "Password reset.");
  Ok(see_other("/admin/customers"))
}

#[instrument(name = "handler::admin_delete_customer", skip(app_state, admin, path), fields(user_id = %path.as_ref()))]
pub async fn delete_customer_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let target = app_state
    .store
    .user_by_id(user_id)
    .await?
    .ok_or_else(|| AppError::NotFound("Customer not found.".to_string()))?;
  if target.role != Role::Customer {
    return Err(AppError::Validation("Only customer accounts can be deleted here.".to_string()));
  }

  app_state.store.delete_user(user_id).await?;

  info!("Customer deleted along with cart and orders.");
  app_state.sessions.set_flash(admin.0.token, "Customer deleted.");
  Ok(see_other("/admin/customers"))
}

// --- Employees ---

#[instrument(name = "handler::admin_employees", skip(app_state, admin, query))]
pub async fn employees_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  query: web::Query<EmployeesQuery>,
) -> Result<HttpResponse, AppError> {
  let role = match query.role.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
    None => None,
    Some(s) => match Role::parse(s) {
      Some(Role::Staff) => Some(Role::Staff),
      Some(Role::Admin) => Some(Role::Admin),
      _ => return Err(AppError::Validation("Unknown role filter.".to_string())),
    },
  };
  let filter = EmployeeFilter {
    q: trimmed_or_none(query.q.as_ref()),
    role,
    page: query.page.unwrap_or(1),
  };
  let employees = app_state.store.employees(&filter).await?;
  let flash = app_state.sessions.take_flash(admin.0.token);

  Ok(HttpResponse::Ok().json(json!({ "employees": employees, "flash": flash })))
}

#[instrument(name = "handler::admin_create_employee", skip(app_state, admin, payload), fields(req_email = %payload.email))]
pub async fn create_employee_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  payload: web::Json<CreateEmployeePayload>,
) -> Result<HttpResponse, AppError> {
  let name = payload.name.trim();
  let email = payload.email.trim();
  if name.is_empty() || email.is_empty() || payload.password.is_empty() {
    return Err(AppError::Validation("Name, email and password are required.".to_string()));
  }
  // Anything outside the employee role set falls back to staff.
  let role = match payload.role.as_deref().and_then(Role::parse) {
    Some(Role::Admin) => Role::Admin,
    _ => Role::Staff,
  };

  let password_hash = auth_service::hash_password(&payload.password)?;
  let new_user = NewUser {
    name: name.to_string(),
    email: email.to_string(),
    password_hash,
    role,
    phone: None,
    address: None,
    security_question: None,
    security_answer: None,
  };
  let user = app_state.store.create_user(&new_user).await?;

  info!(user_id = %user.id, role = %user.role, "Employee account created.");
  app_state.sessions.set_flash(admin.0.token, "Employee added.");
  Ok(see_other("/admin/employees"))
}

#[instrument(name = "handler::admin_delete_employee", skip(app_state, admin, path), fields(user_id = %path.as_ref()))]
pub async fn delete_employee_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  if user_id == admin.0.user_id {
    return Err(AppError::Validation("You cannot delete your own account.".to_string()));
  }
  let target = app_state
    .store
    .user_by_id(user_id)
    .await?
    .ok_or_else(|| AppError::NotFound("Employee not found.".to_string()))?;
  if target.role == Role::Customer {
    return Err(AppError::Validation("Only staff accounts can be deleted here.".to_string()));
  }

  app_state.store.delete_user(user_id).await?;

  info!("Employee account removed.");
  app_state.sessions.set_flash(admin.0.token, "Employee removed.");
  Ok(see_other("/admin/employees"))
}

// --- Products ---

#[instrument(name = "handler::admin_products", skip(app_state, admin, query))]
pub async fn products_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  query: web::Query<AdminProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let filter = crate::models::ProductFilter {
    category: trimmed_or_none(query.category.as_ref()),
    q: trimmed_or_none(query.q.as_ref()),
  };
  let products = app_state.store.list_products(&filter).await?;
  let flash = app_state.sessions.take_flash(admin.0.token);

  Ok(HttpResponse::Ok().json(json!({ "products": products, "flash": flash })))
}

#[instrument(name = "handler::admin_create_product", skip(app_state, admin, payload), fields(name = %payload.name))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  admin: AdminSession,
  payload: web::Json<NewProduct>,
) -> Result<HttpResponse, AppError> {
  if payload.name.trim().is_empty() || payload.price_cents <= 0 {
    return Err(AppError::Validation(
      "Product name and a price greater than zero are required.".to_string(),
    ));
  }
  let new_product = NewProduct {
    name: payload.name.trim().to_string(),
    stock: payload.stock.max(0),
    ..payload.into_inner()
  };
  let product = app_state.store.create_product(&new_product).await?;

  info!(product_id = %product.id, "Product created.");
  app_state.sessions.set_flash(admin.0.token, "Product added.");
  Ok(see_other("/admin/products"))
}

/// Product quick-edit; staff share this with admins.
#[instrument(name = "handler::admin_update_product", skip(app_state, staff, path, payload), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  staff: StaffSession,
  path: web::Path<Uuid>,
  payload: web::Json<UpdateProductPayload>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  if payload.name.trim().is_empty() || payload.price_cents <= 0 {
    return Err(AppError::Validation(
      "Product name and a price greater than zero are required.".to_string(),
    ));
  }

  app_state
    .store
    .update_product(product_id, payload.name.trim(), payload.price_cents, payload.stock.max(0))
    .await?;

  app_state.sessions.set_flash(staff.0.token, "Product updated.");
  Ok(see_other("/admin/products"))
}

/// Product removal; staff share this with admins.
#[instrument(name = "handler::admin_delete_product", skip(app_state, staff, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  staff: StaffSession,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  app_state.store.delete_product(product_id).await?;

  info!("Product deleted.");
  app_state.sessions.set_flash(staff.0.token, "Product deleted.");
  Ok(see_other("/admin/products"))
}
