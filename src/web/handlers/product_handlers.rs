// src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::cart_count_for;
use crate::errors::AppError;
use crate::models::ProductFilter;
use crate::state::AppState;
use crate::web::extractors::MaybeSession;

/// The home page shows the newest arrivals only.
const HOME_PRODUCT_COUNT: i64 = 6;

#[derive(Deserialize, Debug)]
pub struct ListProductsQuery {
  pub category: Option<String>,
  pub q: Option<String>,
}

#[instrument(name = "handler::home", skip(app_state, session))]
pub async fn home_handler(app_state: web::Data<AppState>, session: MaybeSession) -> Result<HttpResponse, AppError> {
  let products = app_state.store.latest_products(HOME_PRODUCT_COUNT).await?;
  let cart_count = cart_count_for(&app_state, session.0.as_ref()).await?;
  let flash = session.0.as_ref().and_then(|s| app_state.sessions.take_flash(s.token));

  Ok(HttpResponse::Ok().json(json!({
      "products": products,
      "cart_count": cart_count,
      "flash": flash
  })))
}

#[instrument(name = "handler::list_products", skip(app_state, query_params, session))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
  session: MaybeSession,
) -> Result<HttpResponse, AppError> {
  let filter = ProductFilter {
    category: query_params.category.clone().filter(|c| !c.trim().is_empty()),
    q: query_params.q.clone().filter(|q| !q.trim().is_empty()),
  };
  let products = app_state.store.list_products(&filter).await?;
  let cart_count = cart_count_for(&app_state, session.0.as_ref()).await?;

  info!("Fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(json!({
      "products": products,
      "cart_count": cart_count
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  match app_state.store.get_product(product_id).await? {
    Some(product) => Ok(HttpResponse::Ok().json(json!({ "product": product }))),
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)))
    }
  }
}
