// src/web/handlers/mod.rs

// Declare handler modules, one per page surface
pub mod account_handlers;
pub mod admin_handlers;
pub mod auth_handlers;
pub mod cart_handlers;
pub mod checkout_handlers;
pub mod product_handlers;
pub mod staff_handlers;

use actix_web::http::header;
use actix_web::HttpResponse;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthSession;

/// `303 See Other` back to the originating page; mutating storefront
/// flows answer with this plus a flash message on the session.
pub(crate) fn see_other(location: &str) -> HttpResponse {
  HttpResponse::SeeOther().insert_header((header::LOCATION, location)).finish()
}

/// Cart badge count for page payloads: 0 for anonymous visitors, the
/// summed cart quantity otherwise.
pub(crate) async fn cart_count_for(state: &AppState, session: Option<&AuthSession>) -> Result<i64, AppError> {
  match session {
    Some(session) => Ok(state.store.count_cart_items(session.user_id).await?),
    None => Ok(0),
  }
}
