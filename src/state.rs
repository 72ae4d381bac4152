// src/state.rs

use crate::config::AppConfig;
use crate::services::Sessions;
use crate::store::Store;
use std::sync::Arc;

/// Shared application state handed to every handler via `web::Data`.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn Store>,
  pub sessions: Arc<Sessions>,
  pub config: Arc<AppConfig>, // Share loaded config
}
