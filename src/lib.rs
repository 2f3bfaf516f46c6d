pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use crate::store::MovieStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MovieStore>,
}
