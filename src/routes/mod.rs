// Route exports
pub mod errors;
pub mod health;
pub mod users;

use actix_web::web;
use std::sync::Arc;

use crate::core::MemberLister;
use crate::services::MemberStore;

/// Application state shared across all handlers
pub struct AppState<S> {
    pub store: Arc<S>,
    pub lister: MemberLister,
}

impl<S> AppState<S> {
    pub fn new(store: Arc<S>, lister: MemberLister) -> Self {
        Self { store, lister }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            lister: self.lister.clone(),
        }
    }
}

pub fn configure_routes<S: MemberStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::configure::<S>)
            .configure(users::configure::<S>),
    );
}
