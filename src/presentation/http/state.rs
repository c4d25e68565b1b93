// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub admin_token: Arc<str>,
}

impl HttpState {
    pub fn new(services: Arc<ApplicationServices>, admin_token: &str) -> Self {
        Self {
            services,
            admin_token: Arc::from(admin_token),
        }
    }
}
