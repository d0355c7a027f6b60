//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use crate::config::PayrollConfig;
use crate::service::PayrollService;

/// Shared application state.
///
/// Wraps the payroll service, whose configuration and repositories are
/// reference-counted, so cloning the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    service: PayrollService,
}

impl AppState {
    /// Creates a new application state around a service.
    pub fn new(service: PayrollService) -> Self {
        Self { service }
    }

    /// Creates a state backed by in-memory repositories.
    pub fn in_memory(config: PayrollConfig) -> Self {
        Self::new(PayrollService::in_memory(config))
    }

    /// Returns the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }
}
