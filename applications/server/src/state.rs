/// Shared application state
use deviceconfig_core::DeviceService;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub devices: Arc<DeviceService>,
}

impl AppState {
    pub fn new(devices: Arc<DeviceService>) -> Self {
        Self { devices }
    }
}
