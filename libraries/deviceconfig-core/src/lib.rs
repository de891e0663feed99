//! Device Config Core
//!
//! Storage-agnostic domain types, traits, and error handling for the device
//! registry.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Device`, `DeviceUpdate`, `DeviceType`, `Resolution`
//! - **Storage Traits**: `DeviceStore` and its scoped `DeviceTransaction`
//! - **Service**: `DeviceService`, the business rules around every store call
//! - **Error Handling**: Unified `DeviceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use deviceconfig_core::types::{Device, DeviceType, DeviceUpdate, DisplayUpdate, Resolution};
//!
//! let mut display = Device::display("samsung-screen-88276", "main screen", Resolution::Hd);
//! assert_eq!(display.device_type(), DeviceType::Display);
//!
//! let update = DeviceUpdate::Display(DisplayUpdate {
//!     resolution: Some(Resolution::Uhd),
//!     ..DisplayUpdate::default()
//! });
//! display.merge(&update).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod service;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{DeviceError, Result};
pub use service::DeviceService;
pub use storage::{DeviceStore, DeviceTransaction};

pub use types::{
    Computer, ComputerUpdate, Device, DeviceId, DeviceType, DeviceUpdate, Display, DisplayUpdate,
    Resolution,
};
