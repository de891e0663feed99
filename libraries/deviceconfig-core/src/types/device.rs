/// Device domain types
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DeviceId, DeviceUpdate};
use crate::error::{DeviceError, Result};

/// Device variant, the discriminant of [`Device`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Computer,
    Display,
}

impl DeviceType {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Computer => "computer",
            Self::Display => "display",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "computer" => Some(Self::Computer),
            "display" => Some(Self::Display),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "HD")]
    Hd,
    #[serde(rename = "WQHD", alias = "QHD")]
    Wqhd,
    #[serde(rename = "UHD")]
    Uhd,
}

impl Resolution {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hd => "HD",
            Self::Wqhd => "WQHD",
            Self::Uhd => "UHD",
        }
    }

    /// Parse from string, accepting `QHD` as another name for `WQHD`
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "HD" => Some(Self::Hd),
            "WQHD" | "QHD" => Some(Self::Wqhd),
            "UHD" => Some(Self::Uhd),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A computer with login credentials and a network address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computer {
    pub id: DeviceId,
    pub name: String,
    pub username: String,
    pub password: String,
    pub ip_address: String,
}

/// A display attached to the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub id: DeviceId,
    pub name: String,
    pub resolution: Resolution,
}

/// A registered device
///
/// The variant is fixed at creation; replace and merge must match it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Device {
    Computer(Computer),
    Display(Display),
}

impl Device {
    /// Build a computer device
    pub fn computer(
        id: impl Into<DeviceId>,
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        ip_address: impl Into<String>,
    ) -> Self {
        Self::Computer(Computer {
            id: id.into(),
            name: name.into(),
            username: username.into(),
            password: password.into(),
            ip_address: ip_address.into(),
        })
    }

    /// Build a display device
    pub fn display(id: impl Into<DeviceId>, name: impl Into<String>, resolution: Resolution) -> Self {
        Self::Display(Display {
            id: id.into(),
            name: name.into(),
            resolution,
        })
    }

    pub fn id(&self) -> &DeviceId {
        match self {
            Self::Computer(computer) => &computer.id,
            Self::Display(display) => &display.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Computer(computer) => &computer.name,
            Self::Display(display) => &display.name,
        }
    }

    pub fn device_type(&self) -> DeviceType {
        match self {
            Self::Computer(_) => DeviceType::Computer,
            Self::Display(_) => DeviceType::Display,
        }
    }

    /// Apply every present field of `update` onto this device
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::TypeConflict` if the update targets another
    /// variant. The device is left untouched in that case.
    pub fn merge(&mut self, update: &DeviceUpdate) -> Result<()> {
        match (self, update) {
            (Self::Computer(computer), DeviceUpdate::Computer(update)) => {
                if let Some(name) = &update.name {
                    computer.name.clone_from(name);
                }
                if let Some(username) = &update.username {
                    computer.username.clone_from(username);
                }
                if let Some(password) = &update.password {
                    computer.password.clone_from(password);
                }
                if let Some(ip_address) = &update.ip_address {
                    computer.ip_address.clone_from(ip_address);
                }
                Ok(())
            }
            (Self::Display(display), DeviceUpdate::Display(update)) => {
                if let Some(name) = &update.name {
                    display.name.clone_from(name);
                }
                if let Some(resolution) = update.resolution {
                    display.resolution = resolution;
                }
                Ok(())
            }
            (device, update) => Err(DeviceError::type_conflict(
                device.id().clone(),
                device.device_type(),
                update.device_type(),
            )),
        }
    }
}
