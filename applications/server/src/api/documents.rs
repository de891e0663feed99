//! JSON documents exchanged on `/devices`
//!
//! Create and replace bodies carry a `"type"` discriminator. Merge-patch
//! bodies do not; their document type follows the stored variant.

use deviceconfig_core::types::{
    Computer, ComputerUpdate, Device, DeviceType, DeviceUpdate, Display, DisplayUpdate, Resolution,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::openapi::{ObjectBuilder, RefOr, Schema, SchemaType};
use utoipa::ToSchema;

use super::validation::Violations;
use crate::error::{Result, ServerError};

// ============================================================================
// Full documents
// ============================================================================

/// A complete device, as sent on POST/PUT and returned on GET
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeviceDocument {
    Computer(ComputerDocument),
    Display(DisplayDocument),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComputerDocument {
    #[schema(example = "macpro-m1-95014")]
    pub id: String,
    pub name: String,
    #[schema(min_length = 4, max_length = 12)]
    pub username: String,
    #[schema(min_length = 8, max_length = 32)]
    pub password: String,
    #[schema(example = "192.168.178.1")]
    pub ip_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DisplayDocument {
    #[schema(example = "samsung-screen-88276")]
    pub id: String,
    pub name: String,
    #[schema(schema_with = resolution_schema)]
    pub resolution: Resolution,
}

/// `Resolution` lives in the core crate, so its schema is spelled out here
fn resolution_schema() -> RefOr<Schema> {
    let spellings = [Resolution::Hd, Resolution::Wqhd, Resolution::Uhd].map(|r| r.as_str());
    RefOr::T(Schema::Object(
        ObjectBuilder::new()
            .schema_type(SchemaType::String)
            .enum_values(Some(spellings))
            .build(),
    ))
}

impl DeviceDocument {
    /// Parse a create or replace body
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| {
            ServerError::bad_request(format!("Error processing request document. {e}"))
        })
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Computer(computer) => &computer.id,
            Self::Display(display) => &display.id,
        }
    }

    /// Validate the fields and convert into the domain model
    pub fn into_device(self) -> Result<Device> {
        let mut violations = Violations::new();
        if let Self::Computer(computer) = &self {
            violations.username(&computer.username);
            violations.password(&computer.password);
            violations.ip_address(&computer.ip_address);
        }
        violations.into_result()?;

        Ok(match self {
            Self::Computer(computer) => Device::Computer(Computer {
                id: computer.id.into(),
                name: computer.name,
                username: computer.username,
                password: computer.password,
                ip_address: computer.ip_address,
            }),
            Self::Display(display) => Device::Display(Display {
                id: display.id.into(),
                name: display.name,
                resolution: display.resolution,
            }),
        })
    }
}

impl From<Device> for DeviceDocument {
    fn from(device: Device) -> Self {
        match device {
            Device::Computer(computer) => Self::Computer(ComputerDocument {
                id: computer.id.to_string(),
                name: computer.name,
                username: computer.username,
                password: computer.password,
                ip_address: computer.ip_address,
            }),
            Device::Display(display) => Self::Display(DisplayDocument {
                id: display.id.to_string(),
                name: display.name,
                resolution: display.resolution,
            }),
        }
    }
}

// ============================================================================
// Merge-patch documents
// ============================================================================

/// Presence of a field in a merge-patch document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field omitted, keep the stored value
    Absent,
    /// Field given as `null`
    Null,
    Present(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

// Only called for fields that appear in the document; omitted ones fall
// back to `Default`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Present(value),
            None => Self::Null,
        })
    }
}

impl<T> Patch<T> {
    /// Record `null` as a violation and yield the present value
    fn take(self, field: &str, violations: &mut Violations) -> Option<T> {
        match self {
            Self::Absent => None,
            Self::Null => {
                violations.null(field);
                None
            }
            Self::Present(value) => Some(value),
        }
    }
}

/// Omitted fields are kept; `null` is rejected
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComputerUpdateDocument {
    #[serde(default)]
    #[schema(value_type = String)]
    pub name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = String, min_length = 4, max_length = 12)]
    pub username: Patch<String>,
    #[serde(default)]
    #[schema(value_type = String, min_length = 8, max_length = 32)]
    pub password: Patch<String>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub ip_address: Patch<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DisplayUpdateDocument {
    #[serde(default)]
    #[schema(value_type = String)]
    pub name: Patch<String>,
    #[serde(default)]
    #[schema(schema_with = resolution_schema)]
    pub resolution: Patch<Resolution>,
}

/// A merge-patch body for either variant
///
/// Request parsing picks the variant from the stored device through
/// [`update_from_json`]; this type only names both shapes in the API docs.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum MergePatchDocument {
    Computer(ComputerUpdateDocument),
    Display(DisplayUpdateDocument),
}

impl ComputerUpdateDocument {
    pub fn into_update(self) -> Result<ComputerUpdate> {
        let mut violations = Violations::new();

        let name = self.name.take("name", &mut violations);

        let username = self.username.take("username", &mut violations);
        if let Some(username) = &username {
            violations.username(username);
        }

        let password = self.password.take("password", &mut violations);
        if let Some(password) = &password {
            violations.password(password);
        }

        let ip_address = self.ip_address.take("ipAddress", &mut violations);
        if let Some(ip_address) = &ip_address {
            violations.ip_address(ip_address);
        }

        violations.into_result()?;
        Ok(ComputerUpdate {
            name,
            username,
            password,
            ip_address,
        })
    }
}

impl DisplayUpdateDocument {
    pub fn into_update(self) -> Result<DisplayUpdate> {
        let mut violations = Violations::new();
        let name = self.name.take("name", &mut violations);
        let resolution = self.resolution.take("resolution", &mut violations);
        violations.into_result()?;

        Ok(DisplayUpdate { name, resolution })
    }
}

/// Parse a merge-patch body for a device of the given variant
pub fn update_from_json(device_type: DeviceType, body: &[u8]) -> Result<DeviceUpdate> {
    fn parse<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T> {
        serde_json::from_slice(body).map_err(|e| {
            ServerError::bad_request(format!("Error processing update request document. {e}"))
        })
    }

    Ok(match device_type {
        DeviceType::Computer => parse::<ComputerUpdateDocument>(body)?.into_update()?.into(),
        DeviceType::Display => parse::<DisplayUpdateDocument>(body)?.into_update()?.into(),
    })
}
