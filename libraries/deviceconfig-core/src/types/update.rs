/// Partial update types, mirroring [`Device`](super::Device)
use super::DeviceType;

/// Fields of a computer to overwrite; `None` leaves the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputerUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ip_address: Option<String>,
}

/// Fields of a display to overwrite; `None` leaves the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayUpdate {
    pub name: Option<String>,
    pub resolution: Option<super::Resolution>,
}

/// A partial update of one device variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceUpdate {
    Computer(ComputerUpdate),
    Display(DisplayUpdate),
}

impl DeviceUpdate {
    /// Variant this update applies to
    pub fn device_type(&self) -> DeviceType {
        match self {
            Self::Computer(_) => DeviceType::Computer,
            Self::Display(_) => DeviceType::Display,
        }
    }
}

impl From<ComputerUpdate> for DeviceUpdate {
    fn from(update: ComputerUpdate) -> Self {
        Self::Computer(update)
    }
}

impl From<DisplayUpdate> for DeviceUpdate {
    fn from(update: DisplayUpdate) -> Self {
        Self::Display(update)
    }
}
