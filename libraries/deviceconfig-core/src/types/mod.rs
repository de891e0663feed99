mod device;
mod ids;
mod update;

pub use device::{Computer, Device, DeviceType, Display, Resolution};
pub use ids::DeviceId;
pub use update::{ComputerUpdate, DeviceUpdate, DisplayUpdate};
