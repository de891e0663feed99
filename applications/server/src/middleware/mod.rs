/// Request middleware
pub mod negotiation;

pub use negotiation::require_json_accept;
