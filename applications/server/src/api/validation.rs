/// Field validation for device documents
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Result, ServerError};

fn ipv4_regex() -> &'static Regex {
    static IPV4: OnceLock<Regex> = OnceLock::new();
    IPV4.get_or_init(|| {
        Regex::new(
            r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
        )
        .expect("Invalid regex pattern")
    })
}

/// Collects field violations so that all of them are reported together
#[derive(Debug, Default)]
pub struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    fn invalid(&mut self, field: &str, message: &str) {
        self.messages
            .push(format!("Invalid value. field: {field}, message: {message}"));
    }

    fn length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min || len > max {
            self.invalid(
                field,
                &format!("length must be between {min} and {max}"),
            );
        }
    }

    pub fn username(&mut self, value: &str) {
        self.length("username", value, 4, 12);
    }

    pub fn password(&mut self, value: &str) {
        self.length("password", value, 8, 32);
    }

    pub fn ip_address(&mut self, value: &str) {
        if !ipv4_regex().is_match(value) {
            self.invalid("ipAddress", "IPv4 address has invalid format");
        }
    }

    /// Record an explicit `null` in a merge-patch document
    pub fn null(&mut self, field: &str) {
        self.invalid(field, "must not be null");
    }

    /// `Ok` if nothing was recorded, otherwise a bad request with every message
    pub fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ServerError::BadRequest(self.messages))
        }
    }
}
