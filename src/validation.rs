//! Form Validation
//!
//! Synchronous checks run before any request is sent. Errors are collected per
//! field so a form can show all of them at once.

use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static MAC_RE: OnceLock<Regex> = OnceLock::new();
static PINCODE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(r"^\+?[0-9]{10,13}$").expect("phone pattern"))
}

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$").expect("email pattern"))
}

fn mac_re() -> &'static Regex {
    MAC_RE.get_or_init(|| Regex::new(r"^([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$").expect("mac pattern"))
}

fn pincode_re() -> &'static Regex {
    PINCODE_RE.get_or_init(|| Regex::new(r"^[0-9]{6}$").expect("pincode pattern"))
}

pub fn is_phone(value: &str) -> bool {
    phone_re().is_match(&value.replace([' ', '-'], ""))
}

pub fn is_email(value: &str) -> bool {
    email_re().is_match(value)
}

pub fn is_mac(value: &str) -> bool {
    mac_re().is_match(value)
}

pub fn is_ipv4(value: &str) -> bool {
    Ipv4Addr::from_str(value).is_ok()
}

pub fn is_pincode(value: &str) -> bool {
    pincode_re().is_match(value)
}

/// Field errors in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{}", summary(.errors))]
pub struct ValidationErrors {
    errors: Vec<(&'static str, String)>,
}

fn summary(errors: &[(&'static str, String)]) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("{}: {}", field, msg))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First message for `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// `Ok(value)` if nothing was recorded
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }

    /// Trimmed value, or records "is required"
    pub fn required(&mut self, field: &'static str, value: &str) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.add(field, "is required");
        }
        trimmed.to_string()
    }

    pub fn phone(&mut self, field: &'static str, value: &str) -> String {
        let value = self.required(field, value);
        if !value.is_empty() && !is_phone(&value) {
            self.add(field, "must be 10 to 13 digits");
        }
        value
    }

    /// Blank is fine; anything else must look like an email
    pub fn optional_email(&mut self, field: &'static str, value: &str) -> Option<String> {
        self.optional_matching(field, value, is_email, "is not a valid email")
    }

    pub fn optional_mac(&mut self, field: &'static str, value: &str) -> Option<String> {
        self.optional_matching(field, value, is_mac, "must look like AA:BB:CC:DD:EE:FF")
            .map(|m| m.to_uppercase().replace('-', ":"))
    }

    pub fn optional_ipv4(&mut self, field: &'static str, value: &str) -> Option<String> {
        self.optional_matching(field, value, is_ipv4, "is not a valid IPv4 address")
    }

    pub fn optional_pincode(&mut self, field: &'static str, value: &str) -> Option<String> {
        self.optional_matching(field, value, is_pincode, "must be 6 digits")
    }

    fn optional_matching(
        &mut self,
        field: &'static str,
        value: &str,
        check: fn(&str) -> bool,
        message: &str,
    ) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if !check(value) {
            self.add(field, message);
        }
        Some(value.to_string())
    }

    /// Required number greater than zero
    pub fn positive<T>(&mut self, field: &'static str, value: &str) -> Option<T>
    where
        T: FromStr + PartialOrd + Default,
    {
        let value = value.trim();
        if value.is_empty() {
            self.add(field, "is required");
            return None;
        }
        match value.parse::<T>() {
            Ok(n) if n > T::default() => Some(n),
            _ => {
                self.add(field, "must be a number greater than zero");
                None
            }
        }
    }

    /// Required money amount: finite and greater than zero. `f64` parses
    /// "inf" and "1e999", which JSON cannot carry.
    pub fn amount(&mut self, field: &'static str, value: &str) -> Option<f64> {
        let n = self.positive::<f64>(field, value)?;
        if n.is_finite() {
            Some(n)
        } else {
            self.add(field, "must be a number greater than zero");
            None
        }
    }

    /// Blank = None; otherwise must be a positive number
    pub fn optional_positive<T>(&mut self, field: &'static str, value: &str) -> Option<T>
    where
        T: FromStr + PartialOrd + Default,
    {
        if value.trim().is_empty() {
            None
        } else {
            self.positive(field, value)
        }
    }

    /// Blank = None; otherwise `YYYY-MM-DD`
    pub fn optional_date(&mut self, field: &'static str, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                self.add(field, "must be a date (YYYY-MM-DD)");
                None
            }
        }
    }

    /// Must parse as `T` (select boxes)
    pub fn choice<T: FromStr>(&mut self, field: &'static str, value: &str) -> Option<T> {
        match value.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                self.add(field, "pick one of the options");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern() {
        assert!(is_phone("9845012345"));
        assert!(is_phone("+919845012345"));
        assert!(is_phone("98450 12345"));
        assert!(!is_phone("98450"));
        assert!(!is_phone("98450abcde"));
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_email("ops@fiber.example.in"));
        assert!(!is_email("ops@fiber"));
        assert!(!is_email("ops fiber@example.com"));
    }

    #[test]
    fn test_mac_and_ip() {
        assert!(is_mac("a4:5e:60:e1:22:9b"));
        assert!(is_mac("A4-5E-60-E1-22-9B"));
        assert!(!is_mac("A4:5E:60:E1:22"));
        assert!(is_ipv4("10.20.30.40"));
        assert!(!is_ipv4("10.20.30.400"));
    }

    #[test]
    fn test_errors_collected_in_order() {
        let mut errors = ValidationErrors::new();
        errors.required("name", "  ");
        errors.phone("phone", "123");
        errors.optional_email("email", "");
        let price: Option<f64> = errors.positive("price", "-4");

        assert_eq!(price, None);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), Some("is required"));
        assert_eq!(errors.get("phone"), Some("must be 10 to 13 digits"));
        assert_eq!(errors.get("email"), None);
        assert!(errors.to_string().starts_with("name: is required; phone:"));
    }

    #[test]
    fn test_mac_is_normalized() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.optional_mac("mac", " a4-5e-60-e1-22-9b "), Some("A4:5E:60:E1:22:9B".to_string()));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_amount_must_be_finite() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.amount("price", "499.50"), Some(499.5));
        assert!(errors.is_empty());

        for raw in ["inf", "1e999", "NaN", "-5", ""] {
            let mut errors = ValidationErrors::new();
            assert_eq!(errors.amount("price", raw), None, "{raw}");
            assert_eq!(errors.len(), 1, "{raw}");
        }
    }

    #[test]
    fn test_finish() {
        let errors = ValidationErrors::new();
        assert_eq!(errors.finish(|| 5), Ok(5));

        let mut errors = ValidationErrors::new();
        errors.add("x", "bad");
        assert!(errors.finish(|| 5).is_err());
    }

    #[test]
    fn test_dates() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.optional_date("d", "2026-03-01"), NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(errors.optional_date("d", "01/03/2026"), None);
        assert_eq!(errors.get("d"), Some("must be a date (YYYY-MM-DD)"));
    }
}
