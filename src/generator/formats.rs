//! String format inference
//!
//! Recognizes the draft-07 `format` values a plain string most plausibly
//! carries. Checked in order: date-time, date, time, uuid, email, ipv4, ipv6,
//! uri.

use chrono::{DateTime, NaiveDate, NaiveTime};
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Pattern-based format detection
pub struct FormatInferrer {
    time_offset: Regex,
    uuid: Regex,
    email: Regex,
    uri: Regex,
}

impl Default for FormatInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatInferrer {
    pub fn new() -> Self {
        Self {
            time_offset: Regex::new(r"^(\d{2}:\d{2}:\d{2}(?:\.\d+)?)(?:[zZ]|[+-]\d{2}:\d{2})$").unwrap(),
            uuid: Regex::new(
                r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
            )
            .unwrap(),
            email: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").unwrap(),
            uri: Regex::new(r"^(?:[a-zA-Z][a-zA-Z0-9+.-]*://\S+|(?:urn|mailto):\S+)$").unwrap(),
        }
    }

    /// The draft-07 format name for `s`, if any
    pub fn infer(&self, s: &str) -> Option<&'static str> {
        if DateTime::parse_from_rfc3339(s).is_ok() {
            return Some("date-time");
        }
        if s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() {
            return Some("date");
        }
        if self.is_time(s) {
            return Some("time");
        }
        if self.uuid.is_match(s) {
            return Some("uuid");
        }
        if self.email.is_match(s) {
            return Some("email");
        }
        if s.parse::<Ipv4Addr>().is_ok() {
            return Some("ipv4");
        }
        if s.parse::<Ipv6Addr>().is_ok() {
            return Some("ipv6");
        }
        if self.uri.is_match(s) {
            return Some("uri");
        }
        None
    }

    fn is_time(&self, s: &str) -> bool {
        let Some(captures) = self.time_offset.captures(s) else {
            return false;
        };
        captures
            .get(1)
            .map_or(false, |local| NaiveTime::parse_from_str(local.as_str(), "%H:%M:%S%.f").is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_formats() {
        let inferrer = FormatInferrer::new();
        let cases = [
            ("2024-03-01T12:30:00Z", Some("date-time")),
            ("2024-03-01T12:30:00.5+02:00", Some("date-time")),
            ("2024-03-01", Some("date")),
            ("2024-13-01", None),
            ("12:30:00Z", Some("time")),
            ("25:30:00Z", None),
            ("123e4567-e89b-12d3-a456-426614174000", Some("uuid")),
            ("someone@example.com", Some("email")),
            ("192.168.0.1", Some("ipv4")),
            ("::1", Some("ipv6")),
            ("https://example.com/a?b=c", Some("uri")),
            ("urn:isbn:0451450523", Some("uri")),
            ("hello world", None),
            ("key:value", None),
            ("", None),
        ];
        for (input, expected) in cases {
            assert_eq!(inferrer.infer(input), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_every_pattern_is_active() {
        let inferrer = FormatInferrer::default();
        assert!(inferrer.time_offset.is_match("08:15:00+01:00"));
        assert!(inferrer.uuid.is_match("00000000-0000-0000-0000-000000000000"));
        assert!(inferrer.email.is_match("a@b.io"));
        assert!(inferrer.uri.is_match("mailto:a@b.io"));
    }
}
