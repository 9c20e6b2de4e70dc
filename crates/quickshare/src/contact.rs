//! Contact record types and the QR payload codec.
//!
//! This module defines the professional contact record that the application
//! stores and exchanges, along with its validation rules and the JSON payload
//! encoding embedded in QR codes.
//!
//! Field names serialize as camelCase so payloads stay wire-compatible with
//! records produced by the companion mobile app.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Shape check for work emails: `local@domain.tld`, no whitespace.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Check whether a string has a plausible email shape.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// A professional contact record.
///
/// Created and edited on the local device, persisted as one serialized unit,
/// and transmitted by value when encoded into a QR payload. The scanning
/// device reconstructs an independent copy with no link back to the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Full name (required).
    ///
    /// Required fields default to empty on deserialization so that a payload
    /// with a missing key is reported as a missing field by [`validate`],
    /// not as a malformed payload.
    ///
    /// [`validate`]: ContactRecord::validate
    #[serde(default)]
    pub full_name: String,

    /// Job title (required).
    #[serde(default)]
    pub job_title: String,

    /// Organization or company (required).
    #[serde(default)]
    pub organization: String,

    /// Work email (required, must look like `local@domain.tld`).
    #[serde(default)]
    pub work_email: String,

    /// Work phone (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_phone: Option<String>,

    /// Social profile URL (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,

    /// Personal or portfolio website URL (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

impl ContactRecord {
    /// Create a record with only the required fields set.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        job_title: impl Into<String>,
        organization: impl Into<String>,
        work_email: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            job_title: job_title.into(),
            organization: organization.into(),
            work_email: work_email.into(),
            work_phone: None,
            linkedin_url: None,
            website_url: None,
        }
    }

    /// Return a copy with whitespace trimmed and empty optionals dropped.
    ///
    /// Optional fields that are empty or whitespace-only become `None` so
    /// that an absent field round-trips as absent, never as an empty string.
    #[must_use]
    pub fn normalized(&self) -> Self {
        fn trim_opt(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        }

        Self {
            full_name: self.full_name.trim().to_string(),
            job_title: self.job_title.trim().to_string(),
            organization: self.organization.trim().to_string(),
            work_email: self.work_email.trim().to_string(),
            work_phone: trim_opt(&self.work_phone),
            linkedin_url: trim_opt(&self.linkedin_url),
            website_url: trim_opt(&self.website_url),
        }
    }

    /// Validate the record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if any required field is empty, or
    /// [`Error::InvalidField`] if the work email does not have an email shape.
    pub fn validate(&self) -> Result<()> {
        if self.full_name.trim().is_empty() {
            return Err(Error::missing_field("fullName"));
        }
        if self.job_title.trim().is_empty() {
            return Err(Error::missing_field("jobTitle"));
        }
        if self.organization.trim().is_empty() {
            return Err(Error::missing_field("organization"));
        }
        if self.work_email.trim().is_empty() {
            return Err(Error::missing_field("workEmail"));
        }
        if !is_valid_email(self.work_email.trim()) {
            return Err(Error::invalid_field(
                "workEmail",
                "not a valid email address",
            ));
        }
        Ok(())
    }

    /// Encode the record into the JSON payload string embedded in a QR code.
    ///
    /// The record is normalized and validated first, so the payload never
    /// contains empty optional fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the record is incomplete, or a JSON
    /// error if serialization fails.
    pub fn encode_payload(&self) -> Result<String> {
        let normalized = self.normalized();
        normalized.validate()?;
        Ok(serde_json::to_string(&normalized)?)
    }

    /// Decode a scanned payload string into a contact record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadMalformed`] if the string is not well-formed
    /// JSON, or a validation error if any required field is missing or
    /// invalid. All of these are recoverable: the scan flow offers a retry.
    pub fn decode_payload(payload: &str) -> Result<Self> {
        let record: Self =
            serde_json::from_str(payload).map_err(|e| Error::payload_malformed(e.to_string()))?;
        let record = record.normalized();
        record.validate()?;
        Ok(record)
    }
}
