//! Acceptance rules for links, email addresses and manual entries.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ValidationError, ValidationResult};
use crate::types::OrganizationRecord;

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A link is submission-eligible iff, trimmed, it starts with `http://` or `https://`.
pub fn is_valid_link(link: &str) -> bool {
    let link = link.trim();
    link.starts_with("http://") || link.starts_with("https://")
}

/// `local@domain.tld` shape check. No deliverability check.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && RE_EMAIL.is_match(email)
}

/// Validate a manually entered organization and build its record.
///
/// Both fields are trimmed. Protocol checks happen at submission time, the
/// same as for imported links.
pub fn validate_entry(name: &str, link: &str) -> ValidationResult<OrganizationRecord> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let link = link.trim();
    if link.is_empty() {
        return Err(ValidationError::EmptyLink);
    }
    Ok(OrganizationRecord::single(name, link))
}
