//! Contact address utilities
//!
//! An OTP destination is either a phone number or an email address. These
//! helpers classify the shape of a contact string and mask it for logging.

use once_cell::sync::Lazy;
use regex::Regex;

// E.164 phone number, optionally with separators stripped first
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{6,14}$").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Strip common phone formatting characters (spaces, dashes, parentheses)
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if the contact looks like a phone number
pub fn is_phone_shaped(contact: &str) -> bool {
    PHONE_REGEX.is_match(&normalize_phone(contact))
}

/// Check if the contact looks like an email address
pub fn is_email_shaped(contact: &str) -> bool {
    EMAIL_REGEX.is_match(contact)
}

/// Mask a contact for logging
///
/// Phone numbers keep the last four digits; emails keep the first character
/// of the local part and the full domain.
pub fn mask_contact(contact: &str) -> String {
    if is_email_shaped(contact) {
        let (local, domain) = contact.split_once('@').unwrap_or((contact, ""));
        let head = local.chars().next().unwrap_or('*');
        return format!("{}***@{}", head, domain);
    }

    let normalized = normalize_phone(contact);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
