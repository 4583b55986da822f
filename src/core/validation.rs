//! Field validation - Pure checks for the optional contact fields and the full edit form.
//!
//! Every validator treats an empty (or whitespace-only) value as valid because all
//! contact fields are optional. The aggregate validator reports every failing field
//! rather than stopping at the first one.

use crate::{
    entities::RestaurantDetails,
    errors::{Error, Result},
};
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

const TAX_ID_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const TAX_ID_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Reason reported when the name is missing.
pub const NAME_REQUIRED: &str = "Name is required";
/// Reason reported when the category is missing.
pub const CATEGORY_REQUIRED: &str = "Category is required";
/// Reason reported for a malformed phone number.
pub const INVALID_PHONE: &str = "Invalid phone. Use format: (11) 99999-9999";
/// Reason reported for a malformed email.
pub const INVALID_EMAIL: &str = "Invalid email";
/// Reason reported for a tax id with bad length or check digits.
pub const INVALID_TAX_ID: &str = "Invalid tax ID (CNPJ)";

/// Outcome of validating a full set of restaurant details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Reasons for every failing field, in field order
    pub reasons: Vec<String>,
}

impl ValidationReport {
    /// True when no field failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Converts the report into `Ok(())` or `Error::Validation`.
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::Validation {
                reasons: self.reasons,
            })
        }
    }
}

/// Checks an email against the `local@domain.tld` shape.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    let email = email.trim();
    email.is_empty() || EMAIL_PATTERN.is_match(email)
}

/// Accepts phone numbers with 10 or 11 digits once punctuation is stripped.
#[must_use]
pub fn validate_phone(phone: &str) -> bool {
    if phone.trim().is_empty() {
        return true;
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (10..=11).contains(&digits)
}

/// Validates a 14-digit business registration number (CNPJ) including both check digits.
///
/// Punctuation such as `11.222.333/0001-81` is ignored. Strings made of a single
/// repeated digit are rejected even though their check digits happen to work out.
#[must_use]
pub fn validate_tax_id(tax_id: &str) -> bool {
    if tax_id.trim().is_empty() {
        return true;
    }

    let digits: Vec<u32> = tax_id.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 14 {
        return false;
    }
    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    let first = check_digit(&digits[..12], &TAX_ID_FIRST_WEIGHTS);
    if first != digits[12] {
        return false;
    }

    let second = check_digit(&digits[..13], &TAX_ID_SECOND_WEIGHTS);
    second == digits[13]
}

// Weighted mod-11 check digit.
fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

/// Validates every field of a restaurant edit form.
///
/// Name and category are required; phone, email and tax id are optional but must be
/// well-formed when present. The address is free text and never fails.
#[must_use]
pub fn validate_restaurant(details: &RestaurantDetails) -> ValidationReport {
    let mut reasons = Vec::new();

    if details.name.trim().is_empty() {
        reasons.push(NAME_REQUIRED.to_string());
    }
    if details.category.trim().is_empty() {
        reasons.push(CATEGORY_REQUIRED.to_string());
    }
    if !details.phone.as_deref().is_none_or(validate_phone) {
        reasons.push(INVALID_PHONE.to_string());
    }
    if !details.email.as_deref().is_none_or(validate_email) {
        reasons.push(INVALID_EMAIL.to_string());
    }
    if !details.tax_id.as_deref().is_none_or(validate_tax_id) {
        reasons.push(INVALID_TAX_ID.to_string());
    }

    ValidationReport { reasons }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email(""));
        assert!(validate_email("contato@sabor.com.br"));
        assert!(validate_email("first.last+tag@example.io"));
        assert!(!validate_email("no-at-sign.com"));
        assert!(!validate_email("user@domain"));
        assert!(!validate_email("user@domain.c"));
        assert!(!validate_email("user name@domain.com"));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone(""));
        assert!(validate_phone("(11) 99999-9999"));
        assert!(validate_phone("1133334444"));
        assert!(!validate_phone("99999-9999"));
        assert!(!validate_phone("+55 (11) 99999-9999"));
    }

    #[test]
    fn test_validate_tax_id_accepts_valid_numbers() {
        assert!(validate_tax_id(""));
        assert!(validate_tax_id("11.222.333/0001-81"));
        assert!(validate_tax_id("11222333000181"));
    }

    #[test]
    fn test_validate_tax_id_rejects_bad_shapes() {
        assert!(!validate_tax_id("11.222.333/0001"));
        assert!(!validate_tax_id("11111111111111"));
        assert!(!validate_tax_id("00000000000000"));
    }

    #[test]
    fn test_validate_tax_id_rejects_every_single_digit_mutation() {
        let valid: Vec<u32> = "11222333000181"
            .chars()
            .filter_map(|c| c.to_digit(10))
            .collect();

        for position in 0..valid.len() {
            for replacement in 0..10 {
                if replacement == valid[position] {
                    continue;
                }
                let mutated: String = valid
                    .iter()
                    .enumerate()
                    .map(|(i, d)| if i == position { replacement } else { *d })
                    .map(|d| char::from_digit(d, 10).unwrap_or('0'))
                    .collect();
                assert!(
                    !validate_tax_id(&mutated),
                    "mutation {mutated} should be invalid"
                );
            }
        }
    }

    #[test]
    fn test_validate_restaurant_collects_every_reason() {
        let details = RestaurantDetails {
            name: "  ".to_string(),
            category: String::new(),
            phone: Some("123".to_string()),
            email: Some("bad".to_string()),
            address: Some("anything goes".to_string()),
            tax_id: Some("11.222.333/0001-82".to_string()),
        };

        let report = validate_restaurant(&details);
        assert!(!report.is_valid());
        assert_eq!(
            report.reasons,
            vec![
                NAME_REQUIRED,
                CATEGORY_REQUIRED,
                INVALID_PHONE,
                INVALID_EMAIL,
                INVALID_TAX_ID
            ]
        );
    }

    #[test]
    fn test_validate_restaurant_passes_with_optional_fields_absent() {
        let report = validate_restaurant(&RestaurantDetails::new("Cantina", "Italian"));
        assert!(report.is_valid());
        assert!(report.into_result().is_ok());
    }
}
