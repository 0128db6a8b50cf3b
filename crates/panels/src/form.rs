//! Typed arguments parsed from raw form fields.

use stxdesk_common::ClarityValue;

/// Parses a decimal field into a `uint` argument.
pub fn uint_arg(raw: &str) -> Result<ClarityValue, String> {
    ClarityValue::parse_uint(raw).map_err(|err| err.to_string())
}

/// Parses an address field into a principal argument.
pub fn principal_arg(raw: &str) -> Result<ClarityValue, String> {
    if raw.trim().is_empty() {
        return Err("address is required".to_string());
    }
    ClarityValue::parse_principal(raw).map_err(|err| err.to_string())
}
