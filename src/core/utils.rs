//! Utility functions shared across the API handlers.

use crate::core::{AppError, Result};
use std::collections::HashMap;

/// Fetch a required, non-empty query parameter.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use prime_gateway::core::utils::require_param;
///
/// let mut params = HashMap::new();
/// params.insert("query".to_string(), "rust".to_string());
/// assert_eq!(require_param(&params, "query").unwrap(), "rust");
///
/// params.insert("prompt".to_string(), String::new());
/// assert!(require_param(&params, "prompt").is_err());
/// assert!(require_param(&params, "domain").is_err());
/// ```
pub fn require_param<'a>(
    params: &'a HashMap<String, String>,
    name: &'static str,
) -> Result<&'a str> {
    params
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingParameter(name))
}
