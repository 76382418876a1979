use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every JSON route
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Returns the trimmed value when present and not blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn cents_to_price(cents: i64) -> f64 {
    cents as f64 / 100.0
}

pub fn price_to_cents(price: f64) -> Option<i64> {
    if !price.is_finite() || price < 0.0 {
        return None;
    }
    Some((price * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&Some("  Ana ".to_string())), Some("Ana"));
        assert_eq!(non_blank(&Some("   ".to_string())), None);
        assert_eq!(non_blank(&None), None);
    }

    #[test]
    fn test_price_conversion() {
        assert_eq!(price_to_cents(149.9), Some(14990));
        assert_eq!(price_to_cents(0.0), Some(0));
        assert_eq!(price_to_cents(-1.0), None);
        assert_eq!(price_to_cents(f64::NAN), None);
        assert_eq!(cents_to_price(14990), 149.9);
    }
}
