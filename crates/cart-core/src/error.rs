//! # Cart Error Types
//!
//! Typed error handling for basket-cart.
//! Cart mutations are total and never fail; only catalog loading and the
//! view hosts (DOM, terminal) return `Result<T, CartError>`.

use thiserror::Error;

/// Core error type for catalog and view operations
#[derive(Debug, Error)]
pub enum CartError {
    /// A required page element is missing (render target, total display)
    #[error("Missing element: {selector}")]
    MissingElement { selector: String },

    /// DOM call failed in the browser host
    #[error("DOM error: {0}")]
    Dom(String),

    /// Negative, non-finite, sub-cent or out-of-range price
    #[error("Invalid price: {message}")]
    InvalidPrice { message: String },

    /// Two catalog entries share the same id
    #[error("Duplicate product in catalog: {product_id}")]
    DuplicateProduct { product_id: u32 },

    /// Catalog TOML could not be parsed
    #[error("Catalog parse error: {0}")]
    Catalog(#[from] toml::de::Error),

    /// Writing rendered output failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CartError {
    /// Returns true if this error means the host was set up wrong and
    /// the widget cannot run at all
    pub fn is_setup_failure(&self) -> bool {
        matches!(
            self,
            CartError::MissingElement { .. }
                | CartError::Catalog(_)
                | CartError::DuplicateProduct { .. }
                | CartError::InvalidPrice { .. }
        )
    }
}

impl From<std::io::Error> for CartError {
    fn from(err: std::io::Error) -> Self {
        CartError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CartError {
    fn from(err: serde_json::Error) -> Self {
        CartError::Serialization(err.to_string())
    }
}

/// Result type alias for catalog and view operations
pub type CartResult<T> = Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_failures() {
        assert!(CartError::MissingElement {
            selector: "#total".into()
        }
        .is_setup_failure());
        assert!(CartError::DuplicateProduct { product_id: 1 }.is_setup_failure());
        assert!(!CartError::Dom("appendChild".into()).is_setup_failure());
        assert!(!CartError::Io("closed".into()).is_setup_failure());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CartError::MissingElement {
                selector: ".list-products".into()
            }
            .to_string(),
            "Missing element: .list-products"
        );
        assert_eq!(
            CartError::DuplicateProduct { product_id: 4 }.to_string(),
            "Duplicate product in catalog: 4"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: CartError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, CartError::Io(_)));
    }
}
