//! # Terminal Configuration
//!
//! Settings for the terminal host, read from environment variables
//! (a `.env` file is loaded first when present).

use anyhow::Context;
use cart_core::ProductCatalog;
use std::path::{Path, PathBuf};

/// Places searched for the catalog when `CART_CATALOG_PATH` is unset
const CATALOG_SEARCH_PATHS: [&str; 3] = [
    "config/products.toml",
    "../config/products.toml",
    "../../config/products.toml",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermConfig {
    /// Explicit catalog file (`CART_CATALOG_PATH`)
    pub catalog_path: Option<PathBuf>,
    /// Highlight favorites with ANSI color (`CART_COLOR`)
    pub color: bool,
}

impl TermConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            catalog_path: lookup("CART_CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            color: lookup("CART_COLOR")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Load the product catalog.
    ///
    /// An explicit path must exist and parse. Otherwise the search paths are
    /// tried in order, falling back to the embedded catalog.
    pub fn load_catalog(&self) -> anyhow::Result<ProductCatalog> {
        if let Some(path) = &self.catalog_path {
            return read_catalog(path);
        }

        for path in CATALOG_SEARCH_PATHS {
            let path = Path::new(path);
            if path.is_file() {
                return read_catalog(path);
            }
        }

        tracing::warn!("No catalog file found, using built-in catalog");
        Ok(ProductCatalog::builtin()?)
    }
}

fn read_catalog(path: &Path) -> anyhow::Result<ProductCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let catalog = ProductCatalog::from_toml(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded {} products from {}", catalog.len(), path.display());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_core::ProductId;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TermConfig::from_lookup(lookup(&[]));
        assert_eq!(config, TermConfig::default());
    }

    #[test]
    fn test_values() {
        let config = TermConfig::from_lookup(lookup(&[
            ("CART_CATALOG_PATH", "/tmp/catalog.toml"),
            ("CART_COLOR", "TRUE"),
        ]));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.toml")));
        assert!(config.color);

        let config = TermConfig::from_lookup(lookup(&[
            ("CART_CATALOG_PATH", " "),
            ("CART_COLOR", "no"),
        ]));
        assert_eq!(config.catalog_path, None);
        assert!(!config.color);
    }

    #[test]
    fn test_load_explicit_catalog() {
        let path = std::env::temp_dir()
            .join(format!("cart-term-catalog-{}.toml", std::process::id()));
        std::fs::write(&path, "[[products]]\nid = 5\nname = \"Cap\"\nprice = 15.0\n").unwrap();

        let config = TermConfig {
            catalog_path: Some(path.clone()),
            color: false,
        };
        let catalog = config.load_catalog().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(ProductId(5)).unwrap().name, "Cap");
    }

    #[test]
    fn test_missing_explicit_catalog_fails() {
        let config = TermConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/products.toml")),
            color: false,
        };
        assert!(config.load_catalog().is_err());
    }
}
