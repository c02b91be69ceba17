//! # cart-core
//!
//! Core types for the basket-cart shopping cart widget.
//!
//! This crate provides:
//! - `Product`, `Price` and `ProductCatalog` for the catalog
//! - `CartItem` and `Cart` for the in-memory cart
//! - `CartAction` for decoded user interactions
//! - `CartView` trait for display hosts (DOM, terminal)
//! - `CartWidget` to run the mutate → redraw → bind cycle
//! - `CartError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use cart_core::{CartAction, CartWidget, ProductCatalog, ProductId};
//!
//! let catalog = ProductCatalog::builtin()?;
//! let mut widget = CartWidget::new(catalog, my_view);
//!
//! // Initial (empty) draw
//! widget.refresh()?;
//!
//! // A click on a card's "+" control
//! widget.dispatch(CartAction::Increase(ProductId(1)))?;
//! ```

pub mod action;
pub mod cart;
pub mod error;
pub mod product;
pub mod view;
pub mod widget;

// Re-exports for convenience
pub use action::{CartAction, Control};
pub use cart::{Cart, CartItem, CartSnapshot, SnapshotItem};
pub use error::{CartError, CartResult};
pub use product::{Price, Product, ProductCatalog, ProductId, BUILTIN_CATALOG_TOML};
pub use view::{cards, escape_html, CardModel, CartView};
pub use widget::CartWidget;
