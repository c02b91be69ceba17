//! # Cart Actions
//!
//! User interactions, decoded from the controls rendered on each card.
//! Each control carries `data-action` and `data-id`; one listener on the
//! render target maps them back to a `CartAction`.

use crate::product::ProductId;
use serde::Serialize;
use std::fmt;

/// The four controls rendered on every cart card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Increase,
    Decrease,
    Delete,
    Favorite,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Increase,
        Control::Decrease,
        Control::Delete,
        Control::Favorite,
    ];

    /// Value of the `data-action` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Increase => "increase",
            Control::Decrease => "decrease",
            Control::Delete => "delete",
            Control::Favorite => "favorite",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Font Awesome classes for the icon
    pub fn icon_class(&self) -> &'static str {
        match self {
            Control::Increase => "fas fa-plus-circle",
            Control::Decrease => "fas fa-minus-circle",
            Control::Delete => "fas fa-trash-alt",
            Control::Favorite => "fas fa-heart",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cart mutation (or view-only toggle) keyed by product id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "product_id", rename_all = "snake_case")]
pub enum CartAction {
    /// Catalog "add to cart"
    Add(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    /// Visual only; never touches cart state
    ToggleFavorite(ProductId),
}

impl CartAction {
    pub fn for_control(control: Control, id: ProductId) -> Self {
        match control {
            Control::Increase => CartAction::Increase(id),
            Control::Decrease => CartAction::Decrease(id),
            Control::Delete => CartAction::Remove(id),
            Control::Favorite => CartAction::ToggleFavorite(id),
        }
    }

    /// Decode the `data-action` / `data-id` attribute pair of a clicked control.
    /// Unknown actions and unparseable ids yield `None`.
    pub fn from_control(action: &str, id: &str) -> Option<Self> {
        let control = Control::parse(action)?;
        let id = ProductId::parse_attr(id)?;
        Some(Self::for_control(control, id))
    }

    pub fn product_id(&self) -> ProductId {
        match *self {
            CartAction::Add(id)
            | CartAction::Increase(id)
            | CartAction::Decrease(id)
            | CartAction::Remove(id)
            | CartAction::ToggleFavorite(id) => id,
        }
    }
}
