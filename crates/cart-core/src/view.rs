//! # Cart View
//!
//! The render seam between cart state and a display host.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            CartView (trait)              │
//! │  ├── render()          full redraw       │
//! │  ├── show_total()      total display     │
//! │  ├── bind_controls()   after render      │
//! │  └── toggle_favorite() view-local state  │
//! └──────────────────────────────────────────┘
//!              ▲                  ▲
//!      ┌───────┴──────┐   ┌───────┴──────┐
//!      │   DomView    │   │   TextView   │
//!      │ (cart-wasm)  │   │ (cart-term)  │
//!      └──────────────┘   └──────────────┘
//! ```
//!
//! Hosts never read `Cart` directly: each redraw receives a fresh list of
//! `CardModel`s built from the current items.

use crate::action::Control;
use crate::cart::{Cart, CartItem};
use crate::error::CartResult;
use crate::product::{Price, ProductId};
use serde::Serialize;

/// Everything one card shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardModel {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl CardModel {
    pub fn from_item(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id(),
            name: item.product.name.clone(),
            description: item.product.description(),
            image_url: item.product.image_url(),
            unit_price: item.product.price,
            quantity: item.quantity,
        }
    }

    /// Markup for one card. Every control is tagged with `data-action`
    /// and `data-id` so a single delegated listener can decode clicks.
    pub fn to_html(&self) -> String {
        let id = self.product_id;
        let control = |c: Control| {
            format!(
                r#"<i class="{}" data-action="{}" data-id="{}"></i>"#,
                c.icon_class(),
                c.as_str(),
                id
            )
        };
        format!(
            r#"<div class="card" style="width: 18rem">
  <img src="{image}" class="card-img-top" alt="{name}" />
  <div class="card-body">
    <h5 class="card-title">{name}</h5>
    <p class="card-text">{description}</p>
    <h4 class="unit-price">{price}</h4>
    <div>
      {increase}
      <span class="quantity">{quantity}</span>
      {decrease}
    </div>
    <div>
      {delete}
      {favorite}
    </div>
  </div>
</div>"#,
            image = escape_html(&self.image_url),
            name = escape_html(&self.name),
            description = escape_html(&self.description),
            price = self.unit_price.display(),
            quantity = self.quantity,
            increase = control(Control::Increase),
            decrease = control(Control::Decrease),
            delete = control(Control::Delete),
            favorite = control(Control::Favorite),
        )
    }
}

/// Card models for every item, in cart order
pub fn cards(cart: &Cart) -> Vec<CardModel> {
    cart.items().iter().map(CardModel::from_item).collect()
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A display host for the cart.
///
/// `CartWidget` drives the cycle: after every mutation it calls
/// `show_total`, then `render`, then `bind_controls`.
pub trait CartView {
    /// Discard all rendered cards and draw one per entry in `cards`.
    fn render(&mut self, cards: &[CardModel]) -> CartResult<()>;

    /// Update the total display.
    fn show_total(&mut self, total: Price) -> CartResult<()>;

    /// Make the just-rendered controls interactive. Called after every
    /// `render`; hosts that delegate from a persistent container may
    /// treat repeat calls as no-ops.
    fn bind_controls(&mut self) -> CartResult<()>;

    /// Flip the favorite marker on a card. Purely visual: lost on the
    /// next redraw.
    fn toggle_favorite(&mut self, id: ProductId) -> CartResult<()>;
}
