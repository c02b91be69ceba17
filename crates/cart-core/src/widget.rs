//! # Cart Widget
//!
//! Owns the cart, the catalog and a `CartView`, and runs the
//! mutate → recompute total → redraw → bind cycle for every action.

use crate::action::CartAction;
use crate::cart::Cart;
use crate::error::CartResult;
use crate::product::{Product, ProductCatalog, ProductId};
use crate::view::{cards, CartView};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct CartWidget<V: CartView> {
    cart: Cart,
    catalog: ProductCatalog,
    view: V,
}

impl<V: CartView> CartWidget<V> {
    /// Create a widget with an empty cart. Nothing is drawn until
    /// `refresh` (or the first action) runs.
    pub fn new(catalog: ProductCatalog, view: V) -> Self {
        Self {
            cart: Cart::new(),
            catalog,
            view,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Recompute the total, redraw every card, rebind controls.
    pub fn refresh(&mut self) -> CartResult<()> {
        self.view.show_total(self.cart.total_price())?;
        self.render()
    }

    /// Full redraw followed by binding the new controls.
    pub fn render(&mut self) -> CartResult<()> {
        self.view.render(&cards(&self.cart))?;
        self.view.bind_controls()
    }

    pub fn add_item(&mut self, product: &Arc<Product>) -> CartResult<()> {
        self.cart.add_item(product);
        self.refresh()
    }

    pub fn remove_item(&mut self, id: ProductId) -> CartResult<()> {
        self.cart.remove_item(id);
        self.refresh()
    }

    /// Apply a decoded user action. Ids that match nothing are ignored.
    pub fn dispatch(&mut self, action: CartAction) -> CartResult<()> {
        debug!(?action, "dispatch");
        match action {
            CartAction::Add(id) => match self.catalog.get(id).cloned() {
                Some(product) => self.add_item(&product),
                None => {
                    warn!(product_id = %id, "add ignored: not in catalog");
                    Ok(())
                }
            },
            CartAction::Increase(id) => {
                if self.cart.increment(id) {
                    self.refresh()?;
                }
                Ok(())
            }
            CartAction::Decrease(id) => {
                if self.cart.decrement(id) {
                    self.refresh()?;
                }
                Ok(())
            }
            CartAction::Remove(id) => self.remove_item(id),
            CartAction::ToggleFavorite(id) => self.view.toggle_favorite(id),
        }
    }

    /// "Add to cart" by catalog position
    pub fn add_catalog_index(&mut self, index: usize) -> CartResult<()> {
        match self.catalog.get_index(index).cloned() {
            Some(product) => self.add_item(&product),
            None => {
                warn!(index, "add ignored: no catalog entry at index");
                Ok(())
            }
        }
    }
}
