//! # cart-wasm
//!
//! WebAssembly host for the basket-cart widget.
//!
//! This crate provides:
//! - `CartApp`, which mounts the cart onto the page and owns it
//! - `DomView`, the `CartView` implementation over the DOM
//! - Small helpers for formatting and validation
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { CartApp } from './pkg/cart_wasm.js';
//!
//! await init();
//!
//! // Needs `.list-products` and `#total` on the page
//! const app = new CartApp();
//!
//! console.log(app.total_price(), JSON.parse(app.snapshot()));
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

pub mod dom;

use cart_core::{CartAction, CartError, CartWidget, Price, ProductCatalog, ProductId};
use dom::{Dispatch, DomView, LIST_SELECTOR};
use js_sys::Function;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

/// Catalog "add to cart" controls, wired to products by position
pub const ADD_SELECTOR: &str = ".card-body .fas.fa-plus-circle";

type DomWidget = CartWidget<DomView>;

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// The mounted cart. Keep it alive for as long as the page uses the cart;
/// dropping it detaches every listener.
#[wasm_bindgen]
pub struct CartApp {
    widget: Rc<RefCell<DomWidget>>,
    add_listeners: Vec<(Element, Closure<dyn FnMut(Event)>)>,
}

#[wasm_bindgen]
impl CartApp {
    /// Mount with the built-in catalog
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<CartApp, JsValue> {
        let catalog = ProductCatalog::builtin().map_err(to_js)?;
        Self::mount(catalog)
    }

    /// Mount with a catalog given as TOML
    #[wasm_bindgen(js_name = withCatalog)]
    pub fn with_catalog(catalog_toml: &str) -> Result<CartApp, JsValue> {
        let catalog = ProductCatalog::from_toml(catalog_toml).map_err(to_js)?;
        Self::mount(catalog)
    }

    /// Add one unit of a catalog product by id
    pub fn add_product(&self, product_id: u32) -> Result<(), JsValue> {
        self.widget
            .borrow_mut()
            .dispatch(CartAction::Add(ProductId(product_id)))
            .map_err(to_js)
    }

    pub fn remove_product(&self, product_id: u32) -> Result<(), JsValue> {
        self.widget
            .borrow_mut()
            .remove_item(ProductId(product_id))
            .map_err(to_js)
    }

    pub fn total_items(&self) -> u32 {
        self.widget.borrow().cart().total_item_count()
    }

    /// Formatted total, e.g. "$ 170.00"
    pub fn total_price(&self) -> String {
        self.widget.borrow().cart().total_price().display()
    }

    /// Cart contents as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        let snapshot = self.widget.borrow().cart().snapshot();
        serde_json::to_string(&snapshot).map_err(|e| to_js(e.into()))
    }
}

impl CartApp {
    fn mount(catalog: ProductCatalog) -> Result<CartApp, JsValue> {
        let document = document()?;

        let (list, total) = DomView::find_targets(&document).map_err(to_js)?;
        let widget = Rc::new_cyclic(|weak: &Weak<RefCell<DomWidget>>| {
            let view = DomView::new(&document, list, total, dispatcher(weak.clone()));
            RefCell::new(CartWidget::new(catalog, view))
        });

        let add_listeners = bind_add_controls(&document, &widget)?;
        widget.borrow_mut().refresh().map_err(to_js)?;

        log(&format!(
            "cart mounted: {} products, {} add controls",
            widget.borrow().catalog().len(),
            add_listeners.len()
        ));

        Ok(CartApp {
            widget,
            add_listeners,
        })
    }
}

impl Drop for CartApp {
    fn drop(&mut self) {
        for (element, listener) in self.add_listeners.drain(..) {
            let _ = element.remove_event_listener_with_callback(
                "click",
                listener.as_ref().unchecked_ref::<Function>(),
            );
        }
    }
}

/// Dispatch closure holding only a weak handle, so the view's listener
/// does not keep the widget alive
fn dispatcher(weak: Weak<RefCell<DomWidget>>) -> Dispatch {
    Rc::new(move |action: CartAction| {
        let Some(widget) = weak.upgrade() else {
            return;
        };
        let Ok(mut widget) = widget.try_borrow_mut() else {
            warn(&format!("cart busy, dropped {:?}", action));
            return;
        };
        if let Err(err) = widget.dispatch(action) {
            warn(&format!("cart action failed: {}", err));
        }
    })
}

fn bind_add_controls(
    document: &Document,
    widget: &Rc<RefCell<DomWidget>>,
) -> Result<Vec<(Element, Closure<dyn FnMut(Event)>)>, JsValue> {
    let list = document.query_selector(LIST_SELECTOR)?;
    let buttons = document.query_selector_all(ADD_SELECTOR)?;

    let mut listeners = Vec::new();
    let mut index = 0;
    for i in 0..buttons.length() {
        let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        // Controls inside the render target belong to cart cards
        if list.as_ref().is_some_and(|l| l.contains(Some(&*button))) {
            continue;
        }

        let weak = Rc::downgrade(widget);
        let position = index;
        let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let Some(widget) = weak.upgrade() else {
                return;
            };
            let Ok(mut widget) = widget.try_borrow_mut() else {
                warn(&format!("cart busy, dropped add of catalog entry {}", position));
                return;
            };
            if let Err(err) = widget.add_catalog_index(position) {
                warn(&format!("add to cart failed: {}", err));
            }
        });
        button.add_event_listener_with_callback(
            "click",
            listener.as_ref().unchecked_ref::<Function>(),
        )?;
        listeners.push((button, listener));
        index += 1;
    }
    Ok(listeners)
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| to_js(CartError::MissingElement {
            selector: "document".to_string(),
        }))
}

fn to_js(err: CartError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Format a price in cents to display string
#[wasm_bindgen]
pub fn format_price(cents: u32) -> String {
    Price::from_cents(cents as u64).display()
}

/// Check a `data-id` value the way click handling parses it
#[wasm_bindgen]
pub fn validate_product_id(product_id: &str) -> bool {
    ProductId::parse_attr(product_id).is_some()
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
