//! # DOM View
//!
//! `CartView` backed by the page. Cards are drawn into the render target
//! (`.list-products`), the total into `#total`.
//!
//! Clicks are handled by a single listener on the render target that reads
//! `data-action` / `data-id` from the clicked control. The render target
//! survives every redraw, so the listener is installed once and covers each
//! new generation of cards.

use cart_core::{CardModel, CartAction, CartError, CartResult, CartView, Price, ProductId};
use js_sys::Function;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

pub const LIST_SELECTOR: &str = ".list-products";
pub const TOTAL_ID: &str = "total";
pub const FAVORITE_CLASS: &str = "text-danger";

/// Routes a decoded click back into the widget
pub type Dispatch = Rc<dyn Fn(CartAction)>;

pub struct DomView {
    document: Document,
    list: Element,
    total: Element,
    dispatch: Dispatch,
    listener: Option<Closure<dyn FnMut(Event)>>,
}

impl DomView {
    /// Look up the render target and total display. Both must exist.
    pub fn find_targets(document: &Document) -> CartResult<(Element, Element)> {
        let list = document
            .query_selector(LIST_SELECTOR)
            .map_err(js_err("querySelector"))?
            .ok_or_else(|| CartError::MissingElement {
                selector: LIST_SELECTOR.to_string(),
            })?;
        let total = document
            .get_element_by_id(TOTAL_ID)
            .ok_or_else(|| CartError::MissingElement {
                selector: format!("#{}", TOTAL_ID),
            })?;
        Ok((list, total))
    }

    pub fn new(document: &Document, list: Element, total: Element, dispatch: Dispatch) -> Self {
        Self {
            document: document.clone(),
            list,
            total,
            dispatch,
            listener: None,
        }
    }
}

impl CartView for DomView {
    fn render(&mut self, cards: &[CardModel]) -> CartResult<()> {
        self.list.set_inner_html("");
        for card in cards {
            let node = self
                .document
                .create_element("div")
                .map_err(js_err("createElement"))?;
            node.set_class_name("card-body");
            node.set_inner_html(&card.to_html());
            self.list
                .append_child(&node)
                .map_err(js_err("appendChild"))?;
        }
        Ok(())
    }

    fn show_total(&mut self, total: Price) -> CartResult<()> {
        self.total.set_text_content(Some(&total.display()));
        Ok(())
    }

    fn bind_controls(&mut self) -> CartResult<()> {
        if self.listener.is_some() {
            return Ok(());
        }

        let dispatch = Rc::clone(&self.dispatch);
        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(action) = action_from_event(&event) {
                dispatch(action);
            }
        });
        self.list
            .add_event_listener_with_callback(
                "click",
                listener.as_ref().unchecked_ref::<Function>(),
            )
            .map_err(js_err("addEventListener"))?;
        self.listener = Some(listener);
        Ok(())
    }

    fn toggle_favorite(&mut self, id: ProductId) -> CartResult<()> {
        let selector = format!(r#"[data-action="favorite"][data-id="{}"]"#, id);
        if let Some(icon) = self
            .list
            .query_selector(&selector)
            .map_err(js_err("querySelector"))?
        {
            icon.class_list()
                .toggle(FAVORITE_CLASS)
                .map_err(js_err("classList.toggle"))?;
        }
        Ok(())
    }
}

impl Drop for DomView {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            let _ = self.list.remove_event_listener_with_callback(
                "click",
                listener.as_ref().unchecked_ref::<Function>(),
            );
        }
    }
}

/// Decode the control under a click, if any
fn action_from_event(event: &Event) -> Option<CartAction> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let control = target.closest("[data-action]").ok()??;
    let action = control.get_attribute("data-action")?;
    let id = control.get_attribute("data-id")?;
    CartAction::from_control(&action, &id)
}

pub(crate) fn js_err(context: &'static str) -> impl Fn(JsValue) -> CartError {
    move |value| CartError::Dom(format!("{}: {:?}", context, value))
}
