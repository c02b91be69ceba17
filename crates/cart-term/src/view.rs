//! # Text View
//!
//! `CartView` over any `std::io::Write`. Cards are printed as lines; the
//! controls of the last drawn cards are the only ones commands may use.

use cart_core::{CardModel, CartResult, CartView, Price, ProductId};
use std::collections::HashSet;
use std::io::Write;

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

pub struct TextView<W: Write> {
    out: W,
    color: bool,
    cards: Vec<CardModel>,
    /// Ids whose controls are live (set by `bind_controls`)
    bound: HashSet<ProductId>,
    favorites: HashSet<ProductId>,
}

impl<W: Write> TextView<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            cards: Vec::new(),
            bound: HashSet::new(),
            favorites: HashSet::new(),
        }
    }

    pub fn out_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Whether a card for `id` is on screen with live controls
    pub fn is_bound(&self, id: ProductId) -> bool {
        self.bound.contains(&id)
    }

    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.favorites.contains(&id)
    }

    fn card_line(&self, card: &CardModel) -> String {
        let heart = if self.is_favorite(card.product_id) { "♥" } else { "♡" };
        let name = if self.color && self.is_favorite(card.product_id) {
            format!("{}{}{}", RED, card.name, RESET)
        } else {
            card.name.clone()
        };
        format!(
            "  [{}] {} {:<12} {:>10} x {:<3} = {}",
            card.product_id,
            heart,
            name,
            card.unit_price.display(),
            card.quantity,
            card.unit_price.times(card.quantity).display(),
        )
    }
}

impl<W: Write> CartView for TextView<W> {
    fn render(&mut self, cards: &[CardModel]) -> CartResult<()> {
        // The previous generation of cards and their controls is gone
        self.bound.clear();
        self.favorites.clear();
        self.cards = cards.to_vec();

        writeln!(self.out, "── Cart ─────────────────────────────────────")?;
        if self.cards.is_empty() {
            writeln!(self.out, "  (empty)")?;
        }
        for card in &self.cards {
            let line = self.card_line(card);
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn show_total(&mut self, total: Price) -> CartResult<()> {
        writeln!(self.out, "Total: {}", total.display())?;
        Ok(())
    }

    fn bind_controls(&mut self) -> CartResult<()> {
        self.bound = self.cards.iter().map(|c| c.product_id).collect();
        Ok(())
    }

    fn toggle_favorite(&mut self, id: ProductId) -> CartResult<()> {
        if !self.is_bound(id) {
            return Ok(());
        }
        if !self.favorites.remove(&id) {
            self.favorites.insert(id);
        }
        if let Some(card) = self.cards.iter().find(|c| c.product_id == id) {
            let line = self.card_line(card);
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }
}
