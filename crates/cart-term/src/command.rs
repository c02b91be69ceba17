//! # Commands
//!
//! Line commands typed at the prompt. Card commands (`inc`, `dec`, `rm`,
//! `fav`) stand in for clicking a card's controls; `add` stands in for the
//! catalog's "add to cart" button.

use cart_core::{CartAction, ProductId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Action(CartAction),
    /// Print the cart as JSON
    Show,
    /// List catalog products
    Catalog,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs a product id")]
    MissingId(String),

    #[error("not a product id: {0}")]
    BadId(String),
}

pub const HELP: &str = "\
commands:
  add <id>    add a catalog product to the cart
  inc <id>    increase quantity        (alias: +)
  dec <id>    decrease quantity        (alias: -)
  rm <id>     remove from cart         (alias: del)
  fav <id>    toggle favorite marker
  show        print the cart as JSON
  catalog     list products
  help        this text
  quit        leave";

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };

        let arg = words.next();
        let with_id = |make: fn(ProductId) -> CartAction| action(name, arg, make);

        match name.to_ascii_lowercase().as_str() {
            "add" => with_id(CartAction::Add),
            "inc" | "+" => with_id(CartAction::Increase),
            "dec" | "-" => with_id(CartAction::Decrease),
            "rm" | "del" => with_id(CartAction::Remove),
            "fav" => with_id(CartAction::ToggleFavorite),
            "show" => Ok(Some(Command::Show)),
            "catalog" | "ls" => Ok(Some(Command::Catalog)),
            "help" | "?" => Ok(Some(Command::Help)),
            "quit" | "exit" | "q" => Ok(Some(Command::Quit)),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

/// Build a card or catalog action from `<name> <id>`
fn action(
    name: &str,
    arg: Option<&str>,
    make: fn(ProductId) -> CartAction,
) -> Result<Option<Command>, CommandError> {
    let raw = arg.ok_or_else(|| CommandError::MissingId(name.to_string()))?;
    let id = ProductId::parse_attr(raw).ok_or_else(|| CommandError::BadId(raw.to_string()))?;
    Ok(Some(Command::Action(make(id))))
}
