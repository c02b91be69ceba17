//! # Session
//!
//! Reads commands line by line and feeds them to the widget until `quit`
//! or end of input.

use crate::command::{Command, HELP};
use crate::view::TextView;
use cart_core::{CartAction, CartWidget};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

pub type TermWidget<W> = CartWidget<TextView<W>>;

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drive `widget` from `input`
pub fn run<R: BufRead, W: Write>(widget: &mut TermWidget<W>, input: R) -> anyhow::Result<()> {
    widget.refresh()?;
    prompt(widget)?;

    for line in input.lines() {
        let line = line?;
        if execute(widget, &line)? == Flow::Quit {
            break;
        }
        prompt(widget)?;
    }
    Ok(())
}

/// Run one input line
pub fn execute<W: Write>(widget: &mut TermWidget<W>, line: &str) -> anyhow::Result<Flow> {
    let command = match Command::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Ok(Flow::Continue),
        Err(err) => {
            warn!(%err, "bad command");
            writeln!(widget.view_mut().out_mut(), "{}", err)?;
            return Ok(Flow::Continue);
        }
    };
    debug!(?command, "command");

    match command {
        Command::Action(action) => {
            // Card controls only exist for cards currently on screen
            let is_card_control = !matches!(action, CartAction::Add(_));
            if is_card_control && !widget.view().is_bound(action.product_id()) {
                writeln!(
                    widget.view_mut().out_mut(),
                    "no card for product {}",
                    action.product_id()
                )?;
            } else if let CartAction::Add(id) = action {
                if widget.catalog().get(id).is_none() {
                    writeln!(widget.view_mut().out_mut(), "no product {} in catalog", id)?;
                } else {
                    widget.dispatch(action)?;
                }
            } else {
                widget.dispatch(action)?;
            }
        }
        Command::Show => {
            let json = serde_json::to_string_pretty(&widget.cart().snapshot())?;
            writeln!(widget.view_mut().out_mut(), "{}", json)?;
        }
        Command::Catalog => {
            let lines: Vec<String> = widget
                .catalog()
                .iter()
                .map(|p| format!("  [{}] {:<12} {:>10}", p.id, p.name, p.price.display()))
                .collect();
            let out = widget.view_mut().out_mut();
            for line in lines {
                writeln!(out, "{}", line)?;
            }
        }
        Command::Help => {
            writeln!(widget.view_mut().out_mut(), "{}", HELP)?;
        }
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn prompt<W: Write>(widget: &mut TermWidget<W>) -> anyhow::Result<()> {
    let out = widget.view_mut().out_mut();
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}
