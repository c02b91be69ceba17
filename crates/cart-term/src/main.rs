//! # Basket Cart (terminal)
//!
//! Interactive shopping cart in the terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Optional settings
//! export CART_CATALOG_PATH=config/products.toml
//! export CART_COLOR=true
//!
//! # Run
//! cart-term
//! ```

use cart_core::CartWidget;
use cart_term::{run, TermConfig, TextView};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the cart on stdout
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let config = TermConfig::from_env();
    let catalog = config.load_catalog()?;
    info!("Products loaded: {}", catalog.len());

    let stdout = std::io::stdout();
    let view = TextView::new(stdout.lock(), config.color);
    let mut widget = CartWidget::new(catalog, view);

    let stdin = std::io::stdin();
    run(&mut widget, stdin.lock())?;

    info!("Session ended with {} items", widget.cart().total_item_count());
    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🧺 Basket Cart 🧺
  ━━━━━━━━━━━━━━━━━
  Version: {}
  Type `help` for commands.
"#,
        env!("CARGO_PKG_VERSION")
    );
}
