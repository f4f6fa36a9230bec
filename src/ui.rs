// UI layer: prints the menu, reads one operation name and hands it to the
// dispatcher. One operation per run; there is no loop.

use crate::config::Config;
use crate::dispatch::{dispatch, Operation};
use crate::prompt::{Prompt, TerminalPrompt};
use crate::store::RecordStore;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

/// Render the menu banner for `username` and the current product count.
pub fn menu(username: &str, products_count: usize) -> String {
    let mut menu = format!(
        "
-----------------------------------
INVENTORY MANAGEMENT APPLICATION
-----------------------------------
Welcome {}!
There are {} products in the database.
    operation | description
    --------- | ------------------
",
        username, products_count
    );
    for op in Operation::ALL {
        let quoted = format!("'{}'", op.name());
        menu.push_str(&format!("    {:<9} | {}\n", quoted, op.description()));
    }
    menu
}

/// Run `f` behind a spinner on stderr. Remote stores can take a moment.
fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    Ok(result)
}

/// One full session: read all products, show the menu, run one operation.
pub fn run_session(
    store: &dyn RecordStore,
    username: &str,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<()> {
    let products = with_spinner("Loading products...", || store.fetch_all())?
        .with_context(|| format!("Failed to read products from {}", store.describe()))?;

    writeln!(out, "{}", menu(username, products.len()))?;
    let operation = prompt.text("Please select an operation")?;
    dispatch(&operation, store, products, prompt, out)
}

/// Entry point for the binary: terminal prompts, stdout output.
pub fn main_menu(config: &Config) -> Result<()> {
    let store = config.open_store()?;
    let mut prompt = TerminalPrompt;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_session(store.as_ref(), &config.username, &mut prompt, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductFields, ProductId};
    use crate::prompt::ScriptedPrompt;
    use crate::store::MemStore;
    use rust_decimal::Decimal;

    #[test]
    fn menu_lists_every_operation() {
        let text = menu("@prof", 3);
        assert!(text.contains("Welcome @prof!"));
        assert!(text.contains("There are 3 products in the database."));
        for op in Operation::ALL {
            assert!(text.contains(&format!("'{}'", op.name())));
            assert!(text.contains(op.description()));
        }
    }

    #[test]
    fn session_lists_after_menu() {
        let eggs = Product::new(
            ProductId::FIRST,
            ProductFields::new("Eggs", "A1", "Dairy", Decimal::new(250, 2)).unwrap(),
        );
        let store = MemStore::new(vec![eggs]);
        let mut prompt = ScriptedPrompt::new(["List"]);
        let mut out = Vec::new();
        run_session(&store, "tester", &mut prompt, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let menu_at = text.find("INVENTORY MANAGEMENT APPLICATION").unwrap();
        let list_at = text.find("LISTING 1 PRODUCTS:").unwrap();
        assert!(menu_at < list_at);
        assert!(text.contains(" #1: Eggs"));
    }
}
