// Single-shot router from an operation name to one handler.

use crate::handlers;
use crate::model::Product;
use crate::prompt::Prompt;
use crate::store::RecordStore;
use anyhow::{Context, Result};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

pub const NOT_RECOGNIZED: &str = "Sorry, that operation was not recognized.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Show,
    Create,
    Update,
    Destroy,
    Reset,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown operation: '{0}'")]
pub struct UnknownOperation(pub String);

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::List,
        Operation::Show,
        Operation::Create,
        Operation::Update,
        Operation::Destroy,
        Operation::Reset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::List => "List",
            Operation::Show => "Show",
            Operation::Create => "Create",
            Operation::Update => "Update",
            Operation::Destroy => "Destroy",
            Operation::Reset => "Reset",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::List => "Display a list of product identifiers and names.",
            Operation::Show => "Show information about a product.",
            Operation::Create => "Add a new product.",
            Operation::Update => "Edit an existing product.",
            Operation::Destroy => "Delete an existing product.",
            Operation::Reset => "Reset the product list to defaults.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Operation::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownOperation(wanted.to_string()))
    }
}

/// Run the operation named by `input` against `products`, persisting the
/// result through `store` when the handler changed the collection.
pub fn dispatch(
    input: &str,
    store: &dyn RecordStore,
    products: Vec<Product>,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<()> {
    let op = match input.parse::<Operation>() {
        Ok(op) => op,
        Err(e) => {
            debug!(%e, "operation rejected");
            writeln!(out, "{}", NOT_RECOGNIZED)?;
            return Ok(());
        }
    };
    info!(operation = %op, store = %store.describe(), "dispatching");

    let updated = match op {
        Operation::List => handlers::list(&products, out)?,
        Operation::Show => handlers::show(&products, prompt, out)?,
        Operation::Create => handlers::create(products, prompt, out)?,
        Operation::Update => handlers::update(products, prompt, out)?,
        Operation::Destroy => handlers::destroy(products, prompt, out)?,
        Operation::Reset => {
            // Persists on its own; skips the generic write below.
            let count = store.reset().context("Failed to reset products")?;
            writeln!(out, "Resetting defaults ({} products).", count)?;
            return Ok(());
        }
    };

    if let Some(products) = updated {
        store
            .replace_all(&products)
            .with_context(|| format!("Failed to save products to {}", store.describe()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductFields, ProductId};
    use crate::prompt::ScriptedPrompt;
    use crate::store::MemStore;
    use rust_decimal::Decimal;

    fn eggs() -> Product {
        Product::new(
            ProductId::FIRST,
            ProductFields::new("Eggs", "A1", "Dairy", Decimal::new(250, 2)).unwrap(),
        )
    }

    fn run(input: &str, store: &MemStore, answers: &[&str]) -> String {
        let mut prompt = ScriptedPrompt::new(answers.iter().copied());
        let mut out = Vec::new();
        dispatch(input, store, store.snapshot(), &mut prompt, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("LIST".parse::<Operation>(), Ok(Operation::List));
        assert_eq!(" destroy ".parse::<Operation>(), Ok(Operation::Destroy));
        assert_eq!("rEsEt".parse::<Operation>(), Ok(Operation::Reset));
        assert_eq!(
            "purge".parse::<Operation>(),
            Err(UnknownOperation("purge".into()))
        );
    }

    #[test]
    fn unknown_operation_touches_nothing() {
        let store = MemStore::new(vec![eggs()]);
        let out = run("purge", &store, &[]);
        assert_eq!(out.trim(), NOT_RECOGNIZED);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn read_only_operations_do_not_write() {
        let store = MemStore::new(vec![eggs()]);
        run("list", &store, &[]);
        run("show", &store, &["1"]);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn create_persists_once() {
        let store = MemStore::new(vec![eggs()]);
        run("Create", &store, &["Milk", "A2", "Dairy", "3.10"]);
        assert_eq!(store.writes(), 1);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn destroy_of_missing_id_still_persists_unchanged() {
        let store = MemStore::new(vec![eggs()]);
        let out = run("destroy", &store, &["42"]);
        assert!(out.contains(handlers::NOT_FOUND));
        assert_eq!(store.writes(), 1);
        assert_eq!(store.snapshot(), vec![eggs()]);
    }

    #[test]
    fn reset_writes_defaults_and_is_idempotent() {
        let store = MemStore::new(vec![]).with_defaults(vec![eggs()]);
        let out = run("reset", &store, &[]);
        assert!(out.contains("Resetting defaults (1 products)."));
        let once = store.snapshot();
        run("reset", &store, &[]);
        assert_eq!(store.snapshot(), once);
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn write_failure_propagates() {
        let store = MemStore::new(vec![eggs()]);
        store.set_simulate_write_error(true);
        let mut prompt = ScriptedPrompt::new(["1"]);
        let mut out = Vec::new();
        let err = dispatch("destroy", &store, store.snapshot(), &mut prompt, &mut out).unwrap_err();
        assert!(err.to_string().contains("Failed to save products"));
    }
}
