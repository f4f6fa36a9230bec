// In-memory store with a write counter, used by the handler and dispatch tests.

use super::{RecordStore, Result, StoreError};
use crate::model::Product;
use std::cell::RefCell;

/// In-memory store for tests.
///
/// Uses `RefCell` since the CLI is single-threaded and `RecordStore` takes `&self`.
#[derive(Default)]
pub struct MemStore {
    products: RefCell<Vec<Product>>,
    defaults: Vec<Product>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemStore {
    pub fn new(products: Vec<Product>) -> Self {
        MemStore {
            products: RefCell::new(products),
            ..Default::default()
        }
    }

    pub fn with_defaults(mut self, defaults: Vec<Product>) -> Self {
        self.defaults = defaults;
        self
    }

    /// Number of `replace_all` calls (reset included) seen so far.
    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }

    pub fn snapshot(&self) -> Vec<Product> {
        self.products.borrow().clone()
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl RecordStore for MemStore {
    fn fetch_all(&self) -> Result<Vec<Product>> {
        Ok(self.snapshot())
    }

    fn replace_all(&self, products: &[Product]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(StoreError::access("memory", "simulated write error"));
        }
        *self.writes.borrow_mut() += 1;
        *self.products.borrow_mut() = products.to_vec();
        Ok(())
    }

    fn reset(&self) -> Result<usize> {
        self.replace_all(&self.defaults)?;
        Ok(self.defaults.len())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
