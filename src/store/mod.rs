// Record stores: the persistence boundary for the product collection.
//
// Every mutation goes read-all → compute → write-all. `replace_all` is the
// only write primitive; backends differ only in where the rows live.

pub mod api;
pub mod csv_file;
pub mod memory;

use crate::model::{Product, ProductError, ProductId};
use thiserror::Error;

pub use self::api::ApiStore;
pub use self::csv_file::CsvStore;
pub use self::memory::MemStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot access {resource}: {source}")]
    Access {
        resource: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("malformed data in {resource}: {reason}")]
    Malformed { resource: String, reason: String },

    #[error(transparent)]
    Record(#[from] ProductError),
}

impl StoreError {
    pub(crate) fn access(
        resource: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        StoreError::Access {
            resource: resource.into(),
            source: source.into(),
        }
    }

    pub(crate) fn malformed(resource: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::Malformed {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Abstract interface over the authoritative product collection.
pub trait RecordStore {
    /// Every record currently stored, in store order.
    fn fetch_all(&self) -> Result<Vec<Product>>;

    /// The record with `id`, or `None`. Duplicates resolve to the first match.
    fn fetch_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(find_by_id(&self.fetch_all()?, id).cloned())
    }

    /// Overwrite the whole store with exactly `products`.
    fn replace_all(&self, products: &[Product]) -> Result<()>;

    /// Copy the default snapshot over the live data. Returns the record count.
    fn reset(&self) -> Result<usize>;

    /// Short label for log lines and the menu banner.
    fn describe(&self) -> String;
}

/// First product with `id`.
pub fn find_by_id(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}
