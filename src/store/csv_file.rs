// CSV file store. The live file is rewritten wholesale on every save;
// the factory snapshot lives next to it.

use super::{RecordStore, Result, StoreError};
use crate::model::{Product, ProductRecord};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const HEADER: [&str; 5] = ["id", "name", "aisle", "department", "price"];

/// File-backed store: one CSV file for live data, one for the factory snapshot.
pub struct CsvStore {
    path: PathBuf,
    default_path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>, default_path: impl Into<PathBuf>) -> Self {
        CsvStore {
            path: path.into(),
            default_path: default_path.into(),
        }
    }

    /// `products.csv` and `products_default.csv` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        CsvStore::new(dir.join("products.csv"), dir.join("products_default.csv"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for CsvStore {
    fn fetch_all(&self) -> Result<Vec<Product>> {
        read_products(&self.path)
    }

    fn replace_all(&self, products: &[Product]) -> Result<()> {
        info!(path = %self.path.display(), count = products.len(), "overwriting product file");
        write_products(&self.path, products)
    }

    fn reset(&self) -> Result<usize> {
        info!(from = %self.default_path.display(), to = %self.path.display(), "resetting defaults");
        let defaults = read_products(&self.default_path)?;
        write_products(&self.path, &defaults)?;
        Ok(defaults.len())
    }

    fn describe(&self) -> String {
        format!("csv file {}", self.path.display())
    }
}

/// Read every row of a product CSV file.
pub fn read_products(path: &Path) -> Result<Vec<Product>> {
    let resource = path.display().to_string();
    let file = File::open(path).map_err(|e| StoreError::access(&resource, e))?;
    let mut reader = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(file);

    let mut products = Vec::new();
    for (line, row) in reader.deserialize::<ProductRecord>().enumerate() {
        let record = row.map_err(|e| StoreError::malformed(&resource, e))?;
        let product = Product::try_from(record)
            .map_err(|e| StoreError::malformed(&resource, format!("row {}: {}", line + 1, e)))?;
        products.push(product);
    }
    debug!(path = %resource, count = products.len(), "read products");
    Ok(products)
}

/// Overwrite `path` with a header line and one row per product.
pub fn write_products(path: &Path, products: &[Product]) -> Result<()> {
    let resource = path.display().to_string();
    let file = File::create(path).map_err(|e| StoreError::access(&resource, e))?;
    // Header is written by hand so an empty collection still yields one.
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer
        .write_record(HEADER)
        .map_err(|e| StoreError::access(&resource, e))?;
    for product in products {
        writer
            .serialize(ProductRecord::from(product))
            .map_err(|e| StoreError::access(&resource, e))?;
    }
    writer.flush().map_err(|e| StoreError::access(&resource, e))?;
    Ok(())
}
