// REST-backed store. A small blocking HTTP client that proxies the same
// read-all / write-all cycle to a remote `/products` resource.

use super::csv_file::read_products;
use super::{find_by_id, RecordStore, Result, StoreError};
use crate::model::{parse_price, Product, ProductError, ProductRecord};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Holds a reqwest blocking client, the API base URL and the path of the
/// CSV snapshot used by `reset`.
#[derive(Clone)]
pub struct ApiStore {
    client: Client,
    base_url: String,
    default_path: PathBuf,
}

/// Product as it travels over the wire. The id and price are kept as
/// `serde_json::Value` because backends disagree on numbers vs strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub aisle: String,
    #[serde(default)]
    pub department: String,
    pub price: Value,
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl TryFrom<ApiProduct> for Product {
    type Error = ProductError;

    fn try_from(wire: ApiProduct) -> std::result::Result<Self, Self::Error> {
        let id = wire.id.as_ref().map(value_text).unwrap_or_default();
        Ok(Product {
            id: id.parse()?,
            price: parse_price(&value_text(&wire.price))?,
            name: wire.name,
            aisle: wire.aisle,
            department: wire.department,
        })
    }
}

impl From<&Product> for ApiProduct {
    fn from(product: &Product) -> Self {
        let record = ProductRecord::from(product);
        ApiProduct {
            id: Some(Value::from(product.id.get())),
            name: record.name,
            aisle: record.aisle,
            department: record.department,
            price: Value::String(record.price),
        }
    }
}

impl ApiStore {
    pub fn new(base_url: impl Into<String>, default_path: impl Into<PathBuf>) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .build()
            .map_err(|e| StoreError::access(&base_url, e))?;
        Ok(Self::with_client(client, base_url, default_path))
    }

    /// Use an already configured client (proxy, timeouts, TLS).
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        default_path: impl Into<PathBuf>,
    ) -> Self {
        ApiStore {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_path: default_path.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn collection_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    pub fn item_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    /// Fail with the status and body text when the response is not a success.
    fn check(url: &str, res: Response) -> Result<Response> {
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            return Err(StoreError::access(url, format!("{} - {}", status, txt)));
        }
        Ok(res)
    }

    fn post(&self, product: &Product) -> Result<()> {
        let url = self.collection_url();
        debug!(%url, id = %product.id, "POST");
        let res = self
            .client
            .post(&url)
            .json(&ApiProduct::from(product))
            .send()
            .map_err(|e| StoreError::access(&url, e))?;
        Self::check(&url, res)?;
        Ok(())
    }

    fn put(&self, product: &Product) -> Result<()> {
        let url = self.item_url(product.id);
        debug!(%url, "PUT");
        let res = self
            .client
            .put(&url)
            .json(&ApiProduct::from(product))
            .send()
            .map_err(|e| StoreError::access(&url, e))?;
        Self::check(&url, res)?;
        Ok(())
    }

    fn delete(&self, product: &Product) -> Result<()> {
        let url = self.item_url(product.id);
        debug!(%url, "DELETE");
        let res = self
            .client
            .delete(&url)
            .send()
            .map_err(|e| StoreError::access(&url, e))?;
        Self::check(&url, res)?;
        Ok(())
    }
}

impl RecordStore for ApiStore {
    fn fetch_all(&self) -> Result<Vec<Product>> {
        let url = self.collection_url();
        debug!(%url, "GET");
        let res = self
            .client
            .get(&url)
            .send()
            .map_err(|e| StoreError::access(&url, e))?;
        let res = Self::check(&url, res)?;
        let wire: Vec<ApiProduct> = res.json().map_err(|e| StoreError::malformed(&url, e))?;
        wire.into_iter()
            .map(|p| Product::try_from(p).map_err(|e| StoreError::malformed(&url, e)))
            .collect()
    }

    fn fetch_by_id(&self, id: crate::model::ProductId) -> Result<Option<Product>> {
        let url = self.item_url(id);
        debug!(%url, "GET");
        let res = self
            .client
            .get(&url)
            .send()
            .map_err(|e| StoreError::access(&url, e))?;
        if !res.status().is_success() {
            warn!(%url, status = %res.status(), "product lookup failed");
            return Ok(None);
        }
        // Unexpected bodies are reported as absent rather than fatal.
        let product = res
            .json::<ApiProduct>()
            .ok()
            .and_then(|wire| Product::try_from(wire).ok());
        if product.is_none() {
            warn!(%url, "unparsable product response");
        }
        Ok(product)
    }

    fn replace_all(&self, products: &[Product]) -> Result<()> {
        let remote = self.fetch_all()?;
        info!(url = %self.collection_url(), count = products.len(), "synchronizing remote products");

        for old in &remote {
            if find_by_id(products, old.id).is_none() {
                self.delete(old)?;
            }
        }
        for product in products {
            match find_by_id(&remote, product.id) {
                Some(old) if old == product => {}
                Some(_) => self.put(product)?,
                None => self.post(product)?,
            }
        }
        Ok(())
    }

    fn reset(&self) -> Result<usize> {
        info!(from = %self.default_path.display(), url = %self.collection_url(), "resetting defaults");
        let defaults = read_products(&self.default_path)?;
        self.replace_all(&defaults)?;
        Ok(defaults.len())
    }

    fn describe(&self) -> String {
        format!("api {}", self.base_url)
    }
}
