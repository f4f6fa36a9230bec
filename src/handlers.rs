// CRUD handlers. Each takes the collection read at startup, asks for what it
// needs, and returns `Some(collection)` when the result must be persisted.

use crate::model::{Product, ProductFields, ProductId};
use crate::ops;
use crate::prompt::Prompt;
use crate::store::find_by_id;
use anyhow::Result;
use std::io::Write;

pub const NOT_FOUND: &str = "There is no product with that identifier.";
const RULE: &str = "--------------------------------";

fn header(out: &mut dyn Write, title: &str) -> Result<()> {
    writeln!(out, "{}\n{}\n{}", RULE, title, RULE)?;
    Ok(())
}

fn dump(out: &mut dyn Write, product: &Product) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(product)?)?;
    Ok(())
}

/// Ask for an identifier. Text that is not a valid id can never match.
fn ask_id(prompt: &mut dyn Prompt) -> Result<Option<ProductId>> {
    let raw = prompt.text("Ok. Please specify the product's identifier")?;
    Ok(raw.parse().ok())
}

pub fn list(products: &[Product], out: &mut dyn Write) -> Result<Option<Vec<Product>>> {
    header(out, &format!("LISTING {} PRODUCTS:", products.len()))?;
    for product in products {
        writeln!(out, " #{}: {}", product.id, product.name)?;
    }
    Ok(None)
}

pub fn show(
    products: &[Product],
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<Option<Vec<Product>>> {
    let id = ask_id(prompt)?;
    header(out, "SHOWING A PRODUCT:")?;
    match id.and_then(|id| find_by_id(products, id)) {
        Some(product) => dump(out, product)?,
        None => writeln!(out, "{}", NOT_FOUND)?,
    }
    Ok(None)
}

pub fn create(
    mut products: Vec<Product>,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<Option<Vec<Product>>> {
    let name = prompt.text("Ok. Please input the product's name")?;
    let aisle = prompt.text("Ok. Please input the product's aisle")?;
    let department = prompt.text("Ok. Please input the product's department")?;
    let price = prompt.price("Ok. Please input the product's price")?;
    let fields = ProductFields::new(name, aisle, department, price)?;

    let product = ops::create(&mut products, fields)?;
    header(out, "CREATING A PRODUCT:")?;
    dump(out, &product)?;
    Ok(Some(products))
}

pub fn update(
    mut products: Vec<Product>,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<Option<Vec<Product>>> {
    let current = match ask_id(prompt)?.and_then(|id| find_by_id(&products, id)) {
        Some(product) => product.clone(),
        None => {
            header(out, "UPDATING A PRODUCT:")?;
            writeln!(out, "{}", NOT_FOUND)?;
            return Ok(None);
        }
    };

    // Whatever is typed replaces the field, blank included.
    let name = prompt.text(&format!("Change name from '{}' to", current.name))?;
    let aisle = prompt.text(&format!("Change aisle from '{}' to", current.aisle))?;
    let department = prompt.text(&format!("Change department from '{}' to", current.department))?;
    let price = prompt.price(&format!("Change price from '{}' to", current.price))?;
    let fields = ProductFields::new(name, aisle, department, price)?;

    header(out, "UPDATING A PRODUCT:")?;
    match ops::update(&mut products, current.id, fields) {
        Some(updated) => dump(out, &updated)?,
        None => writeln!(out, "{}", NOT_FOUND)?,
    }
    Ok(Some(products))
}

pub fn destroy(
    mut products: Vec<Product>,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<Option<Vec<Product>>> {
    let id = ask_id(prompt)?;
    header(out, "DESTROYING A PRODUCT:")?;
    match id.and_then(|id| ops::destroy(&mut products, id)) {
        Some(removed) => dump(out, &removed)?,
        None => writeln!(out, "{}", NOT_FOUND)?,
    }
    // Persisted either way; unchanged when nothing matched.
    Ok(Some(products))
}
