// Pure collection logic behind the handlers. Nothing here touches a store
// or the terminal; handlers call these between reading and writing.

use crate::model::{Product, ProductError, ProductFields, ProductId};

/// `max(existing ids) + 1`, or the first id when the collection is empty.
/// Fails instead of wrapping when the maximum id is `u64::MAX`.
pub fn next_id(products: &[Product]) -> Result<ProductId, ProductError> {
    match products.iter().map(|p| p.id).max() {
        Some(max) => max.next(),
        None => Ok(ProductId::FIRST),
    }
}

/// Append a new product with a freshly assigned id.
pub fn create(products: &mut Vec<Product>, fields: ProductFields) -> Result<Product, ProductError> {
    let product = Product::new(next_id(products)?, fields);
    products.push(product.clone());
    Ok(product)
}

/// Replace the fields of the first product with `id`. `None` if absent.
pub fn update(products: &mut [Product], id: ProductId, fields: ProductFields) -> Option<Product> {
    let product = products.iter_mut().find(|p| p.id == id)?;
    product.apply(fields);
    Some(product.clone())
}

/// Remove every product with `id`, returning the first one removed.
pub fn destroy(products: &mut Vec<Product>, id: ProductId) -> Option<Product> {
    let removed = products.iter().find(|p| p.id == id).cloned();
    products.retain(|p| p.id != id);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn fields(name: &str) -> ProductFields {
        ProductFields::new(name, "A1", "Dairy", Decimal::new(250, 2)).unwrap()
    }

    fn product(id: u64, name: &str) -> Product {
        Product::new(ProductId::new(id).unwrap(), fields(name))
    }

    #[test]
    fn next_id_on_empty_is_first() {
        assert_eq!(next_id(&[]), Ok(ProductId::FIRST));
    }

    #[test]
    fn next_id_uses_max_not_len() {
        let products = vec![product(2, "a"), product(9, "b"), product(4, "c")];
        assert_eq!(next_id(&products).unwrap().get(), 10);
    }

    #[test]
    fn next_id_at_max_fails_instead_of_wrapping() {
        let products = vec![product(u64::MAX, "last")];
        assert_eq!(next_id(&products), Err(ProductError::IdExhausted(u64::MAX)));
    }

    #[test]
    fn create_at_max_leaves_collection() {
        let mut products = vec![product(u64::MAX, "last")];
        assert!(create(&mut products, fields("Milk")).is_err());
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn create_appends_with_greater_id() {
        let mut products = vec![product(1, "Eggs")];
        let created = create(&mut products, fields("Milk")).unwrap();
        assert_eq!(created.id.get(), 2);
        assert_eq!(products.len(), 2);
        assert_eq!(products.last(), Some(&created));
    }

    #[test]
    fn update_missing_id_leaves_collection() {
        let mut products = vec![product(1, "Eggs")];
        let before = products.clone();
        assert!(update(&mut products, ProductId::new(5).unwrap(), fields("x")).is_none());
        assert_eq!(products, before);
    }

    #[test]
    fn update_replaces_fields_even_blank() {
        let mut products = vec![product(1, "Eggs")];
        let blank = ProductFields::new("", "", "", Decimal::ZERO).unwrap();
        let updated = update(&mut products, ProductId::FIRST, blank.clone()).unwrap();
        assert_eq!(updated.id, ProductId::FIRST);
        assert_eq!(products[0].fields(), blank);
    }

    #[test]
    fn destroy_removes_duplicates_too() {
        let mut products = vec![product(1, "Eggs"), product(2, "Milk"), product(1, "Dup")];
        let removed = destroy(&mut products, ProductId::FIRST).unwrap();
        assert_eq!(removed.name, "Eggs");
        assert_eq!(products, vec![product(2, "Milk")]);
    }

    #[test]
    fn destroy_missing_is_tolerated() {
        let mut products = vec![product(1, "Eggs")];
        assert!(destroy(&mut products, ProductId::new(3).unwrap()).is_none());
        assert_eq!(products.len(), 1);
    }
}
