use shared::domain::Product;

/// Bucket for products without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Products grouped by category, buckets in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuCatalog {
    buckets: Vec<(String, Vec<Product>)>,
}

impl MenuCatalog {
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(category, _)| category.as_str())
    }

    pub fn get(&self, category: &str) -> Option<&[Product]> {
        self.buckets
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, products)| products.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Product])> {
        self.buckets
            .iter()
            .map(|(category, products)| (category.as_str(), products.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

fn category_of(product: &Product) -> &str {
    product
        .category
        .as_deref()
        .filter(|category| !category.is_empty())
        .unwrap_or(UNCATEGORIZED)
}

pub fn group_by_category(products: &[Product]) -> MenuCatalog {
    let mut buckets: Vec<(String, Vec<Product>)> = Vec::new();
    for product in products {
        let category = category_of(product);
        match buckets.iter_mut().find(|(name, _)| name == category) {
            Some((_, bucket)) => bucket.push(product.clone()),
            None => buckets.push((category.to_string(), vec![product.clone()])),
        }
    }
    MenuCatalog { buckets }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
