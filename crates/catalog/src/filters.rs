//! In-memory search and category filtering over a product collection.
//!
//! Pure functions operating on an already-loaded collection; the catalog
//! never filters remotely.

use shopwindow_core::Product;

/// Distinct category names in first-seen order.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = Vec::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

/// Filter by case-insensitive title substring and optional exact category.
///
/// An empty `query` matches every title; `category: None` matches every
/// category.
#[must_use]
pub fn filter<'a>(
    products: &'a [Product],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| {
            let matches_search = product.title.to_lowercase().contains(&needle);
            let matches_category = category.is_none_or(|c| product.category == c);
            matches_search && matches_category
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shopwindow_core::{ProductId, Rating};

    fn product(id: u64, title: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Decimal::new(10_000, 2),
            description: String::new(),
            category: category.to_string(),
            image: String::new(),
            rating: Rating {
                rate: Decimal::new(40, 1),
                count: 1,
            },
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "Fjallraven Backpack", "men's clothing"),
            product(2, "Cotton Shirt", "men's clothing"),
            product(3, "Hard Drive", "electronics"),
        ]
    }

    #[test]
    fn test_categories_first_seen_order_deduped() {
        assert_eq!(
            categories(&sample()),
            vec!["men's clothing".to_string(), "electronics".to_string()]
        );
    }

    #[test]
    fn test_filter_title_is_case_insensitive() {
        let products = sample();
        let hits = filter(&products, "bACKpack", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, ProductId::new(1));
    }

    #[test]
    fn test_filter_combines_query_and_category() {
        let products = sample();
        assert_eq!(filter(&products, "", Some("men's clothing")).len(), 2);
        assert_eq!(filter(&products, "shirt", Some("men's clothing")).len(), 1);
        assert!(filter(&products, "shirt", Some("electronics")).is_empty());
    }

    #[test]
    fn test_empty_query_and_no_category_matches_all() {
        let products = sample();
        assert_eq!(filter(&products, "", None).len(), 3);
    }
}
