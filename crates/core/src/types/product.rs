//! Product records and field-wise patches.
//!
//! A [`Product`] always carries its price in the display currency: the
//! catalog engine converts the remote source-currency figure exactly once,
//! when a record first enters the system. Code holding a `Product` can rely
//! on `price` never being a raw source-currency value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A catalog product as stored in the local mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier assigned by the remote source.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Price in the display currency (converted, 2 decimal places).
    pub price: Decimal,
    /// Long-form description.
    pub description: String,
    /// Category name.
    pub category: String,
    /// Image URI.
    pub image: String,
    /// Aggregate customer rating.
    pub rating: Rating,
}

/// Aggregate rating for a product.
///
/// `rate` is a mean score in `[0, 5]`; `count` is the number of reviews.
/// Both are owned by the remote source and never locally mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: Decimal,
    pub count: u32,
}

/// Field-wise overwrite set for updating a [`Product`].
///
/// Every field is optional; [`ProductPatch::apply`] overwrites only the
/// fields that are set, leaving the rest of the product untouched. The
/// rating is remote-owned and deliberately not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl ProductPatch {
    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.image.is_none()
    }

    /// Merge the set fields into `product`, overwriting field-wise.
    pub fn apply(&self, product: &mut Product) {
        if let Some(title) = &self.title {
            product.title.clone_from(title);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(description) = &self.description {
            product.description.clone_from(description);
        }
        if let Some(category) = &self.category {
            product.category.clone_from(category);
        }
        if let Some(image) = &self.image {
            product.image.clone_from(image);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Backpack".to_string(),
            price: Decimal::new(9_182_83, 2),
            description: "Fits 15in laptops".to_string(),
            category: "men's clothing".to_string(),
            image: "https://example.com/backpack.jpg".to_string(),
            rating: Rating {
                rate: Decimal::new(39, 1),
                count: 120,
            },
        }
    }

    #[test]
    fn test_patch_overwrites_only_set_fields() {
        let mut product = sample_product();
        let patch = ProductPatch {
            title: Some("Travel Backpack".to_string()),
            price: Some(Decimal::new(10_000, 2)),
            ..ProductPatch::default()
        };

        patch.apply(&mut product);

        assert_eq!(product.title, "Travel Backpack");
        assert_eq!(product.price, Decimal::new(10_000, 2));
        // Untouched fields keep their prior values
        assert_eq!(product.description, "Fits 15in laptops");
        assert_eq!(product.category, "men's clothing");
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let mut product = sample_product();
        let before = product.clone();
        let patch = ProductPatch::default();

        assert!(patch.is_empty());
        patch.apply(&mut product);
        assert_eq!(product, before);
    }

    #[test]
    fn test_product_round_trips_through_json() {
        let product = sample_product();
        let json = serde_json::to_string(&product).expect("serialize");
        let back: Product = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, product);
    }
}
