//! Source-to-display currency conversion.
//!
//! The remote product API quotes prices in its own currency; the catalog
//! displays them in the target currency using a fixed multiplier. Conversion
//! happens exactly once per product lifetime - at the point a raw record
//! enters the system - and the source figure never reappears afterwards.
//! Mirror contents are always already converted, so nothing that reads from
//! the mirror may call [`normalize`] again. There is no runtime marker
//! distinguishing converted from raw prices; this is a caller contract.

use rust_decimal::{Decimal, RoundingStrategy};
use shopwindow_core::{Product, Rating};

use crate::remote::RawProduct;

/// Default source-to-display exchange rate (USD to INR).
pub const DEFAULT_EXCHANGE_RATE: Decimal = Decimal::from_parts(835, 0, 0, false, 1);

/// Convert a raw remote record into a display-currency [`Product`].
///
/// The price is multiplied by `rate` and rounded to 2 decimal places with
/// midpoint-away-from-zero rounding. Pure and total: no side effects, no
/// failure mode.
#[must_use]
pub fn normalize(raw: RawProduct, rate: Decimal) -> Product {
    Product {
        id: raw.id,
        title: raw.title,
        price: convert_price(raw.price, rate),
        description: raw.description,
        category: raw.category,
        image: raw.image,
        rating: Rating {
            rate: raw.rating.rate,
            count: raw.rating.count,
        },
    }
}

/// Convert a single source-currency price to the display currency.
#[must_use]
pub fn convert_price(price: Decimal, rate: Decimal) -> Decimal {
    (price * rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::RawRating;
    use shopwindow_core::ProductId;

    fn raw(price: Decimal) -> RawProduct {
        RawProduct {
            id: ProductId::new(7),
            title: "Hard Drive".to_string(),
            price,
            description: "2TB external".to_string(),
            category: "electronics".to_string(),
            image: "https://example.com/drive.jpg".to_string(),
            rating: RawRating {
                rate: Decimal::new(45, 1),
                count: 89,
            },
        }
    }

    #[test]
    fn test_convert_price_multiplies_and_rounds() {
        // 10.00 * 83.5 = 835.00
        assert_eq!(
            convert_price(Decimal::new(1_000, 2), DEFAULT_EXCHANGE_RATE),
            Decimal::new(83_500, 2)
        );
        // 109.95 * 83.5 = 9180.825 -> 9180.83 (half away from zero)
        assert_eq!(
            convert_price(Decimal::new(10_995, 2), DEFAULT_EXCHANGE_RATE),
            Decimal::new(918_083, 2)
        );
    }

    #[test]
    fn test_convert_price_zero() {
        assert_eq!(
            convert_price(Decimal::ZERO, DEFAULT_EXCHANGE_RATE),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_normalize_converts_price_and_keeps_other_fields() {
        let product = normalize(raw(Decimal::new(1_000, 2)), DEFAULT_EXCHANGE_RATE);

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.price, Decimal::new(83_500, 2));
        assert_eq!(product.title, "Hard Drive");
        assert_eq!(product.category, "electronics");
        assert_eq!(product.rating.rate, Decimal::new(45, 1));
        assert_eq!(product.rating.count, 89);
    }

    #[test]
    fn test_converted_price_is_stable_under_display() {
        // Displaying the same converted value repeatedly never changes it;
        // only a second *application* of the rate would (and is forbidden).
        let once = convert_price(Decimal::new(1_999, 2), DEFAULT_EXCHANGE_RATE);
        assert_eq!(once.round_dp(2), once);
        assert_eq!(once.to_string(), once.to_string());
    }
}
