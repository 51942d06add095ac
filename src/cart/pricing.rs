// Line-item quantity and total arithmetic, kept pure for testability

use rust_decimal::Decimal;

use crate::cart::models::CartItem;

/// Total for a single line item
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Total across all line items in a cart
pub fn cart_total(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .map(|item| line_total(item.unit_price, item.quantity))
        .sum()
}

/// Quantity after reducing a line item by one.
/// Returns None when the line item should be removed (quantity would hit 0);
/// a stored quantity is never below 1.
pub fn reduce_quantity(quantity: i32) -> Option<i32> {
    if quantity <= 1 {
        None
    } else {
        Some(quantity - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(product_id: i32, quantity: i32, unit_price: Decimal) -> CartItem {
        CartItem {
            id: product_id,
            cart_id: 1,
            product_id,
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_line_total_multiplies_price_by_quantity() {
        assert_eq!(line_total(dec!(2.50), 3), dec!(7.50));
        assert_eq!(line_total(dec!(10), 1), dec!(10));
    }

    #[test]
    fn test_cart_total_sums_line_totals() {
        let items = vec![item(1, 2, dec!(3.00)), item(2, 1, dec!(4.50))];
        assert_eq!(cart_total(&items), dec!(10.50));
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        assert_eq!(cart_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_reduce_decrements_quantity() {
        assert_eq!(reduce_quantity(3), Some(2));
        assert_eq!(reduce_quantity(2), Some(1));
    }

    #[test]
    fn test_reduce_to_zero_removes_the_item() {
        assert_eq!(reduce_quantity(1), None);
    }
}
