//! End-to-end cart -> breakdown -> order draft flow through public APIs.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use boutique_core::pricing::{self, items_until_free_shipping};
use boutique_core::{
    Cart, CartError, CartLine, Money, OrderDraft, PricingBreakdown, ProductId, Quantity, SellerId,
};
use rust_decimal::Decimal;

fn line(product: i32, seller: i32, price: i64, qty: u32, size: Option<&str>) -> CartLine {
    CartLine::new(
        ProductId::new(product),
        SellerId::new(seller),
        format!("Product {product}"),
        size.map(String::from),
        Money::new(Decimal::from(price)),
        Quantity::new(qty).unwrap(),
    )
    .unwrap()
}

fn commission() -> Decimal {
    Decimal::new(10, 2)
}

#[test]
fn shopper_crosses_free_shipping_threshold() {
    let mut cart = Cart::new();
    let shirt = cart.add(line(1, 1, 1200, 1, Some("M"))).unwrap();

    let one = PricingBreakdown::for_cart(&cart);
    assert_eq!(one.shipping_cost, Decimal::from(300));
    assert_eq!(one.total, Decimal::from(1770));
    assert_eq!(items_until_free_shipping(cart.item_count()), 2);

    // Same product and size merges into the existing line.
    let again = cart.add(line(1, 1, 1200, 1, Some("M"))).unwrap();
    assert_eq!(again, shirt);
    assert_eq!(cart.lines().len(), 1);

    cart.add(line(2, 2, 600, 1, None)).unwrap();
    let three = PricingBreakdown::for_cart(&cart);
    assert_eq!(three.subtotal, Decimal::from(3000));
    assert_eq!(three.shipping_cost, Decimal::ZERO);
    assert_eq!(three.tax, Decimal::from(540));
    assert_eq!(three.total, Decimal::from(3540));
    assert_eq!(items_until_free_shipping(cart.item_count()), 0);

    // Dropping back to two items brings the flat fee and its VAT back.
    cart.set_quantity(shirt, 1).unwrap();
    let two = PricingBreakdown::for_cart(&cart);
    assert_eq!(
        two.total - pricing::compute_breakdown(two.subtotal, 3).total,
        Decimal::from(354)
    );
}

#[test]
fn order_draft_matches_cart_view() {
    let mut cart = Cart::new();
    cart.add(line(1, 1, 1200, 2, Some("S"))).unwrap();
    cart.add(line(2, 2, 600, 1, None)).unwrap();
    let shown = PricingBreakdown::for_cart(&cart);

    let draft = OrderDraft::from_cart(&cart, commission()).unwrap();
    assert_eq!(draft.breakdown, shown);
    assert_eq!(
        draft.breakdown.total,
        draft.breakdown.subtotal + draft.breakdown.shipping_cost + draft.breakdown.tax
    );

    let item_sum: Decimal = draft.items.iter().map(|i| i.line_total.amount()).sum();
    assert_eq!(item_sum, draft.breakdown.subtotal);

    let sellers = draft.seller_totals();
    assert_eq!(sellers.len(), 2);
    assert_eq!(sellers[0].gross, Money::new(Decimal::from(2400)));
    assert_eq!(sellers[0].commission, Money::new(Decimal::from(240)));
    assert_eq!(sellers[1].payout(), Money::new(Decimal::from(540)));
}

#[test]
fn removing_every_line_empties_the_cart() {
    let mut cart = Cart::new();
    let a = cart.add(line(1, 1, 100, 1, None)).unwrap();
    let b = cart.add(line(2, 1, 200, 1, None)).unwrap();

    cart.remove(a).unwrap();
    cart.set_quantity(b, 0).unwrap();

    assert!(cart.is_empty());
    assert_eq!(cart.remove(a), Err(CartError::LineNotFound(a)));
    assert!(OrderDraft::from_cart(&cart, commission()).is_err());
}

#[test]
fn cart_survives_session_serialization() {
    let mut cart = Cart::new();
    cart.add(line(7, 3, 100, 1, None)).unwrap();
    let stored = serde_json::to_value(&cart).unwrap();
    let restored: Cart = serde_json::from_value(stored).unwrap();
    assert_eq!(
        PricingBreakdown::for_cart(&restored),
        PricingBreakdown::for_cart(&cart)
    );
    assert_eq!(PricingBreakdown::for_cart(&restored).total, Decimal::from(472));
}
