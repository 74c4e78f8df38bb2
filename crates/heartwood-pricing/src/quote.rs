use crate::board::{breakdown_total, price_config};
use crate::table::PriceTable;
use heartwood_types::{CartItem, Cents};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where the order ships. All parts optional; tax providers may use any of
/// them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub country: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

/// Pluggable tax computation. The default policy charges nothing;
/// jurisdiction-aware providers live outside this engine.
pub trait TaxProvider: Send + Sync {
    fn tax(&self, taxable: Cents, destination: &Destination) -> Cents;
}

/// The default "no provider" policy.
#[derive(Debug, Default)]
pub struct NoTax;

impl TaxProvider for NoTax {
    fn tax(&self, _taxable: Cents, _destination: &Destination) -> Cents {
        Cents::zero()
    }
}

/// Flat external rate, in whole percent.
#[derive(Debug)]
pub struct FlatRateTax {
    pub rate_percent: u64,
}

impl TaxProvider for FlatRateTax {
    fn tax(&self, taxable: Cents, _destination: &Destination) -> Cents {
        taxable.percent(self.rate_percent)
    }
}

/// How the order ships. Unknown wire values fall back to standard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Expedited,
}

impl ShippingMethod {
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "expedited" => ShippingMethod::Expedited,
            _ => ShippingMethod::Standard,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ShippingMethod::Standard => "standard",
            ShippingMethod::Expedited => "expedited",
        }
    }
}

/// Recognized promo codes. Discounts apply only to the subtotal+shipping
/// pool and never drive the total below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromoCode {
    /// 10% off subtotal+shipping, capped at an absolute ceiling.
    Wood10,
    /// Shipping refunded in full.
    FreeShip,
}

impl PromoCode {
    const WOOD10_PERCENT: u64 = 10;
    const WOOD10_CAP: Cents = Cents::new(5000);

    /// Case-insensitive lookup; unknown codes are simply not a promo.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "WOOD10" => Some(PromoCode::Wood10),
            "FREESHIP" => Some(PromoCode::FreeShip),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PromoCode::Wood10 => "WOOD10",
            PromoCode::FreeShip => "FREESHIP",
        }
    }

    /// Discount against the subtotal+shipping pool.
    pub fn discount(self, subtotal: Cents, shipping: Cents) -> Cents {
        let pool = subtotal.saturating_add(shipping);
        match self {
            PromoCode::Wood10 => pool.percent(Self::WOOD10_PERCENT).min(Self::WOOD10_CAP),
            PromoCode::FreeShip => shipping,
        }
        .min(pool)
    }
}

/// The base cart quote: subtotal, shipping, tax, total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartQuote {
    pub subtotal: Cents,
    pub shipping: Cents,
    pub tax: Cents,
    pub total: Cents,
}

/// A fully-layered order quote: base quote plus shipping-method surcharge
/// and promo discount. `grand_total` is the authoritative charge amount.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderQuote {
    pub currency: String,
    pub subtotal: Cents,
    pub shipping: Cents,
    pub tax: Cents,
    pub discount: Cents,
    pub grand_total: Cents,
    pub shipping_method: ShippingMethod,
    pub promo_code: Option<&'static str>,
    /// Non-fatal notes, e.g. a client-declared price that did not match the
    /// catalog recomputation.
    pub warnings: Vec<String>,
}

/// Checkout quote engine. Owns the catalog table, the currency, and the tax
/// provider; recomputes every charge from trusted data.
#[derive(Clone)]
pub struct QuoteEngine {
    table: PriceTable,
    currency: String,
    tax: Arc<dyn TaxProvider>,
}

impl QuoteEngine {
    pub fn new(table: PriceTable, currency: impl Into<String>) -> Self {
        Self {
            table,
            currency: currency.into(),
            tax: Arc::new(NoTax),
        }
    }

    pub fn with_tax_provider(mut self, provider: Arc<dyn TaxProvider>) -> Self {
        self.tax = provider;
        self
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Authoritative unit price for one cart line. Lines carrying a frozen
    /// configuration are repriced from the catalog; the client-declared
    /// price is display-only and a mismatch produces a warning. Lines
    /// without a configuration keep their declared price.
    pub fn authoritative_unit_price(&self, item: &CartItem) -> (Cents, Option<String>) {
        match &item.config {
            Some(config) => {
                let recomputed = breakdown_total(&price_config(config, &self.table));
                if recomputed != item.unit_price {
                    let warning = format!(
                        "item {}: declared unit price {} replaced with catalog price {}",
                        item.id, item.unit_price, recomputed
                    );
                    (recomputed, Some(warning))
                } else {
                    (recomputed, None)
                }
            }
            None => (item.unit_price, None),
        }
    }

    /// Base quote: subtotal, threshold shipping, provider tax.
    pub fn price_cart(&self, items: &[CartItem], destination: &Destination) -> CartQuote {
        let subtotal: Cents = items
            .iter()
            .map(|item| {
                self.authoritative_unit_price(item)
                    .0
                    .saturating_mul(u64::from(item.quantity.max(1)))
            })
            .sum();

        let shipping = if subtotal >= self.table.free_shipping_threshold {
            Cents::zero()
        } else {
            self.table.flat_shipping_fee
        };
        let tax = self.tax.tax(subtotal.saturating_add(shipping), destination);
        CartQuote {
            subtotal,
            shipping,
            tax,
            total: subtotal.saturating_add(shipping).saturating_add(tax),
        }
    }

    /// Full order quote with shipping-method surcharge and promo discount
    /// layered on top of [`Self::price_cart`].
    pub fn quote_order(
        &self,
        items: &[CartItem],
        destination: &Destination,
        method: ShippingMethod,
        promo: Option<PromoCode>,
    ) -> OrderQuote {
        let mut warnings = Vec::new();
        for item in items {
            if let (_, Some(warning)) = self.authoritative_unit_price(item) {
                warnings.push(warning);
            }
        }

        let base = self.price_cart(items, destination);
        let shipping = match method {
            ShippingMethod::Standard => base.shipping,
            ShippingMethod::Expedited => base.shipping.saturating_add(self.table.expedited_surcharge),
        };
        let discount = promo
            .map(|code| code.discount(base.subtotal, shipping))
            .unwrap_or(Cents::zero());

        let grand_total = base
            .subtotal
            .saturating_add(shipping)
            .saturating_add(base.tax)
            .saturating_sub(discount);

        OrderQuote {
            currency: self.currency.clone(),
            subtotal: base.subtotal,
            shipping,
            tax: base.tax,
            discount,
            grand_total,
            shipping_method: method,
            promo_code: promo.map(PromoCode::as_str),
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartwood_types::{BoardSize, CartConfig};

    fn engine() -> QuoteEngine {
        QuoteEngine::new(PriceTable::standard(), "usd")
    }

    fn item(price: u64, quantity: u32) -> CartItem {
        CartItem::new("brd-1", "Custom board", Cents::new(price)).with_quantity(quantity)
    }

    #[test]
    fn test_scenario_two_boards_free_shipping() {
        let quote = engine().price_cart(&[item(20000, 2)], &Destination::default());
        assert_eq!(quote.subtotal, Cents::new(40000));
        assert_eq!(quote.shipping, Cents::zero());
        assert_eq!(quote.tax, Cents::zero());
        assert_eq!(quote.total, Cents::new(40000));
    }

    #[test]
    fn test_free_shipping_threshold_boundary() {
        let at = engine().price_cart(&[item(7500, 1)], &Destination::default());
        assert_eq!(at.shipping, Cents::zero());

        let below = engine().price_cart(&[item(7499, 1)], &Destination::default());
        assert_eq!(below.shipping, Cents::new(995));
        assert_eq!(below.total, Cents::new(7499 + 995));
    }

    #[test]
    fn test_promo_percent_cap() {
        // 10% of 60000 would be 6000; the cap holds it at 5000.
        let discount = PromoCode::Wood10.discount(Cents::new(60000), Cents::zero());
        assert_eq!(discount, Cents::new(5000));

        // Under the cap the straight percentage applies.
        let discount = PromoCode::Wood10.discount(Cents::new(40000), Cents::zero());
        assert_eq!(discount, Cents::new(4000));
    }

    #[test]
    fn test_free_shipping_promo_capped_at_shipping() {
        let discount = PromoCode::FreeShip.discount(Cents::new(5000), Cents::new(995));
        assert_eq!(discount, Cents::new(995));
        let discount = PromoCode::FreeShip.discount(Cents::new(10000), Cents::zero());
        assert_eq!(discount, Cents::zero());
    }

    #[test]
    fn test_quote_order_expedited_surcharge() {
        let quote = engine().quote_order(
            &[item(20000, 1)],
            &Destination::default(),
            ShippingMethod::Expedited,
            None,
        );
        // Over the free-shipping threshold, so shipping is surcharge only.
        assert_eq!(quote.shipping, Cents::new(1500));
        assert_eq!(quote.grand_total, Cents::new(21500));
    }

    #[test]
    fn test_quote_order_with_promo() {
        let quote = engine().quote_order(
            &[item(60000, 1)],
            &Destination::default(),
            ShippingMethod::Standard,
            Some(PromoCode::Wood10),
        );
        assert_eq!(quote.discount, Cents::new(5000));
        assert_eq!(quote.grand_total, Cents::new(55000));
        assert_eq!(quote.promo_code, Some("WOOD10"));
    }

    #[test]
    fn test_discount_never_negative_total() {
        let quote = engine().quote_order(
            &[],
            &Destination::default(),
            ShippingMethod::Standard,
            Some(PromoCode::Wood10),
        );
        // Empty cart: flat shipping applies, discount is 10% of it.
        assert_eq!(quote.subtotal, Cents::zero());
        assert_eq!(quote.shipping, Cents::new(995));
        assert_eq!(quote.discount, Cents::new(99));
        assert_eq!(quote.grand_total, Cents::new(896));
    }

    #[test]
    fn test_flat_rate_tax() {
        let engine = engine().with_tax_provider(Arc::new(FlatRateTax { rate_percent: 8 }));
        let quote = engine.price_cart(&[item(10000, 1)], &Destination::default());
        assert_eq!(quote.tax, Cents::new(800));
        assert_eq!(quote.total, Cents::new(10800));
    }

    #[test]
    fn test_config_lines_are_repriced() {
        let mut config = CartConfig {
            size: BoardSize::Small,
            ..CartConfig::default()
        };
        config.board_data.strips[0][0] = Some("maple".to_string());
        // Client claims the board costs a dollar.
        let line = CartItem::new("brd-1", "Custom board", Cents::new(100)).with_config(config);

        let quote = engine().quote_order(
            &[line],
            &Destination::default(),
            ShippingMethod::Standard,
            None,
        );
        // base 15000 + one cell at 100.
        assert_eq!(quote.subtotal, Cents::new(15100));
        assert_eq!(quote.warnings.len(), 1);
        assert!(quote.warnings[0].contains("brd-1"));
    }

    #[test]
    fn test_promo_parse() {
        assert_eq!(PromoCode::parse(" wood10 "), Some(PromoCode::Wood10));
        assert_eq!(PromoCode::parse("FREESHIP"), Some(PromoCode::FreeShip));
        assert_eq!(PromoCode::parse("BOGUS"), None);
    }
}
