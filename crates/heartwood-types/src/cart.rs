//! Frozen cart-line snapshots.
//!
//! A `CartConfig` is captured at add-to-cart and is immutable from then on.
//! These types cross two untrusted hops (client storage, HTTP body) as JSON;
//! the field names use camelCase on the wire.

use crate::board::{BoardExtras, BoardLayout, BoardSize};
use crate::money::Cents;
use serde::{Deserialize, Serialize};

/// Handle carved into the board edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleStyle {
    #[default]
    None,
    Glide,
    Lift,
}

impl HandleStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(HandleStyle::None),
            "glide" => Some(HandleStyle::Glide),
            "lift" => Some(HandleStyle::Lift),
            _ => None,
        }
    }
}

/// The full product configuration frozen into a cart line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartConfig {
    pub size: BoardSize,
    #[serde(default)]
    pub strip3_enabled: bool,
    pub board_data: BoardLayout,
    #[serde(default)]
    pub extras: BoardExtras,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_option: Option<String>,
    #[serde(default)]
    pub handle_style: HandleStyle,
    #[serde(default)]
    pub brass_feet: bool,
}

/// One labelled line inside a price breakdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrasLine {
    pub label: String,
    pub amount_cents: Cents,
}

impl ExtrasLine {
    pub fn new(label: impl Into<String>, amount_cents: Cents) -> Self {
        Self {
            label: label.into(),
            amount_cents,
        }
    }
}

/// Display-quality price breakdown attached to a cart line.
///
/// Never authoritative for what is charged; the quote engine recomputes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartBreakdown {
    pub base_cents: Cents,
    pub variable_cents: Cents,
    pub extras_cents: Cents,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras_detail: Vec<ExtrasLine>,
}

/// One line in the cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub unit_price: Cents,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<CartBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<CartConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Cents) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity: 1,
            breakdown: None,
            config: None,
            image: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    pub fn with_config(mut self, config: CartConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_breakdown(mut self, breakdown: CartBreakdown) -> Self {
        self.breakdown = Some(breakdown);
        self
    }

    /// `unit_price × quantity`, saturating.
    pub fn line_total(&self) -> Cents {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = CartItem::new("brd-1", "Custom board", Cents::new(20000)).with_quantity(2);
        assert_eq!(item.line_total(), Cents::new(40000));
    }

    #[test]
    fn test_quantity_floor() {
        let item = CartItem::new("brd-1", "Custom board", Cents::new(100)).with_quantity(0);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_wire_field_names() {
        let item = CartItem::new("brd-1", "Board", Cents::new(150));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["unitPrice"], 150);
        assert!(json.get("unit_price").is_none());
    }
}
