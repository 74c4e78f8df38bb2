use heartwood_types::{BoardSize, Cents, HandleStyle};
use serde::{Deserialize, Serialize};

/// Catalog price table, all values in integer cents.
///
/// Injected into every pricing call so tests can run against synthetic
/// catalogs; the standard table below is the storefront's.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    pub base_small: Cents,
    pub base_regular: Cents,
    pub base_large: Cents,
    /// Charged once per painted cell on an active strip.
    pub cell_rate: Cents,

    pub groove_fee: Cents,
    pub brass_feet_fee: Cents,
    pub strip3_fee: Cents,
    pub handle_glide_fee: Cents,
    pub handle_lift_fee: Cents,

    pub free_shipping_threshold: Cents,
    pub flat_shipping_fee: Cents,
    pub expedited_surcharge: Cents,
}

impl PriceTable {
    pub fn standard() -> Self {
        Self {
            base_small: Cents::new(15000),
            base_regular: Cents::new(22000),
            base_large: Cents::new(30000),
            cell_rate: Cents::new(100),

            groove_fee: Cents::new(1500),
            brass_feet_fee: Cents::new(2400),
            strip3_fee: Cents::new(2000),
            handle_glide_fee: Cents::new(1200),
            handle_lift_fee: Cents::new(1800),

            free_shipping_threshold: Cents::new(7500),
            flat_shipping_fee: Cents::new(995),
            expedited_surcharge: Cents::new(1500),
        }
    }

    pub fn base_price(&self, size: BoardSize) -> Cents {
        match size {
            BoardSize::Small => self.base_small,
            BoardSize::Regular => self.base_regular,
            BoardSize::Large => self.base_large,
        }
    }

    pub fn handle_fee(&self, style: HandleStyle) -> Cents {
        match style {
            HandleStyle::None => Cents::zero(),
            HandleStyle::Glide => self.handle_glide_fee,
            HandleStyle::Lift => self.handle_lift_fee,
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::standard()
    }
}
