//! Pricing: the single computation path for board prices and cart quotes.
//!
//! `board_price` is pure and shared by the interactive preview and the
//! authoritative checkout charge; any divergence between the two call sites
//! is a correctness bug. The quote engine recomputes monetary totals from
//! the catalog price table and treats client-declared unit prices as
//! display-only.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod board;
mod quote;
mod table;

pub use board::{board_price, extras_fees, price_config, BoardPrice};
pub use quote::{
    CartQuote, Destination, FlatRateTax, NoTax, OrderQuote, PromoCode, QuoteEngine, ShippingMethod,
    TaxProvider,
};
pub use table::PriceTable;
