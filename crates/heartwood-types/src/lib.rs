//! Heartwood core data model.
//!
//! This crate defines the shared vocabulary of the storefront core:
//! - board geometry and layout (strips, row order, extras)
//! - frozen cart-line snapshots and their price breakdowns
//! - persisted order records and the derived order summary
//! - integer-cents money
//!
//! Design stance:
//! - Monetary values are non-negative integer minor units, never floats.
//! - A `CartConfig` is immutable once frozen at add-to-cart; only the
//!   originating `BoardLayout` inside the editor is mutable.
//! - The wood-token catalog is an explicitly injected registry, not a
//!   module-level singleton.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod board;
mod cart;
mod money;
mod order;
mod registry;

pub use board::{
    BoardExtras, BoardLayout, BoardSize, EdgeProfile, RowOrder, WoodCell, STRIP_COUNT,
};
pub use cart::{CartBreakdown, CartConfig, CartItem, ExtrasLine, HandleStyle};
pub use money::Cents;
pub use order::{CaptureMethod, OrderId, OrderRecord, OrderSummary, SummaryItem};
pub use registry::WoodRegistry;
