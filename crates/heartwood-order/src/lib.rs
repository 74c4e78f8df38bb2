//! Order draft persistence and summary reconstruction.
//!
//! This crate defines the storage contract for draft orders:
//! - a draft record written at payment-intent creation time
//! - two notification timestamps, the only fields mutable after the write
//! - a drift-tolerant reconstruction of a human-readable summary from
//!   whatever was actually stored
//!
//! Design stance:
//! - Postgres is the transactional source of truth; the in-memory adapter
//!   is deterministic and test-friendly.
//! - Reconstruction never trusts the stored shape. Older schema versions
//!   may have written anything; every field degrades to a safe default.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod error;
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
mod summary;
mod traits;

pub use error::{OrderStoreError, OrderStoreResult};
pub use summary::{address_lines, build_order_summary, format_money};
pub use traits::{DraftOrder, NotifiedFlags, OrderStore};
