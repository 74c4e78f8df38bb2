//! Sanitizing boundary between untrusted JSON and validated cart types.
//!
//! Cart lines cross two untrusted hops: client-side storage (anyone can edit
//! it) and the HTTP body of the payment-intent request (a hostile client can
//! submit arbitrary JSON). Every function here is total: malformed input
//! degrades to a safe default and never raises, because a bad payload must
//! never crash a money-moving code path.
//!
//! The numbers produced here are display-quality only. The quote engine
//! recomputes the authoritative charge from the catalog price table.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod sanitize;

pub use sanitize::{
    coerce_items, sanitize_board_extras, sanitize_board_layout, sanitize_breakdown,
    sanitize_cart_config,
};
