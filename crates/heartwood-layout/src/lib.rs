//! Board layout mutation engine.
//!
//! A [`BoardEditor`] owns the single mutable `BoardLayout` in the system.
//! Every mutating operation is atomic (fully applied or a no-op) and
//! individually undoable; undo restores the prior state bit for bit.
//!
//! History is kept as full-state snapshots. Grids are at most 3×14 cells,
//! so deep clones stay cheap; a command log would only pay off for much
//! larger boards.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod editor;

pub use editor::{BoardEditor, EditorSnapshot};
