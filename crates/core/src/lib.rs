//! Domain logic for the clubsite page builder.
//!
//! Everything in this crate is pure: no database access and no I/O, so the
//! repository layer, the HTTP handlers and the tests can all share it.

pub mod assembly;
pub mod blocks;
mod choice;
pub mod error;
pub mod menu;
pub mod page;
pub mod slug;
pub mod style;
pub mod types;
