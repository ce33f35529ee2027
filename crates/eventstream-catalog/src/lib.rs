//! # eventstream-catalog
//!
//! Browse-side data for the EventStream platform: the events and categories
//! rendered on the home page. Pure read models - tickets are not sold
//! through this crate, and nothing here mutates after construction.

mod catalog;
mod model;

pub use catalog::{CategoryCatalog, EventCatalog};
pub use model::{Category, CategoryId, Event, EventId};
