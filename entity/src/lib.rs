//! SeaORM entities for the transit document store.

pub mod prelude;

pub mod document;
