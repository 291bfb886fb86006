//! Data access layer repositories.
//!
//! Repositories are thin SeaORM wrappers; access rules, sentinel resolution and change
//! notifications live one level up in the document store.

pub mod document;
