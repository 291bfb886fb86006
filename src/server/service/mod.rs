//! Service layer for business logic and orchestration.
//!
//! Services sit between controllers and the stores: identity tokens and the session cookie
//! they back, the page cache, the landing and dashboard views, and the mutation gateway the
//! admin dashboard writes through.

pub mod cache;
pub mod identity;
pub mod mutation;
pub mod session;
pub mod view;
