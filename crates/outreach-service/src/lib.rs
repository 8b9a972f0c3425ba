//! Service layer: credential hashing and the fixture bulk loader.

pub mod auth;
pub mod error;
pub mod loader;
