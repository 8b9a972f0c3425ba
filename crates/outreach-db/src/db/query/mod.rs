//! Typed query modules, one per entity collection.
//!
//! Handlers and the bulk loader go through these functions instead of
//! issuing diesel queries inline; each function maps one store operation.

pub mod campaign;
pub mod company;
pub mod contact;
pub mod email;
pub mod user;
