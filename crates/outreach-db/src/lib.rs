//! Persistent store adapter for the outreach backend.
//!
//! Wraps the Postgres connection pool and exposes one typed query module
//! per entity collection (`users`, `companies`, `contacts`, `campaigns`,
//! `emails`).

pub mod db;
pub mod error;
pub mod model;
