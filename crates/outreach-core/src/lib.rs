//! Core types for the outreach backend: configuration and base errors.

pub mod config;
pub mod error;
