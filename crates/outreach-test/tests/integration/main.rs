//! Integration tests for the outreach HTTP API and the fixture loader.
//!
//! Each test creates its own database; see `helpers::TestDb`.

mod helpers;

mod admin;
mod campaigns;
mod contacts;
mod loader;
mod users;
