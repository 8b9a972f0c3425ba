//! Sales outreach backend - integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach every
//! layer through `outreach_test::` paths.

#![allow(ambiguous_glob_reexports)]

pub mod component {
    pub use outreach_core::*;
    pub use outreach_service::*;

    pub mod db {
        pub use outreach_db::db::*;

        pub mod connection {
            pub use outreach_app::db_handler::DbProviderHandler;
            pub use outreach_db::db::connection::*;
        }
    }

    pub mod model {
        pub use outreach_db::model::*;
    }

    pub mod config {
        pub use outreach_app::config::ConfigHandler;
        pub use outreach_core::config::*;
    }
}

pub mod app {
    pub use outreach_app::*;

    pub mod api {
        pub use outreach_app::app::api::*;
    }
}
