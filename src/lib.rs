#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod model;

pub use config::Config;

/// Assemble the server: configuration, database, logging, and routes.
/// Fairings run at ignition, so a bad config or unreachable database
/// aborts launch rather than failing on the first request.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .attach(config::ConfigFairing)
        .attach(config::DatabaseFairing)
        .attach(logging::LoggerFairing)
        .mount("/", api::routes())
}
