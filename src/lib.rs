//! Back-office client for the PetZone pet-shop API.
//!
//! Screens for pets, pet types, stock, users and vlogs sit on top of
//! [`application::services::EntityWorkflow`], which talks to the REST API
//! through the ports in [`domain::ports`]. Creating a pet or vlog uploads its
//! image in a second request and deletes the new record again if that upload
//! fails.

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::screens::*;
pub use application::services::*;
pub use config::*;
pub use domain::entities::*;
pub use domain::errors::*;
