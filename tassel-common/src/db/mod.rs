//! Database layer: initialization, models, and store operations

pub mod init;
pub mod models;
pub mod ratings;
pub mod recommendations;
pub mod settings;
pub mod students;
pub mod users;

pub use init::init_database;
