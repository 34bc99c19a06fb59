//! HTTP API handlers for tassel-ui

pub mod auth;
pub mod courses;
pub mod health;
pub mod popular;
pub mod ratings;
pub mod recommendations;
pub mod students;

pub use auth::auth_routes;
pub use courses::course_routes;
pub use health::health_routes;
pub use popular::popular_routes;
pub use ratings::rating_routes;
pub use recommendations::recommendation_routes;
pub use students::student_routes;
