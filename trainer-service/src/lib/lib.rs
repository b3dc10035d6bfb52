pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::food;
pub use domain::training;
pub use domain::user;
pub use outbound::repositories;
