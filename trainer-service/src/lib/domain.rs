pub mod food;
pub mod training;
pub mod user;
