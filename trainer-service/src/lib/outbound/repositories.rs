pub mod food;
pub mod training;
pub mod user;

pub use food::PostgresFoodRepository;
pub use training::PostgresTrainingRepository;
pub use user::PostgresUserRepository;
