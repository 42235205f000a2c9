pub mod project;
pub mod user;

pub use project::{InMemoryProjectRepository, ProjectRepository};
pub use user::{InMemoryUserRepository, UserRepository};
