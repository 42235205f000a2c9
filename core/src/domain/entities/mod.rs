//! Domain entities representing core business objects.

pub mod project;
pub mod token;
pub mod user;

pub use project::{Project, ProjectStatus};
pub use token::{Authenticated, Claims, TokenKind, TokenPair};
pub use user::User;
