//! Authentication: argon2 password hashing, JWT issuing and
//! verification, and the bearer-token middleware.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{create_token, Claims};
pub use middleware::{auth_middleware, AuthUser};
