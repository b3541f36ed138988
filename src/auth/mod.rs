pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::AuthenticatedUser;
pub use jwt::{create_token, verify_token, Claims};
pub use password::{hash_password, verify_password};
