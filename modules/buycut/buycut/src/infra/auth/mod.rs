pub mod jwt;
pub mod password;

pub use jwt::JwtTokens;
pub use password::BcryptHasher;
