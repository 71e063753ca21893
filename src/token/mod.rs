pub mod claims;
pub mod engine;

pub use claims::{Claims, TokenKind, TokenPayload};
pub use engine::{TokenEngine, TokenVerdict};
