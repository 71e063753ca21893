pub mod client;
pub mod guard;
pub mod validator;

pub use client::AuthServiceClient;
pub use guard::AuthGuard;
