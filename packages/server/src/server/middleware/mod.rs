pub mod secret_auth;

pub use secret_auth::{secret_auth_middleware, API_KEY_HEADER};
