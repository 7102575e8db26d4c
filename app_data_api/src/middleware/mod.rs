mod auth_middleware;
mod authenticator;

pub use auth_middleware::AuthMiddleware;
pub use authenticator::{Authenticator, DummyAuthenticator, GatewayAuthenticator, build_authenticator};
