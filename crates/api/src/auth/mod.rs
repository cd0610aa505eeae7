// Authentication and authorization
//
// Stateless bearer tokens (jwt), per-request identity (identity, session),
// ownership checks (guard) and the register/login flows (service, routes).

pub mod config;
pub mod guard;
pub mod identity;
pub mod jwt;
pub mod routes;
pub mod service;
pub mod session;

pub use config::{AuthConfig, JwtConfig};
pub use identity::IdentityResolver;
pub use jwt::TokenService;
pub use service::AuthService;
pub use session::{AuthState, AuthUser, SessionContext};
