mod claims;
pub(crate) mod extractors;
pub mod jwt;
pub mod remote;
pub mod services;

pub use extractors::AuthUser;
pub use services::{Identity, IdentityProvider};
