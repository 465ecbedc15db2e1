//! # Civic Security
//!
//! Admin session tokens, credential verification, password hashing and the
//! clock the freshness checks run against.

pub mod clock;
pub mod credentials;
pub mod jwt;
pub mod password;
pub mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{CredentialVerifier, HashedCredentials, StaticCredentials};
pub use jwt::{JwtError, SessionClaims, TokenCodec};
pub use password::PasswordService;
pub use session::{IssuedSession, SessionService};
