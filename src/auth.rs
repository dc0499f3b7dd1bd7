//! App identity, credentials, token claims, and the signing seam.

pub mod claims;
pub mod id;
pub mod key;
pub mod secret;
pub mod signer;

pub use claims::*;
pub use id::*;
pub use key::*;
pub use secret::*;
pub use signer::*;
