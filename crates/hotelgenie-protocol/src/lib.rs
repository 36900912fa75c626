//! Shared vocabulary for HotelGenie.
//!
//! Every other crate in the workspace speaks in terms of the types defined
//! here:
//!
//! - **Types** ([`Credential`], [`Role`], [`Route`], request/response
//!   bodies) for the values that cross the REST boundary or get persisted.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) for turning those values
//!   into bytes and back.
//! - **Claims** ([`decode_claims`]) for reading the unverified payload of a
//!   bearer credential.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! Navigation (hotelgenie-nav)    ← reads Role and Route
//!     ↕
//! Session (hotelgenie-session)   ← owns Credential and Role
//!     ↕
//! Transport (hotelgenie-transport) ← ships the wire bodies
//!     ↕
//! Protocol (this crate)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod claims;
mod codec;
mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use claims::{Claims, decode_claims};
pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{
    Credential, ErrorBody, LoginRequest, LoginResponse, RegisterRequest, Role,
    Route, ValidateResponse,
};
