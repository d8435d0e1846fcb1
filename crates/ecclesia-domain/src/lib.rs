//! Domain types shared across Ecclesia crates: identifiers, roles and the
//! capabilities roles grant. No framework dependencies.

pub mod capability;
pub mod id;
pub mod user;
