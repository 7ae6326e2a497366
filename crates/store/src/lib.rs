//! File-backed stores for the quill CMS: documents in one flat directory
//! plus a TOML credential artifact of username -> password digest.

mod credentials;
mod documents;
mod error;

pub use credentials::{digest, CredentialStore};
pub use documents::DocumentStore;
pub use error::{Result, StoreError};
