//! Compliance backend client
//!
//! Thin typed wrappers over the backend's JSON endpoints. Session tokens come
//! from a [`CredentialStore`]; no state lives in globals.

pub mod assessments;
pub mod auth;
pub mod client;
pub mod credentials;
pub mod models;
pub mod organizations;

#[cfg(test)]
pub(crate) mod mock;

pub use assessments::completion_percent;
pub use client::{status_error, ApiClient};
pub use credentials::{CredentialStore, FileCredentials, MemoryCredentials};
pub use models::{Answer, NewAnswer, Organization, Question, User};
pub use organizations::normalize_org_number;
