//! Identity provider adapters verifying bearer ID tokens.

mod dto;
mod http_provider;

pub use http_provider::{IdentityToolkitConfig, IdentityToolkitProvider};
