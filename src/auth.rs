//! Credential value objects (consumer, tokens, provider identifiers) and the per-conversation
//! [`OAuthSession`].

pub mod consumer;
pub mod id;
pub mod session;
pub mod token;

pub use consumer::*;
pub use id::*;
pub use session::*;
pub use token::{secret::*, *};
