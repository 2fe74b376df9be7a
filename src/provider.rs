//! Provider-facing settings (data), configuration (wired components), and strategies (behavior).
//!
//! `settings` holds the serde-loadable description of a provider: endpoints, token-endpoint
//! verbs, signature placement, protocol version, and callback knobs. `config` combines those
//! settings with the extractor, signature, and timestamp components into an immutable
//! [`ProviderConfig`]. `strategy` defines [`ProviderStrategy`], the hook used to build the user
//! authorization URL and decorate token-endpoint requests.

pub mod config;
pub mod settings;
pub mod strategy;

pub use config::*;
pub use settings::*;
pub use strategy::*;
