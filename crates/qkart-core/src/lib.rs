//! Domain types, configuration and session persistence shared by the QKart
//! storefront crates.

pub mod app_config;
pub mod cart;
pub mod config;
pub mod products;
pub mod session;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use cart::{
    apply_quantity, cart_total, generate_cart_items, is_in_cart, merge_server_lines,
    total_quantity, CartEntry, CartLine, DisplayCartItem, Reconciled,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{Product, ProductDetails};
pub use session::{Session, SessionStore};

/// Every setting has a default, so only present-but-invalid values fail.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised while reading or writing the persisted session file.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
