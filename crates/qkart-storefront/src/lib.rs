//! Storefront state and behaviour: catalog loading with debounced search,
//! cart reconciliation, session lifecycle, and the text view layer.
//!
//! All state is owned by a single [`Storefront`]; background work (the
//! debounce timer and in-flight searches) reports back over channels and is
//! applied by the owner.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod debounce;
pub mod notify;
pub mod storefront;
pub mod view;

pub use auth::Authenticator;
pub use cart::{CartIntent, CartReconciler};
pub use catalog::{CatalogEvent, CatalogLoader, SearchOutcome};
pub use debounce::Debouncer;
pub use notify::{Notification, Notifier, Severity};
pub use storefront::{Storefront, UserAction};
