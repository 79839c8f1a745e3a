//! The products page: owns the session, catalog and cart, routes user actions
//! to them, and renders the result.

use std::sync::Arc;
use std::time::Duration;

use qkart_client::StorefrontClient;
use qkart_core::{Session, SessionStore};

use crate::auth::Authenticator;
use crate::cart::{CartIntent, CartReconciler};
use crate::catalog::{CatalogEvent, CatalogLoader, SearchOutcome};
use crate::notify::Notifier;
use crate::view::{render_page, HeaderView, PageView};

/// A user interaction on the products page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// The search box now contains this text.
    Search(String),
    /// "Add to cart" on a product card.
    AddToCart(String),
    /// Quantity stepper in the cart panel.
    SetQuantity { product_id: String, qty: i64 },
    Logout,
}

pub struct Storefront {
    auth: Authenticator,
    session: Session,
    catalog: CatalogLoader,
    cart: CartReconciler,
}

impl Storefront {
    /// Builds the page with the session currently persisted in `store`.
    #[must_use]
    pub fn new(client: Arc<StorefrontClient>, store: SessionStore, debounce: Duration) -> Self {
        let auth = Authenticator::new(Arc::clone(&client), store);
        let session = auth.current();
        Self {
            auth,
            session,
            catalog: CatalogLoader::new(Arc::clone(&client), debounce),
            cart: CartReconciler::new(client),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogLoader {
        &self.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &CartReconciler {
        &self.cart
    }

    /// Puts the page in its loading state. Rendering between this and
    /// [`Self::mount`] shows the loading placeholder.
    pub fn begin_mount(&mut self) {
        self.catalog.begin_load();
    }

    /// Initial load: the full catalog, then the cart if logged in.
    pub async fn mount(&mut self, notifier: &mut dyn Notifier) {
        self.begin_mount();
        self.catalog.load_all(notifier).await;
        self.cart.fetch_cart(&self.session, notifier).await;
    }

    /// Routes a user action to the catalog or the cart.
    pub async fn dispatch(&mut self, action: UserAction, notifier: &mut dyn Notifier) {
        tracing::debug!(?action, "dispatching user action");
        match action {
            UserAction::Search(text) => self.catalog.debounced_search(text),
            UserAction::AddToCart(product_id) => {
                self.cart
                    .add_or_update(
                        &self.session,
                        self.catalog.products(),
                        &product_id,
                        1,
                        CartIntent::Add,
                        notifier,
                    )
                    .await;
            }
            UserAction::SetQuantity { product_id, qty } => {
                self.cart
                    .add_or_update(
                        &self.session,
                        self.catalog.products(),
                        &product_id,
                        qty,
                        CartIntent::SetQuantity,
                        notifier,
                    )
                    .await;
            }
            UserAction::Logout => {
                self.session = self.auth.logout(notifier);
                self.cart.clear();
                self.catalog.reset_search();
                self.mount(notifier).await;
            }
        }
    }

    /// Searches immediately, bypassing the debounce interval.
    pub async fn search_now(&mut self, text: &str, notifier: &mut dyn Notifier) -> SearchOutcome {
        self.catalog.search(text, notifier).await
    }

    /// Drives debounced searches; see [`CatalogLoader::next_event`].
    pub async fn next_event(&mut self, notifier: &mut dyn Notifier) -> Option<CatalogEvent> {
        self.catalog.next_event(notifier).await
    }

    /// Renders the whole page from current state.
    #[must_use]
    pub fn render(&self) -> String {
        let products = self.catalog.products();
        let items = self
            .session
            .is_authenticated()
            .then(|| self.cart.items(products));
        render_page(&PageView {
            header: HeaderView {
                session: &self.session,
                search_value: Some(self.catalog.search_value()),
                hide_auth_buttons: false,
            },
            products,
            loading: self.catalog.is_loading(),
            cart: items.as_deref(),
        })
    }
}
