//! End-to-end page behaviour: mount, action routing and rendering.

use std::sync::Arc;
use std::time::Duration;

use qkart_client::StorefrontClient;
use qkart_core::{Session, SessionStore};
use qkart_storefront::{CatalogEvent, Notification, Storefront, UserAction};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_store() -> SessionStore {
    SessionStore::new(
        std::env::temp_dir()
            .join(format!("qkart-page-{}", uuid::Uuid::new_v4()))
            .join("session.json"),
    )
}

fn storefront(base_url: &str, store: SessionStore) -> Storefront {
    let client = Arc::new(StorefrontClient::new(base_url, 5, "qkart-test/0.1").expect("test client"));
    Storefront::new(client, store, Duration::from_millis(50))
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "Basketball",
                "category": "Sports",
                "cost": 100,
                "rating": 5,
                "image": "https://i.imgur.com/lulqWzW.jpg",
                "_id": "p1"
            },
            {
                "name": "Bat",
                "category": "Sports",
                "cost": 20,
                "rating": 3,
                "image": "https://i.imgur.com/bat.jpg",
                "_id": "p2"
            }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn anonymous_mount_skips_cart_and_hides_panel() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut page = storefront(&server.uri(), temp_store());
    let mut notes: Vec<Notification> = Vec::new();
    page.mount(&mut notes).await;

    let out = page.render();
    assert!(out.contains("Basketball"));
    assert!(out.contains("[LOGIN]"));
    assert!(!out.contains("Order total"));
    assert!(!out.contains("Cart is empty"));
}

#[tokio::test]
async fn authenticated_add_then_remove_round_trip() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "productId": "p2", "qty": 2 }])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = temp_store();
    store
        .save(&Session::authenticated("crio-user", "tok-123"))
        .unwrap();
    let mut page = storefront(&server.uri(), store.clone());
    let mut notes: Vec<Notification> = Vec::new();
    page.mount(&mut notes).await;

    page.dispatch(UserAction::AddToCart("p1".to_owned()), &mut notes)
        .await;
    assert!(page.cart().contains("p1"));
    let out = page.render();
    assert!(out.contains("crio-user"));
    assert!(out.contains("Order total: $140"));

    page.dispatch(
        UserAction::SetQuantity {
            product_id: "p2".to_owned(),
            qty: 0,
        },
        &mut notes,
    )
    .await;
    assert!(!page.cart().contains("p2"));
    assert!(notes.is_empty(), "unexpected notifications: {notes:?}");
    store.clear().unwrap();
}

#[tokio::test]
async fn search_action_is_debounced_through_next_event() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/products/search"))
        .and(query_param("value", "bat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": "Bat",
            "category": "Sports",
            "cost": 20,
            "rating": 3,
            "image": "https://i.imgur.com/bat.jpg",
            "_id": "p2"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = storefront(&server.uri(), temp_store());
    let mut notes: Vec<Notification> = Vec::new();
    page.mount(&mut notes).await;
    page.dispatch(UserAction::Search("ba".to_owned()), &mut notes)
        .await;
    page.dispatch(UserAction::Search("bat".to_owned()), &mut notes)
        .await;

    let mut applied = None;
    for _ in 0..2 {
        let event = tokio::time::timeout(Duration::from_secs(5), page.next_event(&mut notes))
            .await
            .expect("event should arrive");
        if let Some(CatalogEvent::SearchApplied { query, .. }) = event {
            applied = Some(query);
        }
    }

    assert_eq!(applied.as_deref(), Some("bat"));
    assert_eq!(page.catalog().products().len(), 1);
    assert!(page.render().contains("bat"));
}

#[tokio::test]
async fn logout_clears_session_and_cart() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "productId": "p1", "qty": 1 }])))
        .mount(&server)
        .await;

    let store = temp_store();
    store
        .save(&Session::authenticated("crio-user", "tok-123"))
        .unwrap();
    let mut page = storefront(&server.uri(), store.clone());
    let mut notes: Vec<Notification> = Vec::new();
    page.mount(&mut notes).await;
    assert!(page.cart().contains("p1"));
    page.dispatch(UserAction::Search("bat".to_owned()), &mut notes).await;
    assert_eq!(page.catalog().search_value(), "bat");

    page.dispatch(UserAction::Logout, &mut notes).await;

    assert_eq!(page.catalog().search_value(), "");

    assert_eq!(page.session(), &Session::Anonymous);
    assert!(page.cart().entries().is_empty());
    assert_eq!(store.load(), Session::Anonymous);
    assert!(page.render().contains("[LOGIN]"));
}

#[tokio::test]
async fn page_rendered_during_initial_load_shows_placeholder() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let mut page = storefront(&server.uri(), temp_store());
    page.begin_mount();
    let loading = page.render();
    assert!(loading.contains("Loading Products..."));
    assert!(!loading.contains("No products found"));

    let mut notes: Vec<Notification> = Vec::new();
    page.mount(&mut notes).await;
    let loaded = page.render();
    assert!(!loaded.contains("Loading Products..."));
    assert!(loaded.contains("Basketball"));
}
