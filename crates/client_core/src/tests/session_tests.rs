use super::*;
use crate::{
    error::ErrorKind,
    test_support::{product, restaurant, FakeBackend},
};

#[tokio::test]
async fn resolves_restaurant_by_owner() {
    let backend = FakeBackend {
        restaurants: vec![restaurant(1, 10), restaurant(2, 20)],
        ..FakeBackend::default()
    };

    let session = DashboardSession::for_owner(&backend, UserId(20))
        .await
        .expect("session");

    assert_eq!(session.restaurant_id, RestaurantId(2));
    assert_eq!(session.display_name(), "restaurant 2");
}

#[tokio::test]
async fn missing_restaurant_is_reported() {
    let backend = FakeBackend {
        restaurants: vec![restaurant(1, 10)],
        ..FakeBackend::default()
    };

    let err = resolve_restaurant(&backend, UserId(99))
        .await
        .expect_err("no match");

    assert_eq!(err.kind(), ErrorKind::Backend);
    assert_eq!(err.to_string(), "no restaurant associated with user 99");
}

#[test]
fn explicit_restaurant_needs_no_lookup() {
    let session = DashboardSession::for_restaurant(RestaurantId(8));
    assert_eq!(session.restaurant, None);
    assert_eq!(session.display_name(), "Restaurant #8");
}

#[tokio::test]
async fn load_menu_groups_fetched_products() {
    let backend = FakeBackend {
        products: vec![product(1, Some("Pizza")), product(2, None)],
        ..FakeBackend::default()
    };

    let menu = load_menu(&backend, RestaurantId(3)).await.expect("menu");

    assert_eq!(menu.len(), 2);
    assert_eq!(backend.calls(), vec!["GET products 3".to_string()]);
}
