//! Router-level contracts for the collection endpoints: status codes,
//! response shapes, server-stamped fields, and duplicate handling.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{create_test_app, get, post_json, request, unknown_id};

#[tokio::test]
async fn test_root_banner_and_probes() {
    let app = create_test_app().await;

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("Local Chef Bazaar"));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_user_registration_defaults_and_duplicate() {
    let app = create_test_app().await;

    let (status, user) = post_json(
        &app,
        "/users",
        json!({ "email": "a@x.com", "name": "Amina", "role": "admin" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], "a@x.com");
    assert_eq!(user["role"], "user");
    assert_eq!(user["status"], "active");
    assert_eq!(user["name"], "Amina");

    // same email again: rejected, stored record untouched
    let (status, body) = post_json(&app, "/users", json!({ "email": "a@x.com" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("already exists"));

    let (status, users) = get(&app, "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["role"], "user");
}

#[tokio::test]
async fn test_user_registration_requires_email() {
    let app = create_test_app().await;

    let (status, body) = post_json(&app, "/users", json!({ "name": "No Email" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn test_role_lookup_defaults_to_user() {
    let app = create_test_app().await;

    let (status, body) = get(&app, "/users/role/ghost@x.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "user");

    post_json(&app, "/users", json!({ "email": "a@x.com" })).await;
    let (_, body) = get(&app, "/users/role/a@x.com").await;
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_meal_create_fetch_and_limit() {
    let app = create_test_app().await;

    let (status, meal) = post_json(
        &app,
        "/meals",
        json!({ "title": "Jollof rice", "price": 12.5 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = meal["id"].as_str().unwrap().to_string();

    let (status, fetched) = get(&app, &format!("/meals/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Jollof rice");

    post_json(&app, "/meals", json!({ "title": "Suya" })).await;
    post_json(&app, "/meals", json!({ "title": "Moin moin" })).await;

    let (_, all) = get(&app, "/meals").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, capped) = get(&app, "/meals?limit=2").await;
    assert_eq!(capped.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_meal_fetch_malformed_and_unknown_id() {
    let app = create_test_app().await;

    let (status, body) = get(&app, "/meals/not-a-valid-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("invalid id"));

    let (status, _) = get(&app, &format!("/meals/{}", unknown_id())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_review_date_is_server_stamped_and_filters_work() {
    let app = create_test_app().await;

    let (status, review) = post_json(
        &app,
        "/reviews",
        json!({
            "userEmail": "a@x.com",
            "foodId": "meal-1",
            "rating": 5,
            "date": "1999-01-01"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(review["date"], "1999-01-01");

    post_json(
        &app,
        "/reviews",
        json!({ "userEmail": "b@x.com", "foodId": "meal-1", "rating": 4 }),
    )
    .await;
    post_json(
        &app,
        "/reviews",
        json!({ "userEmail": "a@x.com", "foodId": "meal-2", "rating": 3 }),
    )
    .await;

    let (_, all) = get(&app, "/reviews").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, by_food) = get(&app, "/reviews?foodId=meal-1").await;
    assert_eq!(by_food.as_array().unwrap().len(), 2);

    let (_, by_user) = get(&app, "/reviews?userEmail=a@x.com").await;
    assert_eq!(by_user.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_review_requires_user_email_and_food_id() {
    let app = create_test_app().await;

    let (status, _) = post_json(&app, "/reviews", json!({ "foodId": "meal-1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&app, "/reviews", json!({ "userEmail": "a@x.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_favorite_duplicate_yields_exactly_one() {
    let app = create_test_app().await;

    let payload = json!({ "userEmail": "a@x.com", "mealId": "meal-1" });

    let (status, _) = post_json(&app, "/favorites", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&app, "/favorites", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("favorites"));

    let (status, favorites) = get(&app, "/favorites?email=a@x.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(favorites.as_array().unwrap().len(), 1);
    assert!(favorites[0]["addedTime"].is_string());
}

#[tokio::test]
async fn test_favorites_listing_requires_email() {
    let app = create_test_app().await;

    let (status, _) = get(&app, "/favorites").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_payment_record_stamps_paid_at() {
    let app = create_test_app().await;

    let (status, payment) = post_json(
        &app,
        "/payments",
        json!({ "orderId": "o1", "amount": 25, "method": "card" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(payment["paidAt"].is_string());
    assert_eq!(payment["orderId"], "o1");
}

#[tokio::test]
async fn test_malformed_ids_rejected_across_patch_endpoints() {
    let app = create_test_app().await;

    let (status, _) = request(
        &app,
        Method::PATCH,
        "/orders/status/bogus",
        Some(json!({ "status": "delivered" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(&app, Method::PATCH, "/orders/payment/bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        Method::PATCH,
        "/requests/bogus",
        Some(json!({ "status": "approved", "userEmail": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
