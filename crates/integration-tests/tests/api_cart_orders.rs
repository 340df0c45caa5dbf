//! Integration tests for cart, order, review and admin endpoints.
//!
//! Requires a running saree-server seeded with the demo catalog.

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use saree_integration_tests::{base_url, client, login_as_admin, register_and_login};

/// Fetch the first demo product's ID.
async fn any_product_id(client: &Client) -> i64 {
    let products: Vec<Value> = client
        .get(format!("{}/api/products", base_url()))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to parse products");
    products
        .first()
        .and_then(|p| p["id"].as_i64())
        .expect("demo catalog should have products")
}

#[tokio::test]
#[ignore = "Requires running saree-server"]
async fn test_cart_requires_auth() {
    let resp = client()
        .get(format!("{}/api/cart", base_url()))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running saree-server"]
async fn test_cart_add_merges_quantities() {
    let client = client();
    register_and_login(&client).await;
    let base = base_url();
    let product_id = any_product_id(&client).await;

    for _ in 0..2 {
        let resp = client
            .post(format!("{base}/api/cart"))
            .json(&json!({ "productId": product_id, "quantity": 1 }))
            .send()
            .await
            .expect("Failed to add to cart");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let cart: Vec<Value> = client
        .get(format!("{base}/api/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart");
    assert_eq!(cart.len(), 1, "same product should merge into one row");
    assert_eq!(cart.first().expect("one row")["quantity"], json!(2));
}

#[tokio::test]
#[ignore = "Requires running saree-server"]
async fn test_cart_quantity_must_be_positive() {
    let client = client();
    register_and_login(&client).await;
    let base = base_url();
    let product_id = any_product_id(&client).await;

    let resp = client
        .post(format!("{base}/api/cart"))
        .json(&json!({ "productId": product_id, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to add to cart");
    let item: Value = resp.json().await.expect("Failed to parse item");

    let resp = client
        .put(format!("{base}/api/cart/{}", item["id"]))
        .json(&json!({ "quantity": 0 }))
        .send()
        .await
        .expect("Failed to update cart item");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running saree-server"]
async fn test_order_placement_empties_cart() {
    let client = client();
    register_and_login(&client).await;
    let base = base_url();
    let product_id = any_product_id(&client).await;

    // Empty cart: order placement is a 400.
    let checkout = json!({
        "total": "2499.00",
        "shippingAddress": "12 MG Road, Bengaluru, KA - 560001",
        "paymentMethod": "cod",
    });
    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&checkout)
        .send()
        .await
        .expect("Failed to post order");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Fill the cart and order.
    client
        .post(format!("{base}/api/cart"))
        .json(&json!({ "productId": product_id, "quantity": 2 }))
        .send()
        .await
        .expect("Failed to add to cart");

    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&checkout)
        .send()
        .await
        .expect("Failed to post order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to parse order");
    assert_eq!(order["status"], json!("pending"));

    // The cart is cleared afterwards.
    let cart: Vec<Value> = client
        .get(format!("{base}/api/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart");
    assert!(cart.is_empty());

    // And the order shows up in the user's history.
    let orders: Vec<Value> = client
        .get(format!("{base}/api/orders"))
        .send()
        .await
        .expect("Failed to list orders")
        .json()
        .await
        .expect("Failed to parse orders");
    assert!(orders.iter().any(|o| o["id"] == order["id"]));
}

#[tokio::test]
#[ignore = "Requires running saree-server"]
async fn test_orders_are_owner_scoped() {
    let base = base_url();

    // First user places an order.
    let owner = client();
    register_and_login(&owner).await;
    let product_id = any_product_id(&owner).await;
    owner
        .post(format!("{base}/api/cart"))
        .json(&json!({ "productId": product_id, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to add to cart");
    let order: Value = owner
        .post(format!("{base}/api/orders"))
        .json(&json!({
            "total": "999.00",
            "shippingAddress": "addr",
            "paymentMethod": "upi",
        }))
        .send()
        .await
        .expect("Failed to post order")
        .json()
        .await
        .expect("Failed to parse order");

    // A different user cannot read it.
    let stranger = client();
    register_and_login(&stranger).await;
    let resp = stranger
        .get(format!("{base}/api/orders/{}", order["id"]))
        .send()
        .await
        .expect("Failed to get order");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running saree-server and SAREE_ADMIN_* config"]
async fn test_admin_updates_order_status() {
    let base = base_url();

    let customer = client();
    register_and_login(&customer).await;
    let product_id = any_product_id(&customer).await;
    customer
        .post(format!("{base}/api/cart"))
        .json(&json!({ "productId": product_id, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to add to cart");
    let order: Value = customer
        .post(format!("{base}/api/orders"))
        .json(&json!({
            "total": "999.00",
            "shippingAddress": "addr",
            "paymentMethod": "card",
        }))
        .send()
        .await
        .expect("Failed to post order")
        .json()
        .await
        .expect("Failed to parse order");

    // Customers cannot change status.
    let resp = customer
        .put(format!("{base}/api/orders/{}/status", order["id"]))
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .expect("Failed to put status");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Admins can, but only to known statuses.
    let admin = client();
    login_as_admin(&admin).await;

    let resp = admin
        .put(format!("{base}/api/orders/{}/status", order["id"]))
        .json(&json!({ "status": "returned-to-warehouse" }))
        .send()
        .await
        .expect("Failed to put status");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = admin
        .put(format!("{base}/api/orders/{}/status", order["id"]))
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .expect("Failed to put status");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Failed to parse order");
    assert_eq!(updated["status"], json!("shipped"));
}

#[tokio::test]
#[ignore = "Requires running saree-server"]
async fn test_review_updates_product_aggregate() {
    let client = client();
    register_and_login(&client).await;
    let base = base_url();
    let product_id = any_product_id(&client).await;

    let resp = client
        .post(format!("{base}/api/products/{product_id}/reviews"))
        .json(&json!({ "rating": 5, "comment": "Stunning border work." }))
        .send()
        .await
        .expect("Failed to post review");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let reviews: Vec<Value> = client
        .get(format!("{base}/api/products/{product_id}/reviews"))
        .send()
        .await
        .expect("Failed to list reviews")
        .json()
        .await
        .expect("Failed to parse reviews");
    assert!(!reviews.is_empty());

    let product: Value = client
        .get(format!("{base}/api/products/{product_id}"))
        .send()
        .await
        .expect("Failed to get product")
        .json()
        .await
        .expect("Failed to parse product");
    assert!(product["reviewCount"].as_u64().expect("reviewCount") >= 1);
}

#[tokio::test]
#[ignore = "Requires running saree-server and SAREE_ADMIN_* config"]
async fn test_admin_stats_and_users() {
    let base = base_url();
    let admin = client();
    login_as_admin(&admin).await;

    let stats: Value = admin
        .get(format!("{base}/api/admin/stats"))
        .send()
        .await
        .expect("Failed to get stats")
        .json()
        .await
        .expect("Failed to parse stats");
    assert!(stats.get("totalRevenue").is_some());
    assert!(stats.get("recentOrders").is_some());
    assert!(stats.get("topProducts").is_some());

    let users: Vec<Value> = admin
        .get(format!("{base}/api/admin/users"))
        .send()
        .await
        .expect("Failed to list users")
        .json()
        .await
        .expect("Failed to parse users");
    assert!(users.iter().all(|u| u.get("password").is_none()
        && u.get("passwordHash").is_none()));
}
