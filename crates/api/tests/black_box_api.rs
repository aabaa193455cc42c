use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = sproutstand_api::app::build_app("test-secret".to_string());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn signup(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    role: &str,
    parent_email: Option<&str>,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/auth/signup", base_url))
        .json(&json!({
            "email": email,
            "display_name": email.split('@').next().unwrap(),
            "role": role,
            "password": "hunter22",
            "parent_email": parent_email,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED, "signup failed for {email}");
    res.json().await.unwrap()
}

async fn login(client: &reqwest::Client, base_url: &str, email: &str) -> String {
    let res = client
        .post(format!("{}/auth/login", base_url))
        .json(&json!({ "email": email, "password": "hunter22" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK, "login failed for {email}");
    let body: serde_json::Value = res.json().await.unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_endpoints_require_a_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/auth/me", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/orders/mine", srv.base_url))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signup_login_me_round_trip() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = signup(&client, &srv.base_url, "buyer@example.com", "buyer", None).await;
    assert_eq!(created["role"], "buyer");
    assert!(created.get("password_hash").is_none());

    let token = login(&client, &srv.base_url, "buyer@example.com").await;
    let res = client
        .get(format!("{}/auth/me", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let me: serde_json::Value = res.json().await.unwrap();
    assert_eq!(me["email"], "buyer@example.com");

    // Duplicate email is a conflict.
    let res = client
        .post(format!("{}/auth/signup", srv.base_url))
        .json(&json!({
            "email": "buyer@example.com",
            "display_name": "Another",
            "role": "buyer",
            "password": "hunter22",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn kid_signup_requires_a_known_guardian() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/signup", srv.base_url))
        .json(&json!({
            "email": "kid@example.com",
            "display_name": "Kid",
            "role": "kid_seller",
            "password": "hunter22",
            "parent_email": "ghost@example.com",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn buyers_cannot_open_storefronts() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    signup(&client, &srv.base_url, "buyer@example.com", "buyer", None).await;
    let token = login(&client, &srv.base_url, "buyer@example.com").await;

    let res = client
        .post(format!("{}/storefronts", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "display_name": "Nope", "description": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn marketplace_flow_from_signup_to_settled_order() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    signup(&client, &srv.base_url, "mom@example.com", "parent_guardian", None).await;
    signup(
        &client,
        &srv.base_url,
        "mina@example.com",
        "kid_seller",
        Some("mom@example.com"),
    )
    .await;
    signup(&client, &srv.base_url, "buyer@example.com", "buyer", None).await;

    let mom = login(&client, &srv.base_url, "mom@example.com").await;
    let mina = login(&client, &srv.base_url, "mina@example.com").await;
    let buyer = login(&client, &srv.base_url, "buyer@example.com").await;

    // Kid opens a storefront, then lists a product.
    let res = client
        .post(format!("{}/storefronts", srv.base_url))
        .bearer_auth(&mina)
        .json(&json!({
            "display_name": "Mina's Bracelets",
            "description": "Handmade bead bracelets",
            "status": "active",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(&mina)
        .json(&json!({
            "name": "Friendship Bracelet",
            "description": "Woven cotton, pick your colors",
            "price_cents": 500,
            "quantity": 3,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let product: serde_json::Value = res.json().await.unwrap();
    assert_eq!(product["status"], "pending_approval");
    let product_id = product["id"].as_str().unwrap().to_string();

    // Not approved yet: invisible on the marketplace, visible to the parent.
    let res = client
        .get(format!("{}/products/marketplace", srv.base_url))
        .send()
        .await
        .unwrap();
    let listings: Vec<serde_json::Value> = res.json().await.unwrap();
    assert!(listings.is_empty());

    let res = client
        .get(format!("{}/parent/approvals", srv.base_url))
        .bearer_auth(&mom)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let approvals: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(approvals.len(), 1);
    assert_eq!(approvals[0]["storefront_name"], "Mina's Bracelets");

    // The buyer cannot approve; the linked guardian can.
    let res = client
        .post(format!("{}/products/{}/decision", srv.base_url, product_id))
        .bearer_auth(&buyer)
        .json(&json!({ "action": "approve" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .post(format!("{}/products/{}/decision", srv.base_url, product_id))
        .bearer_auth(&mom)
        .json(&json!({ "action": "approve" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let decided: serde_json::Value = res.json().await.unwrap();
    assert_eq!(decided["status"], "active");

    // Now on the marketplace, with the storefront name joined in.
    let res = client
        .get(format!("{}/products/marketplace", srv.base_url))
        .send()
        .await
        .unwrap();
    let listings: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["storefront_name"], "Mina's Bracelets");

    // Buyer settles an order for two units.
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .bearer_auth(&buyer)
        .json(&json!({ "items": [{ "product_id": product_id, "quantity": 2 }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let order: serde_json::Value = res.json().await.unwrap();
    assert_eq!(order["total_cents"], 1000);
    assert_eq!(order["status"], "completed");

    // Stock dropped; the order shows up for both buyer and seller.
    let res = client
        .get(format!("{}/products/{}", srv.base_url, product_id))
        .send()
        .await
        .unwrap();
    let live: serde_json::Value = res.json().await.unwrap();
    assert_eq!(live["quantity"], 1);

    for token in [&buyer, &mina] {
        let res = client
            .get(format!("{}/orders/mine", srv.base_url))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        let orders: Vec<serde_json::Value> = res.json().await.unwrap();
        assert_eq!(orders.len(), 1);
    }

    // Guardian stats reflect the sale.
    let res = client
        .get(format!("{}/parent/stats", srv.base_url))
        .bearer_auth(&mom)
        .send()
        .await
        .unwrap();
    let stats: serde_json::Value = res.json().await.unwrap();
    assert_eq!(stats["linked_kid_sellers"], 1);
    assert_eq!(stats["pending_approvals_count"], 0);
    assert_eq!(stats["total_child_earnings_cents"], 1000);

    // Over-ordering the remaining stock is a conflict and changes nothing.
    let res = client
        .post(format!("{}/orders", srv.base_url))
        .bearer_auth(&buyer)
        .json(&json!({ "items": [{ "product_id": product_id, "quantity": 5 }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .get(format!("{}/products/{}", srv.base_url, product_id))
        .send()
        .await
        .unwrap();
    let live: serde_json::Value = res.json().await.unwrap();
    assert_eq!(live["quantity"], 1);
}

#[tokio::test]
async fn invalid_decision_action_is_a_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    signup(&client, &srv.base_url, "mom@example.com", "parent_guardian", None).await;
    let mom = login(&client, &srv.base_url, "mom@example.com").await;

    let res = client
        .post(format!(
            "{}/products/{}/decision",
            srv.base_url,
            uuid::Uuid::now_v7()
        ))
        .bearer_auth(&mom)
        .json(&json!({ "action": "maybe" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
