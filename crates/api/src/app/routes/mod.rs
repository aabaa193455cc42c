use axum::{
    Router,
    routing::{get, post},
};

pub mod admin;
pub mod auth;
pub mod orders;
pub mod parent;
pub mod products;
pub mod storefronts;
pub mod system;

/// Router for every endpoint except `/health`. Auth is per-handler via the
/// `RequireAuth` extractor.
pub fn router() -> Router {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me).put(auth::update_me))
        .route("/storefronts", post(storefronts::create_storefront))
        .route("/storefronts/mine", get(storefronts::my_storefront))
        .route(
            "/storefronts/:id",
            get(storefronts::get_storefront).patch(storefronts::update_storefront),
        )
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/marketplace", get(products::marketplace))
        .route("/products/mine", get(products::my_products))
        .route(
            "/products/:id",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        .route("/products/:id/decision", post(products::decide_product))
        .route("/orders", post(orders::create_order))
        .route("/orders/mine", get(orders::my_orders))
        .nest("/parent", parent::router())
        .nest("/admin", admin::router())
}
