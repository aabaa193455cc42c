use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sproutstand_auth::Role;
use sproutstand_catalog::{Product, ProductStatus};
use sproutstand_core::UserId;
use sproutstand_identity::User;
use sproutstand_infra::ProductListing;
use sproutstand_orders::ItemRequest;

// -------------------------
// Request DTOs
// -------------------------
//
// Creation and patch payloads deserialize straight into the domain types
// (`SignupRequest`, `NewStorefront`, `NewProduct`, the patches); only shapes
// with no domain counterpart live here.

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Guardian decision body; `action` is parsed ("approve" / "reject") so a bad
/// value reports `invalid_input` like every other malformed field.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub action: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<ItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    /// A kid's user id or a storefront id.
    pub seller_id: Option<String>,
    pub status: Option<ProductStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarketplaceParams {
    pub search: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

/// User as exposed over the wire; never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub parent_id: Option<UserId>,
    pub birthday: Option<NaiveDate>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            parent_id: user.parent_id,
            birthday: user.birthday,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserResponse,
}

impl TokenResponse {
    pub fn new(access_token: String, user: User) -> Self {
        Self {
            access_token,
            token_type: "bearer",
            user: user.into(),
        }
    }
}

/// Product with the read-side storefront-name projection, when computed.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: Product,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storefront_name: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            product,
            storefront_name: None,
        }
    }
}

impl From<ProductListing> for ProductResponse {
    fn from(listing: ProductListing) -> Self {
        Self {
            product: listing.product,
            storefront_name: listing.storefront_name,
        }
    }
}
