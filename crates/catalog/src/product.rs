use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sproutstand_core::{DomainError, DomainResult, Entity, ProductId, StorefrontId, UserId};

/// Product lifecycle status.
///
/// Transitions:
/// - `pending_approval → active` (guardian approve)
/// - `pending_approval → rejected` (guardian reject)
/// - `active → sold_out` (settlement decrements quantity to zero)
/// - `sold_out → active` (owner restock)
///
/// Nothing re-enters `pending_approval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    PendingApproval,
    Active,
    Rejected,
    SoldOut,
}

/// A parent's approve/reject decision on a pending product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardianAction {
    Approve,
    Reject,
}

impl GuardianAction {
    pub fn target_status(&self) -> ProductStatus {
        match self {
            GuardianAction::Approve => ProductStatus::Active,
            GuardianAction::Reject => ProductStatus::Rejected,
        }
    }
}

impl FromStr for GuardianAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(GuardianAction::Approve),
            "reject" => Ok(GuardianAction::Reject),
            _ => Err(DomainError::invalid_input("action must be 'approve' or 'reject'")),
        }
    }
}

/// Outcome of applying a guardian decision to the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// Legal transition out of `pending_approval`.
    Transition(ProductStatus),
    /// Same decision re-applied; nothing to write.
    AlreadyDecided,
}

/// A kid seller's listed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub storefront_id: StorefrontId,
    pub name: String,
    pub description: String,
    /// Price in smallest currency unit (cents).
    pub price_cents: u64,
    pub quantity: u32,
    /// Relative paths recorded by the upload plumbing; opaque here.
    pub images: Vec<String>,
    pub image_names: Vec<String>,
    pub size: Option<String>,
    pub materials: Option<String>,
    pub time_required: Option<String>,
    pub status: ProductStatus,
    /// Guardian who decided, with the decision timestamp.
    pub approver_id: Option<UserId>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Guard for a guardian decision against the current status.
    ///
    /// Re-applying the decision that was already taken is a no-op success; a
    /// conflicting re-decision fails. `sold_out` counts as approved.
    pub fn decision_outcome(&self, action: GuardianAction) -> DomainResult<DecisionOutcome> {
        let target = action.target_status();
        match (self.status, target) {
            (ProductStatus::PendingApproval, _) => Ok(DecisionOutcome::Transition(target)),
            (ProductStatus::Active | ProductStatus::SoldOut, ProductStatus::Active)
            | (ProductStatus::Rejected, ProductStatus::Rejected) => {
                Ok(DecisionOutcome::AlreadyDecided)
            }
            _ => Err(DomainError::conflict(format!(
                "product was already decided ({})",
                status_label(self.status)
            ))),
        }
    }

    /// Merge a partial update. Absent fields are left untouched; status is
    /// never writable through a patch. A restock of a sold-out product makes
    /// it active again.
    pub fn apply(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(price_cents) = patch.price_cents {
            self.price_cents = price_cents;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(images) = &patch.images {
            self.images = images.clone();
        }
        if let Some(image_names) = &patch.image_names {
            self.image_names = image_names.clone();
        }
        if let Some(size) = &patch.size {
            self.size = Some(size.clone());
        }
        if let Some(materials) = &patch.materials {
            self.materials = Some(materials.clone());
        }
        if let Some(time_required) = &patch.time_required {
            self.time_required = Some(time_required.clone());
        }

        if self.status == ProductStatus::SoldOut && self.quantity > 0 {
            self.status = ProductStatus::Active;
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn status_label(status: ProductStatus) -> &'static str {
    match status {
        ProductStatus::PendingApproval => "pending_approval",
        ProductStatus::Active => "active",
        ProductStatus::Rejected => "rejected",
        ProductStatus::SoldOut => "sold_out",
    }
}

/// Product creation input. The resulting status is always `pending_approval`
/// regardless of what the caller sends.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price_cents: u64,
    pub quantity: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub image_names: Vec<String>,
    pub size: Option<String>,
    pub materials: Option<String>,
    pub time_required: Option<String>,
}

impl NewProduct {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid_input("product name is required"));
        }
        Ok(())
    }

    pub fn into_product(self, id: ProductId, storefront_id: StorefrontId) -> Product {
        Product {
            id,
            storefront_id,
            name: self.name,
            description: self.description,
            price_cents: self.price_cents,
            quantity: self.quantity,
            images: self.images,
            image_names: self.image_names,
            size: self.size,
            materials: self.materials,
            time_required: self.time_required,
            status: ProductStatus::PendingApproval,
            approver_id: None,
            approved_at: None,
        }
    }
}

/// Partial update from the owning kid; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<u64>,
    pub quantity: Option<u32>,
    pub images: Option<Vec<String>>,
    pub image_names: Option<Vec<String>>,
    pub size: Option<String>,
    pub materials: Option<String>,
    pub time_required: Option<String>,
}

/// Listing filter, evaluated per product at query time.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub storefront_ids: Option<Vec<StorefrontId>>,
    pub status: Option<ProductStatus>,
    /// Case-insensitive substring on name.
    pub name_contains: Option<String>,
    /// Case-insensitive substring on name OR description (marketplace search).
    pub text_search: Option<String>,
    /// Marketplace variant: exclude quantity == 0.
    pub in_stock_only: bool,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ids) = &self.storefront_ids {
            if !ids.contains(&product.storefront_id) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if product.status != status {
                return false;
            }
        }
        if self.in_stock_only && product.quantity == 0 {
            return false;
        }
        if let Some(needle) = &self.name_contains {
            if !contains_ci(&product.name, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.text_search {
            if !contains_ci(&product.name, needle) && !contains_ci(&product.description, needle) {
                return false;
            }
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
