use serde::{Deserialize, Serialize};

use sproutstand_core::{DomainError, DomainResult, Entity, StorefrontId, UserId};

/// Storefront visibility status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorefrontStatus {
    Active,
    #[default]
    Draft,
}

/// A kid seller's shop, one-to-one with the kid's identity.
///
/// # Invariants
/// - `kid_id` references a user with role kid_seller.
/// - At most one storefront per kid (check-then-insert at the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storefront {
    pub id: StorefrontId,
    pub kid_id: UserId,
    pub display_name: String,
    pub description: String,
    pub status: StorefrontStatus,
}

impl Storefront {
    pub fn apply(&mut self, patch: &StorefrontPatch) {
        if let Some(display_name) = &patch.display_name {
            self.display_name = display_name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

impl Entity for Storefront {
    type Id = StorefrontId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Storefront creation input.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStorefront {
    pub display_name: String,
    pub description: String,
    #[serde(default)]
    pub status: StorefrontStatus,
}

impl NewStorefront {
    pub fn validate(&self) -> DomainResult<()> {
        if self.display_name.trim().is_empty() {
            return Err(DomainError::invalid_input("display_name is required"));
        }
        Ok(())
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorefrontPatch {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub status: Option<StorefrontStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storefront() -> Storefront {
        Storefront {
            id: StorefrontId::new(),
            kid_id: UserId::new(),
            display_name: "Mina's Bracelets".to_string(),
            description: "Handmade bead bracelets".to_string(),
            status: StorefrontStatus::Draft,
        }
    }

    #[test]
    fn patch_merges_present_fields_only() {
        let mut sf = storefront();
        sf.apply(&StorefrontPatch {
            display_name: None,
            description: Some("New description".to_string()),
            status: Some(StorefrontStatus::Active),
        });
        assert_eq!(sf.display_name, "Mina's Bracelets");
        assert_eq!(sf.description, "New description");
        assert_eq!(sf.status, StorefrontStatus::Active);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut sf = storefront();
        let before = sf.clone();
        sf.apply(&StorefrontPatch::default());
        assert_eq!(sf, before);
    }

    #[test]
    fn new_storefront_requires_display_name() {
        let req = NewStorefront {
            display_name: "  ".to_string(),
            description: String::new(),
            status: StorefrontStatus::Draft,
        };
        assert!(req.validate().is_err());
    }
}
