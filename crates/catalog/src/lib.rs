//! `sproutstand-catalog`: products and the approval-gated lifecycle rules.

pub mod product;

pub use product::{
    DecisionOutcome, GuardianAction, NewProduct, Product, ProductFilter, ProductPatch,
    ProductStatus,
};
