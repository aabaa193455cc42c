//! `sproutstand-storefront`: a kid seller's single public shop.

pub mod storefront;

pub use storefront::{NewStorefront, Storefront, StorefrontPatch, StorefrontStatus};
