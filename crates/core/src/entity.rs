//! Identified documents: anything a collection keys by a typed id.

/// A stored document with a stable, typed identity.
///
/// The id newtype doubles as the map key in store backends, so it must hash
/// and compare.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
