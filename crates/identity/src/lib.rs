//! `sproutstand-identity`: user records and parent-child links.

pub mod user;

pub use user::{SignupRequest, User, UserPatch};
