// src/store/mod.rs

pub mod client;
pub mod models;

// Re-export commonly used items for convenience
pub use client::{build_profile_store, DynProfileStore, ProfileStore, StoreError};
pub use models::{Profile, ProfileFields};
