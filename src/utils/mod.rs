//! Shared utilities: slug generation and UTM query building.

pub mod slug;
pub mod utm;
