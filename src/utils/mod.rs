//! Internal utility helpers for query encoding and fallback seeding.

pub(crate) mod query;
pub(crate) mod seed;
