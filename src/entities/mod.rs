//! Domain types and the aggregation workflow behind every lookup.

pub(crate) mod drug;
pub(crate) mod profile;
