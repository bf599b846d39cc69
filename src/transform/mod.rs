//! Mapping from raw upstream payloads to domain types.

pub(crate) mod trial;
