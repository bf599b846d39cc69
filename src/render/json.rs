use serde::Serialize;

use crate::error::RepurposerError;

pub(crate) fn to_pretty<T: Serialize>(value: &T) -> Result<String, RepurposerError> {
    Ok(serde_json::to_string_pretty(value)?)
}
