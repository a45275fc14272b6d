use crate::error::MirrorError;

use super::DatasetRef;

/// Parse a user-supplied dataset reference in `<namespace>/<name>` form.
///
/// Validation happens up front, before any network call is made on the
/// reference.
pub fn parse_dataset_ref(input: &str) -> Result<DatasetRef, MirrorError> {
    let trimmed = input.trim();
    let mut parts = trimmed.split('/');
    let namespace = parts.next().unwrap_or_default();
    let name = parts.next().unwrap_or_default();
    let extra = parts.next();

    if namespace.is_empty() || name.is_empty() || extra.is_some() {
        return Err(MirrorError::InvalidDatasetRef {
            input: input.to_string(),
            message: "expected dataset id in '<namespace>/<name>' form".to_string(),
        });
    }

    Ok(DatasetRef {
        namespace: namespace.to_string(),
        name: name.to_string(),
    })
}
