use std::time::Duration;

use serde_json::Value;

use crate::error::MirrorError;

use super::{DatasetRef, RemoteFileEntry};

const LISTING_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch the file listing of a dataset from the Hub API.
///
/// Returns one entry per payload file, in the order the Hub reports them.
/// Metadata-only sidecar files never enter the mirror pipeline and are
/// filtered here.
pub fn list_dataset_files(
    dataset: &DatasetRef,
    token: Option<&str>,
) -> Result<Vec<RemoteFileEntry>, MirrorError> {
    let listing_json = fetch_listing_json(dataset, token)?;
    Ok(extract_file_entries(&listing_json))
}

fn fetch_listing_json(dataset: &DatasetRef, token: Option<&str>) -> Result<Value, MirrorError> {
    let repo_id = dataset.repo_id();
    let mut url = url::Url::parse("https://huggingface.co/api/datasets/")
        .and_then(|base| base.join(&format!("{}/{}", dataset.namespace, dataset.name)))
        .map_err(|source| MirrorError::Listing {
            repo_id: repo_id.clone(),
            message: format!("invalid listing URL: {source}"),
        })?;

    // blobs=true makes the Hub include per-file sizes in `siblings`.
    url.query_pairs_mut().append_pair("blobs", "true");

    let config = ureq::Agent::config_builder()
        .timeout_global(Some(LISTING_TIMEOUT))
        .build();
    let agent: ureq::Agent = config.into();

    let mut request = agent.get(url.as_str());
    if let Some(token) = token {
        request = request.header("Authorization", &format!("Bearer {token}"));
    }

    let mut response = request.call().map_err(|source| MirrorError::Listing {
        repo_id: repo_id.clone(),
        message: source.to_string(),
    })?;

    response
        .body_mut()
        .read_json::<Value>()
        .map_err(|source| MirrorError::Listing {
            repo_id,
            message: format!("invalid listing response: {source}"),
        })
}

/// Pull `(rfilename, size)` tuples out of a Hub dataset-info response.
pub(crate) fn extract_file_entries(listing_json: &Value) -> Vec<RemoteFileEntry> {
    let mut entries = Vec::new();
    let Some(siblings) = listing_json.get("siblings").and_then(Value::as_array) else {
        return entries;
    };

    for sibling in siblings {
        let Some(rfilename) = sibling.get("rfilename").and_then(Value::as_str) else {
            continue;
        };
        if is_metadata_sidecar(rfilename) {
            continue;
        }
        entries.push(RemoteFileEntry {
            rfilename: rfilename.to_string(),
            size: sibling.get("size").and_then(Value::as_u64),
        });
    }

    entries
}

/// Hub bookkeeping files that carry no dataset payload.
fn is_metadata_sidecar(rfilename: &str) -> bool {
    rfilename.ends_with(".gitattributes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_extracted_with_sizes() {
        let listing = serde_json::json!({
            "siblings": [
                {"rfilename": "corpus.jsonl.gz", "size": 123},
                {"rfilename": "queries.jsonl", "size": 45}
            ]
        });

        let entries = extract_file_entries(&listing);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rfilename, "corpus.jsonl.gz");
        assert_eq!(entries[0].size, Some(123));
    }

    #[test]
    fn missing_size_becomes_none() {
        let listing = serde_json::json!({
            "siblings": [{"rfilename": "data/train.parquet"}]
        });

        let entries = extract_file_entries(&listing);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, None);
    }

    #[test]
    fn gitattributes_sidecar_is_filtered() {
        let listing = serde_json::json!({
            "siblings": [
                {"rfilename": ".gitattributes", "size": 10},
                {"rfilename": "README.md", "size": 20}
            ]
        });

        let entries = extract_file_entries(&listing);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rfilename, "README.md");
    }

    #[test]
    fn listing_without_siblings_is_empty() {
        let entries = extract_file_entries(&serde_json::json!({"id": "org/ds"}));
        assert!(entries.is_empty());
    }
}
