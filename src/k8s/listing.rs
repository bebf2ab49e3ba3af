/// Typed decoding of `kubectl get -o json` listings
use serde::Deserialize;
use thiserror::Error;

/// Listing could not be decoded into the expected shape
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("malformed object listing: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A `List` document as returned by kubectl
#[derive(Debug, Deserialize)]
pub struct ObjectList {
    pub items: Vec<ListedObject>,
}

/// One entry of a listing, reduced to what addressing it needs
#[derive(Debug, Clone, Deserialize)]
pub struct ListedObject {
    pub kind: String,
    pub metadata: ObjectMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

/// A namespaced object ready to be re-queried and written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub kind: String,
    pub name: String,
    pub namespace: String,
}

impl ObjectRef {
    /// File stem for this object: `<kind>-<name>`
    pub fn export_name(&self) -> String {
        format!("{}-{}", self.kind, self.name)
    }
}

/// Decoded listing split into namespaced objects and skipped cluster-scoped ones
#[derive(Debug, Default)]
pub struct ParsedListing {
    pub objects: Vec<ObjectRef>,
    pub cluster_scoped: usize,
}

/// Exported item: a file stem and the canonical YAML written under it
#[derive(Debug, Clone)]
pub struct ExportedItem {
    pub name: String,
    pub body: String,
}

/// Decode a JSON listing, dropping objects without a namespace.
///
/// Any shape mismatch fails the whole listing.
pub fn parse_listing(raw: &[u8]) -> Result<ParsedListing, ListingError> {
    let list: ObjectList = serde_json::from_slice(raw)?;

    let mut parsed = ParsedListing::default();
    for item in list.items {
        match item.metadata.namespace {
            Some(namespace) if !namespace.is_empty() => parsed.objects.push(ObjectRef {
                kind: item.kind,
                name: item.metadata.name,
                namespace,
            }),
            _ => parsed.cluster_scoped += 1,
        }
    }

    Ok(parsed)
}
