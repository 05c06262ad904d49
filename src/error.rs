use thiserror::Error;

/// Errors that can occur while parsing an external action-catalog listing.
///
/// The synchronization core itself never surfaces errors: malformed inbound
/// model values normalize to empty, mutations on unknown ids are silent
/// no-ops, and bad measurements are filtered. Errors exist only at the
/// conversion edges, where external JSON is turned into catalog or model
/// structures.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("Failed to parse action listing JSON: {0}")]
    JsonParseError(String),

    #[error("Action listing is not a JSON array of action entries")]
    NotAnArray,

    #[error("Action entry at index {index} has no string 'id'")]
    EntryWithoutId { index: usize },
}

/// Errors that can occur while loading a task specification file, used by
/// the CLI tool and host-side loaders.
#[derive(Error, Debug)]
pub enum SpecLoadError {
    #[error("Failed to read task spec '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse task spec JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
}
