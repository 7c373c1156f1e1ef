use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Failed to write inventory: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}
