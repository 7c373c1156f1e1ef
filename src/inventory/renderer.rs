//! Inventory documents handed to ansible for each play.

use std::fmt;
use std::io::Write;
use tempfile::TempPath;
use tracing::debug;

use crate::inventory::error::InventoryError;
use crate::types::{InventoryMeta, ProvisionerConfig};

pub const LOCALHOST: &str = "localhost";
pub const DEFAULT_GROUP: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryMode {
    /// Everything runs on the control machine itself.
    Local,
    Remote,
}

impl InventoryMode {
    pub fn for_config(config: &ProvisionerConfig) -> Self {
        if config.is_local() {
            InventoryMode::Local
        } else {
            InventoryMode::Remote
        }
    }
}

/// A bracketed `[name]` section followed by one host per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryBlock {
    pub name: String,
    pub hosts: Vec<String>,
}

/// Host entries without a section header, then named blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryDocument {
    pub ungrouped: Vec<String>,
    pub blocks: Vec<InventoryBlock>,
}

impl fmt::Display for InventoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for host in &self.ungrouped {
            writeln!(f, "{host}")?;
        }
        for (index, block) in self.blocks.iter().enumerate() {
            if index > 0 || !self.ungrouped.is_empty() {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", block.name)?;
            for host in &block.hosts {
                writeln!(f, "{host}")?;
            }
        }
        Ok(())
    }
}

pub struct InventoryRenderer {
    mode: InventoryMode,
}

impl InventoryRenderer {
    pub fn new(mode: InventoryMode) -> Self {
        Self { mode }
    }

    pub fn for_config(config: &ProvisionerConfig) -> Self {
        Self::new(InventoryMode::for_config(config))
    }

    pub fn mode(&self) -> InventoryMode {
        self.mode
    }

    pub fn build(&self, meta: &InventoryMeta) -> InventoryDocument {
        debug!(
            mode = ?self.mode,
            hosts = meta.hosts.len(),
            groups = meta.groups.len(),
            "Rendering inventory"
        );
        match self.mode {
            InventoryMode::Local => InventoryDocument {
                ungrouped: vec![format!("{LOCALHOST} ansible_connection=local")],
                blocks: Vec::new(),
            },
            InventoryMode::Remote => {
                // Every configured host is a member of every configured group.
                let mut blocks = Vec::with_capacity(meta.groups.len() + 1);
                blocks.push(InventoryBlock {
                    name: DEFAULT_GROUP.to_string(),
                    hosts: meta.hosts.clone(),
                });
                blocks.extend(meta.groups.iter().map(|group| InventoryBlock {
                    name: group.clone(),
                    hosts: meta.hosts.clone(),
                }));
                InventoryDocument {
                    ungrouped: Vec::new(),
                    blocks,
                }
            }
        }
    }

    pub fn render(&self, meta: &InventoryMeta) -> String {
        self.build(meta).to_string()
    }

    /// Writes the rendered document to a temporary file, removed when the
    /// returned path is dropped.
    pub fn write_temp(&self, meta: &InventoryMeta) -> Result<TempPath, InventoryError> {
        let mut file = tempfile::Builder::new()
            .prefix("rustle-inventory-")
            .tempfile()
            .map_err(|source| InventoryError::Io { source })?;
        file.write_all(self.render(meta).as_bytes())
            .map_err(|source| InventoryError::Io { source })?;
        file.flush().map_err(|source| InventoryError::Io { source })?;
        Ok(file.into_temp_path())
    }
}
