//! Assembly of route blocks into per-resource output units.
//!
//! A [`ResourceAggregator`] turns each [`ResourceGroup`] into one
//! [`OutputUnit`]: the blocks of every member pattern, in declaration order,
//! plus the file they are written to. The block buffer is local to each call,
//! so nothing carries over from one group to the next.

use crate::classifier::{classify, effective_name, parent_segments, ResourceGroup};
use crate::document::Document;
use crate::expander::{expand_operations, RouteBlock};
use heck::{ToKebabCase, ToPascalCase};
use indexmap::map::Entry;
use indexmap::IndexMap;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// File stem used when a resource's base segment yields no name.
pub const INDEX_FILE_STEM: &str = "Index";

/// A ready-to-write route file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// Pattern the unit is named after
    pub root_pattern: String,
    pub target_directory: PathBuf,
    pub file_name: String,
    /// Blocks of every pattern in the group, in document order
    pub blocks: Vec<RouteBlock>,
}

impl OutputUnit {
    pub fn target_path(&self) -> PathBuf {
        self.target_directory.join(&self.file_name)
    }
}

/// Packs resource groups into output units below an application's routes tree.
pub struct ResourceAggregator {
    routes_root: PathBuf,
}

impl ResourceAggregator {
    /// Routes live at `{output_root}/{kebab-case name}/{name}/src/routes`.
    pub fn new(output_root: &Path, app_name: &str) -> Self {
        let routes_root = output_root
            .join(app_name.to_kebab_case())
            .join(app_name)
            .join("src")
            .join("routes");
        debug!("Routes root: {}", routes_root.display());
        Self { routes_root }
    }

    pub fn routes_root(&self) -> &Path {
        &self.routes_root
    }

    /// Builds the output unit for one resource group.
    pub fn aggregate(&self, group: &ResourceGroup<'_>) -> OutputUnit {
        let blocks = group
            .members
            .iter()
            .fold(Vec::new(), |mut buffer, member| {
                buffer.extend(expand_operations(member.pattern, member.item));
                buffer
            });

        let root = group.root;
        let target_directory = parent_segments(root.pattern)
            .into_iter()
            .fold(self.routes_root.clone(), |dir, segment| dir.join(segment));

        let stem = match effective_name(root.pattern, root.item).to_pascal_case() {
            stem if stem.is_empty() => INDEX_FILE_STEM.to_string(),
            stem => stem,
        };

        debug!(
            "Resource {} -> {}.js with {} blocks",
            root.pattern,
            stem,
            blocks.len()
        );

        OutputUnit {
            root_pattern: root.pattern.to_string(),
            target_directory,
            file_name: format!("{}.js", stem),
            blocks,
        }
    }

    /// Classifies the document's paths and builds every output unit, in
    /// declaration order.
    ///
    /// Groups that resolve to the same file (`/users/{id}` and `/users/id`,
    /// `/Pets` and `/pets`) are merged into the first unit so no handler is
    /// lost when the files are written.
    pub fn build_units(&self, document: &Document) -> Vec<OutputUnit> {
        let mut units: IndexMap<PathBuf, OutputUnit> = IndexMap::new();

        for group in classify(&document.paths) {
            let unit = self.aggregate(&group);
            match units.entry(unit.target_path()) {
                Entry::Occupied(mut existing) => {
                    warn!(
                        "Resources {} and {} both map to {}, merging their handlers",
                        existing.get().root_pattern,
                        unit.root_pattern,
                        existing.key().display()
                    );
                    existing.get_mut().blocks.extend(unit.blocks);
                }
                Entry::Vacant(slot) => {
                    slot.insert(unit);
                }
            }
        }

        units.into_values().collect()
    }
}
