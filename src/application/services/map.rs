//! Map service
//!
//! Resolves which mansion to play (built-in or a TOML map file), builds it
//! and renders it for display.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Direction, MansionBuilder, MapSpec, RoomId, RoomTree};
use crate::infrastructure::traits::FileSystem;

/// Service for loading, building and rendering mansion maps.
pub struct MapService {
    fs: Arc<dyn FileSystem>,
}

impl MapService {
    /// Create a new map service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load the map at `path`, or the built-in mansion when no path is given.
    pub fn resolve(&self, path: Option<&Path>) -> ApplicationResult<MapSpec> {
        match path {
            Some(p) => self.load(p),
            None => {
                debug!("resolve: using built-in mansion");
                Ok(MapSpec::builtin())
            }
        }
    }

    /// Parse a TOML map file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<MapSpec> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::MapRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| ApplicationError::MapRead {
                path: path.to_path_buf(),
                source: e,
            })?;
        toml::from_str(&content).map_err(|e| ApplicationError::MapParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Wire the room tree for `spec`.
    pub fn build(&self, spec: &MapSpec) -> ApplicationResult<RoomTree> {
        Ok(MansionBuilder::build(spec)?)
    }

    /// Render the tree, marking passages with `L:`/`R:` and rooms that still
    /// hold a clue with `*`.
    pub fn render(&self, tree: &RoomTree) -> String {
        let Some(root) = tree.root() else {
            return String::new();
        };

        // Children are finished before their parent in post order.
        let mut built: HashMap<RoomId, Tree<String>> = HashMap::new();
        for (id, room) in tree.iter_postorder() {
            let side = room.parent().and_then(|p| tree.room(p)).and_then(|parent| {
                [Direction::Left, Direction::Right]
                    .into_iter()
                    .find(|&s| parent.child(s) == Some(id))
            });
            let children: Vec<Tree<String>> = tree
                .children(id)
                .into_iter()
                .flatten()
                .filter_map(|c| built.remove(&c))
                .collect();
            let node = Tree::new(label(room.name(), room.has_clue(), side)).with_leaves(children);
            built.insert(id, node);
        }

        built
            .remove(&root)
            .map(|t| t.to_string())
            .unwrap_or_default()
    }
}

fn label(name: &str, has_clue: bool, side: Option<Direction>) -> String {
    let mut text = match side {
        Some(s) => format!("{}: {}", side_tag(s), name),
        None => name.to_string(),
    };
    if has_clue {
        text.push_str(" *");
    }
    text
}

fn side_tag(side: Direction) -> &'static str {
    match side {
        Direction::Left => "L",
        Direction::Right => "R",
    }
}
