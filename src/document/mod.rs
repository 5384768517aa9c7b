//! The editable graph of dialog nodes: store, import and export.

mod error;
mod io;
mod lenient;
mod store;
mod types;

pub use error::{ExportError, ImportError, StoreError};
pub use io::{export_json, export_nodes, parse_import};
pub use store::DocumentStore;
pub use types::{Edge, NODE_HEIGHT, NODE_WIDTH, Node, NodePatch};
