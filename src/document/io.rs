use std::collections::HashSet;

use log::{info, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::{ExportError, ImportError};
use super::lenient::{LenientDialog, decode_dialog};
use super::store::DocumentStore;
use super::types::Node;
use crate::dialog::{Dialog, normalize};

#[derive(Serialize)]
struct ExportedDocument<'a> {
	nodes: Vec<ExportedNode<'a>>,
}

#[derive(Serialize)]
struct ExportedNode<'a> {
	id: &'a str,
	title: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	description: Option<&'a str>,
	x: f64,
	y: f64,
	dialog: Dialog,
}

/// Serializes `nodes` as `{ "nodes": [...] }` with every dialog normalized.
pub fn export_nodes(nodes: &[Node]) -> Result<String, ExportError> {
	let document = ExportedDocument {
		nodes: nodes
			.iter()
			.map(|node| ExportedNode {
				id: &node.id,
				title: &node.title,
				description: node.description.as_deref(),
				x: node.x,
				y: node.y,
				dialog: normalize(&node.dialog),
			})
			.collect(),
	};
	let json = serde_json::to_string_pretty(&document)?;
	info!("exported {} nodes", nodes.len());
	Ok(json)
}

pub fn export_json(store: &DocumentStore) -> Result<String, ExportError> {
	export_nodes(store.nodes())
}

/// Parses an exported document.
///
/// Node fields are read leniently. A dialog without a `type` or a readable `title` is
/// replaced by a notice, and unreadable fields inside a dialog are dropped; only an unknown
/// dialog `type` fails the import.
pub fn parse_import(text: &str) -> Result<Vec<Node>, ImportError> {
	let root: Value = serde_json::from_str(text)?;
	let Some(entries) = root.get("nodes").and_then(Value::as_array) else {
		warn!("import rejected: no `nodes` array");
		return Err(ImportError::InvalidFormat);
	};

	let empty = Map::new();
	let mut seen = HashSet::new();
	let mut nodes = Vec::with_capacity(entries.len());
	for (index, entry) in entries.iter().enumerate() {
		let fields = entry.as_object().unwrap_or(&empty);
		let string = |key: &str| fields.get(key).and_then(Value::as_str);
		let coord = |key: &str| {
			fields
				.get(key)
				.and_then(Value::as_f64)
				.filter(|v| v.is_finite())
				.unwrap_or(0.0)
		};

		let title = string("title").unwrap_or("Untitled").to_owned();
		let description = string("description").unwrap_or_default().to_owned();
		let decoded = match fields.get("dialog").and_then(dialog_fields) {
			Some(dialog) => decode_dialog(dialog)
				.map_err(|source| ImportError::UnknownDialogType { index, source })?,
			None => LenientDialog::Unreadable,
		};
		let dialog = match decoded {
			LenientDialog::Decoded(dialog) => dialog,
			LenientDialog::Unreadable => Dialog::notice(&title, &description),
		};

		let id = match string("id").filter(|id| !id.is_empty()) {
			Some(id) if !seen.contains(id) => id.to_owned(),
			explicit => {
				// Generated ids never take one that a later entry names explicitly.
				let fresh = (nodes.len() + 1..)
					.map(|n| format!("node-{n}"))
					.find(|candidate| {
						!seen.contains(candidate) && !claims_id(entries, candidate)
					})
					.unwrap_or_default();
				if let Some(duplicate) = explicit {
					warn!("duplicate node id `{duplicate}` renamed to `{fresh}`");
				}
				fresh
			}
		};
		seen.insert(id.clone());

		nodes.push(Node {
			id,
			title,
			description: Some(description),
			x: coord("x"),
			y: coord("y"),
			dialog,
		});
	}
	info!("imported {} nodes", nodes.len());
	Ok(nodes)
}

/// The dialog object, when it has a string `type` and some `title`.
fn dialog_fields(value: &Value) -> Option<&Map<String, Value>> {
	let fields = value.as_object()?;
	(fields.get("type").is_some_and(Value::is_string) && fields.contains_key("title"))
		.then_some(fields)
}

/// Whether some entry explicitly asks for `id`, so a fresh id never steals it.
fn claims_id(entries: &[Value], id: &str) -> bool {
	entries
		.iter()
		.any(|entry| entry.get("id").and_then(Value::as_str) == Some(id))
}
