use log::debug;

use super::error::StoreError;
use super::types::{Edge, NODE_HEIGHT, NODE_WIDTH, Node, NodePatch};
use crate::dialog::{Dialog, DialogRef, normalize};

/// Nodes, derived edges and the current selection.
///
/// All mutation goes through the named operations so that edges stay consistent with the
/// dialogs they are derived from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	selected: Option<String>,
	edge_seq: usize,
}

impl DocumentStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn selected_id(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub fn selected_node(&self) -> Option<&Node> {
		self.selected.as_deref().and_then(|id| self.node(id))
	}

	pub fn select(&mut self, id: Option<String>) {
		debug!("select {id:?}");
		self.selected = id;
	}

	/// Creates the centred start node, unless the document already has nodes.
	pub fn ensure_initial_node(&mut self, width: f64, height: f64) {
		if !self.nodes.is_empty() {
			return;
		}
		let description = "Click to select. Drag to move.";
		let node = Node {
			id: "node-1".to_owned(),
			title: "Start".to_owned(),
			description: Some(description.to_owned()),
			x: (width / 2.0 - NODE_WIDTH / 2.0).round(),
			y: (height / 2.0 - NODE_HEIGHT / 2.0).round(),
			dialog: Dialog::notice("Start", description),
		};
		self.selected = Some(node.id.clone());
		self.nodes.push(node);
	}

	/// Merges `patch` into the node, then links (and if needed creates) every dialog the
	/// node's dialog can open. Unknown ids are ignored.
	pub fn update(&mut self, id: &str, patch: NodePatch) {
		let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
			debug!("update of unknown node {id}");
			return;
		};
		patch.apply(node);
		let parent = node.clone();
		self.materialize(&parent);
	}

	/// Applies `edit` to a copy of the node's dialog and commits it through [`Self::update`].
	pub fn edit_dialog(&mut self, id: &str, edit: impl FnOnce(&mut Dialog)) {
		let Some(mut dialog) = self.node(id).map(|n| n.dialog.clone()) else {
			return;
		};
		edit(&mut dialog);
		self.update(id, NodePatch::dialog(dialog));
	}

	/// Position-only update, used when a drag is released.
	pub fn move_node(&mut self, id: &str, x: f64, y: f64) {
		if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
			debug!("move {id} to ({x}, {y})");
			node.x = x;
			node.y = y;
		}
	}

	pub fn rename(&mut self, old_id: &str, new_id: &str) -> Result<(), StoreError> {
		if new_id.is_empty() {
			return Err(StoreError::EmptyId);
		}
		if old_id == new_id {
			return Ok(());
		}
		if self.node(new_id).is_some() {
			return Err(StoreError::DuplicateId(new_id.to_owned()));
		}
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == old_id)
			.ok_or_else(|| StoreError::NodeNotFound(old_id.to_owned()))?;
		node.id = new_id.to_owned();
		for edge in &mut self.edges {
			if edge.from == old_id {
				edge.from = new_id.to_owned();
			}
			if edge.to == old_id {
				edge.to = new_id.to_owned();
			}
		}
		if self.selected.as_deref() == Some(old_id) {
			self.selected = Some(new_id.to_owned());
		}
		debug!("rename {old_id} -> {new_id}");
		Ok(())
	}

	/// Removes the node and every edge touching it.
	pub fn delete(&mut self, id: &str) {
		let before = self.nodes.len();
		self.nodes.retain(|n| n.id != id);
		if self.nodes.len() == before {
			return;
		}
		self.edges.retain(|e| e.from != id && e.to != id);
		if self.selected.as_deref() == Some(id) {
			self.selected = None;
		}
		debug!("delete {id}");
	}

	/// Replaces the whole document and selects the first node.
	pub fn replace_all(&mut self, nodes: Vec<Node>) {
		let selected = nodes.first().map(|n| n.id.clone());
		self.replace_all_with_selection(nodes, selected);
	}

	/// Replaces the whole document. Edges are rebuilt from references that resolve to the
	/// new nodes; nothing is materialised.
	pub fn replace_all_with_selection(&mut self, nodes: Vec<Node>, selected: Option<String>) {
		self.nodes = nodes;
		self.edges.clear();
		self.edge_seq = 0;
		self.selected = selected;

		let canonical: Vec<Dialog> = self.nodes.iter().map(|n| normalize(&n.dialog)).collect();
		let mut links = Vec::new();
		for node in &self.nodes {
			for reference in node.dialog.dialog_refs() {
				let target = match reference {
					DialogRef::Id(id) => {
						let id = id.trim();
						self.nodes.iter().find(|n| n.id == id)
					}
					DialogRef::Inline(dialog) => {
						let dialog = normalize(dialog);
						canonical
							.iter()
							.position(|c| *c == dialog)
							.map(|i| &self.nodes[i])
					}
				};
				if let Some(target) = target {
					links.push((node.id.clone(), target.id.clone()));
				}
			}
		}
		for (from, to) in links {
			self.ensure_edge(&from, &to);
		}
		debug!(
			"replaced document: {} nodes, {} edges",
			self.nodes.len(),
			self.edges.len()
		);
	}

	fn materialize(&mut self, parent: &Node) {
		let mut inline = Vec::new();
		let mut ids = Vec::new();
		for reference in parent.dialog.dialog_refs() {
			match reference {
				DialogRef::Inline(dialog) => inline.push(dialog.as_ref().clone()),
				DialogRef::Id(id) => {
					let id = id.trim();
					if !id.is_empty() {
						ids.push(id.to_owned());
					}
				}
			}
		}

		for (i, dialog) in inline.into_iter().enumerate() {
			let canonical = normalize(&dialog);
			let existing = self
				.nodes
				.iter()
				.find(|n| normalize(&n.dialog) == canonical)
				.map(|n| n.id.clone());
			let target = match existing {
				Some(id) => id,
				None => {
					let id = self.fresh_node_id();
					debug!("materialise inline dialog as {id}");
					self.nodes.push(Node {
						id: id.clone(),
						title: dialog.title_text(),
						description: None,
						x: (parent.x + 400.0 + i as f64 * 40.0).round(),
						y: (parent.y + i as f64 * 60.0).round(),
						dialog,
					});
					id
				}
			};
			self.ensure_edge(&parent.id, &target);
		}

		for (i, target) in ids.into_iter().enumerate() {
			if self.node(&target).is_none() {
				debug!("create stub node {target}");
				self.nodes.push(Node {
					id: target.clone(),
					title: target.clone(),
					description: None,
					x: (parent.x + 420.0 + i as f64 * 40.0).round(),
					y: (parent.y + 40.0 + i as f64 * 60.0).round(),
					dialog: Dialog::notice(&target, ""),
				});
			}
			self.ensure_edge(&parent.id, &target);
		}
	}

	fn ensure_edge(&mut self, from: &str, to: &str) {
		if self.edges.iter().any(|e| e.from == from && e.to == to) {
			return;
		}
		self.edge_seq += 1;
		self.edges.push(Edge {
			id: format!("edge-{}", self.edge_seq),
			from: from.to_owned(),
			to: to.to_owned(),
		});
	}

	fn fresh_node_id(&self) -> String {
		(self.nodes.len() + 1..)
			.map(|n| format!("node-{n}"))
			.find(|id| self.node(id).is_none())
			.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use serde_json::json;

	use super::*;
	use crate::dialog::{ActionDef, ClickAction, DialogType};

	fn with_action(dialog: Dialog, action: ActionDef) -> Dialog {
		let mut button = ClickAction::new("Go");
		button.action = Some(action);
		match dialog {
			Dialog::Notice(mut notice) => {
				notice.action = Some(button);
				Dialog::Notice(notice)
			}
			other => other,
		}
	}

	fn started() -> DocumentStore {
		let mut store = DocumentStore::new();
		store.ensure_initial_node(800.0, 600.0);
		store
	}

	fn child_action() -> ActionDef {
		serde_json::from_value(json!({
			"type": "show_dialog",
			"dialog": { "type": "minecraft:notice", "title": { "text": "Child" } }
		}))
		.unwrap()
	}

	#[test]
	fn initial_node_is_centred_and_selected_once() {
		let mut store = started();
		assert_eq!(store.nodes().len(), 1);
		let node = &store.nodes()[0];
		assert_eq!((node.x, node.y), (320.0, 260.0));
		assert_eq!(node.dialog.dialog_type(), DialogType::Notice);
		assert_eq!(store.selected_id(), Some("node-1"));

		store.ensure_initial_node(100.0, 100.0);
		assert_eq!(store.nodes().len(), 1);
		assert_eq!(store.nodes()[0].x, 320.0);
	}

	#[test]
	fn inline_show_dialog_materialises_once() {
		let mut store = started();
		let dialog = with_action(Dialog::notice("Start", ""), child_action());

		store.update("node-1", NodePatch::dialog(dialog.clone()));
		assert_eq!(store.nodes().len(), 2);
		let child = &store.nodes()[1];
		assert_eq!(child.id, "node-2");
		assert_eq!(child.title, "Child");
		assert_eq!((child.x, child.y), (720.0, 260.0));
		assert_eq!(store.edges().len(), 1);
		assert_eq!(store.edges()[0].from, "node-1");
		assert_eq!(store.edges()[0].to, "node-2");

		store.update("node-1", NodePatch::dialog(dialog));
		assert_eq!(store.nodes().len(), 2);
		assert_eq!(store.edges().len(), 1);
	}

	#[test]
	fn inline_dedup_ignores_default_valued_fields() {
		let mut store = started();
		let first = with_action(Dialog::notice("Start", ""), child_action());
		store.update("node-1", NodePatch::dialog(first));

		let padded: ActionDef = serde_json::from_value(json!({
			"type": "show_dialog",
			"dialog": {
				"pause": true,
				"title": { "text": "Child" },
				"type": "minecraft:notice",
				"inputs": []
			}
		}))
		.unwrap();
		let second = with_action(Dialog::notice("Start", ""), padded);
		store.update("node-1", NodePatch::dialog(second));
		assert_eq!(store.nodes().len(), 2);
		assert_eq!(store.edges().len(), 1);
	}

	#[test]
	fn string_reference_links_or_creates_stub() {
		let mut store = started();
		let dialog = with_action(
			Dialog::notice("Start", ""),
			ActionDef::ShowDialog {
				dialog: DialogRef::Id(" ns:next ".into()),
			},
		);
		store.update("node-1", NodePatch::dialog(dialog));
		let stub = store.node("ns:next").expect("stub created");
		assert_eq!(stub.title, "ns:next");
		assert_eq!(stub.dialog.title_text(), "ns:next");
		assert_eq!((stub.x, stub.y), (740.0, 300.0));
		assert_eq!(store.edges().len(), 1);
	}

	#[test]
	fn blank_string_reference_is_ignored() {
		let mut store = started();
		let dialog = with_action(
			Dialog::notice("Start", ""),
			ActionDef::ShowDialog {
				dialog: DialogRef::Id("   ".into()),
			},
		);
		store.update("node-1", NodePatch::dialog(dialog));
		assert_eq!(store.nodes().len(), 1);
		assert!(store.edges().is_empty());
	}

	#[test]
	fn dialog_list_entries_are_linked() {
		let mut store = started();
		store.edit_dialog("node-1", |d| {
			let mut list = d.clone().with_type(DialogType::DialogList);
			if let Dialog::DialogList(l) = &mut list {
				l.dialogs.push(DialogRef::Id("a".into()));
				l.dialogs.push(DialogRef::Id("b".into()));
				l.dialogs.push(DialogRef::Inline(Box::new(Dialog::notice("c", ""))));
			}
			*d = list;
		});
		let ids: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["node-1", "node-2", "a", "b"]);
		assert_eq!(store.edges().len(), 3);
		let edge_ids: Vec<&str> = store.edges().iter().map(|e| e.id.as_str()).collect();
		assert_eq!(edge_ids, vec!["edge-1", "edge-2", "edge-3"]);
	}

	#[test]
	fn update_unknown_node_is_a_no_op() {
		let mut store = started();
		let before = store.clone();
		store.update("missing", NodePatch::title("x"));
		assert_eq!(store, before);
	}

	#[test]
	fn fresh_ids_skip_taken_ones() {
		let mut store = started();
		store
			.rename("node-1", "node-2")
			.expect("rename to free id");
		let dialog = with_action(Dialog::notice("Start", ""), child_action());
		store.update("node-2", NodePatch::dialog(dialog));
		assert_eq!(store.nodes()[1].id, "node-3");
	}

	#[test]
	fn rename_keeps_selection_and_edges() {
		let mut store = started();
		let dialog = with_action(Dialog::notice("Start", ""), child_action());
		store.update("node-1", NodePatch::dialog(dialog));

		store.rename("node-1", "intro").unwrap();
		assert_eq!(store.selected_id(), Some("intro"));
		assert_eq!(store.edges()[0].from, "intro");

		store.select(Some("node-2".into()));
		store.rename("node-2", "child").unwrap();
		assert_eq!(store.selected_id(), Some("child"));
		assert_eq!(store.edges()[0].to, "child");
	}

	#[test]
	fn rename_rejects_empty_and_taken_ids() {
		let mut store = started();
		store.update(
			"node-1",
			NodePatch::dialog(with_action(Dialog::notice("Start", ""), child_action())),
		);
		assert_eq!(store.rename("node-1", ""), Err(StoreError::EmptyId));
		assert_eq!(
			store.rename("node-1", "node-2"),
			Err(StoreError::DuplicateId("node-2".into()))
		);
		assert_eq!(
			store.rename("nope", "x"),
			Err(StoreError::NodeNotFound("nope".into()))
		);
		assert_eq!(store.rename("node-1", "node-1"), Ok(()));
	}

	#[test]
	fn delete_clears_selection_and_incident_edges() {
		let mut store = started();
		store.update(
			"node-1",
			NodePatch::dialog(with_action(Dialog::notice("Start", ""), child_action())),
		);
		store.delete("node-1");
		assert!(store.node("node-1").is_none());
		assert!(store.edges().is_empty());
		assert_eq!(store.selected_id(), None);
	}

	#[test]
	fn move_node_does_not_rescan() {
		let mut store = started();
		store.move_node("node-1", 5.0, 7.0);
		let node = store.node("node-1").unwrap();
		assert_eq!((node.x, node.y), (5.0, 7.0));
		assert!(store.edges().is_empty());
	}

	#[test]
	fn replace_all_selects_first_and_relinks() {
		let mut store = started();
		let parent = Node {
			id: "p".into(),
			title: "P".into(),
			description: None,
			x: 0.0,
			y: 0.0,
			dialog: with_action(
				Dialog::notice("P", ""),
				ActionDef::ShowDialog {
					dialog: DialogRef::Id("q".into()),
				},
			),
		};
		let child = Node {
			id: "q".into(),
			title: "Q".into(),
			description: None,
			x: 0.0,
			y: 0.0,
			dialog: Dialog::notice("Q", ""),
		};
		let dangling = Node {
			id: "r".into(),
			title: "R".into(),
			description: None,
			x: 0.0,
			y: 0.0,
			dialog: with_action(
				Dialog::notice("R", ""),
				ActionDef::ShowDialog {
					dialog: DialogRef::Id("missing".into()),
				},
			),
		};
		store.replace_all(vec![parent, child, dangling]);
		assert_eq!(store.selected_id(), Some("p"));
		assert_eq!(store.nodes().len(), 3);
		assert_eq!(
			store.edges(),
			&[Edge {
				id: "edge-1".into(),
				from: "p".into(),
				to: "q".into()
			}]
		);

		store.replace_all_with_selection(Vec::new(), None);
		assert!(store.nodes().is_empty());
		assert_eq!(store.selected_id(), None);
	}

	fn arb_store() -> impl Strategy<Value = (DocumentStore, usize)> {
		(proptest::collection::vec((0usize..6, 0usize..6), 0..12), 0usize..6).prop_map(
			|(pairs, victim)| {
				let nodes = (0..6)
					.map(|i| Node {
						id: format!("n{i}"),
						title: format!("N{i}"),
						description: None,
						x: 0.0,
						y: 0.0,
						dialog: Dialog::notice(&format!("N{i}"), ""),
					})
					.collect();
				let mut store = DocumentStore::new();
				store.replace_all(nodes);
				for (from, to) in pairs {
					store.ensure_edge(&format!("n{from}"), &format!("n{to}"));
				}
				(store, victim)
			},
		)
	}

	proptest! {
		#[test]
		fn delete_removes_exactly_incident_edges((mut store, victim) in arb_store()) {
			let id = format!("n{victim}");
			let expected: Vec<Edge> = store
				.edges()
				.iter()
				.filter(|e| e.from != id && e.to != id)
				.cloned()
				.collect();
			store.delete(&id);
			prop_assert_eq!(store.edges(), expected.as_slice());
		}

		#[test]
		fn rename_of_selected_node_moves_selection((mut store, victim) in arb_store()) {
			let id = format!("n{victim}");
			store.select(Some(id.clone()));
			store.rename(&id, "renamed").unwrap();
			prop_assert_eq!(store.selected_id(), Some("renamed"));
		}
	}
}
