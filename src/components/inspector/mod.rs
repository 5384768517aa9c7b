mod action_editor;
mod body_editor;
mod coerce;
mod component;
mod debounce;
mod dialog_form;
mod text_editor;

use leptos::prelude::*;

use crate::dialog::Dialog;
use crate::document::{DocumentStore, Node, NodePatch};

pub use component::Inspector;

/// The node an inspector form edits. Every write goes through the store's operations.
#[derive(Clone, Copy)]
pub struct NodeHandle {
	store: RwSignal<DocumentStore>,
	id: StoredValue<String>,
}

impl NodeHandle {
	pub fn new(store: RwSignal<DocumentStore>, id: String) -> Self {
		Self {
			store,
			id: StoredValue::new(id),
		}
	}

	pub fn id(&self) -> String {
		self.id.get_value()
	}

	/// Reads the node, tracking the store.
	pub fn with<R>(&self, f: impl FnOnce(&Node) -> R) -> Option<R> {
		let id = self.id.get_value();
		self.store.with(|doc| doc.node(&id).map(f))
	}

	pub fn update(&self, patch: NodePatch) {
		let id = self.id.get_value();
		self.store.update(|doc| doc.update(&id, patch));
	}

	pub fn edit_dialog(&self, edit: impl FnOnce(&mut Dialog)) {
		let Some(id) = self.id.try_get_value() else {
			return;
		};
		self.store.update(|doc| doc.edit_dialog(&id, edit));
	}

	/// A memoised copy of the node's dialog; downstream memos narrow it further.
	pub fn dialog(&self) -> Memo<Dialog> {
		let handle = *self;
		Memo::new(move |_| handle.with(|n| n.dialog.clone()).unwrap_or_default())
	}
}
