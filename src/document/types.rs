use crate::dialog::Dialog;

/// Size of a node box on the canvas, in world units.
pub const NODE_WIDTH: f64 = 160.0;
pub const NODE_HEIGHT: f64 = 80.0;

/// A dialog placed on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
	pub x: f64,
	pub y: f64,
	pub dialog: Dialog,
}

/// "`from` can open `to`". Derived from dialog references, never authored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	pub id: String,
	pub from: String,
	pub to: String,
}

/// Fields to merge into a node; `None` leaves the field unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodePatch {
	pub title: Option<String>,
	pub description: Option<Option<String>>,
	pub dialog: Option<Dialog>,
}

impl NodePatch {
	pub fn dialog(dialog: Dialog) -> Self {
		Self {
			dialog: Some(dialog),
			..Self::default()
		}
	}

	pub fn title(title: impl Into<String>) -> Self {
		Self {
			title: Some(title.into()),
			..Self::default()
		}
	}

	pub fn description(description: Option<String>) -> Self {
		Self {
			description: Some(description),
			..Self::default()
		}
	}

	pub(crate) fn apply(self, node: &mut Node) {
		if let Some(title) = self.title {
			node.title = title;
		}
		if let Some(description) = self.description {
			node.description = description;
		}
		if let Some(dialog) = self.dialog {
			node.dialog = dialog;
		}
	}
}
