use crate::config::EditorConfig;
use crate::document::Node;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_id: Option<String>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
	pub node_x: f64,
	pub node_y: f64,
	/// Set once the pointer has left the threshold radius.
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// View-local canvas state. Nothing here is part of the document.
#[derive(Clone, Debug)]
pub struct CanvasState {
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	config: EditorConfig,
}

impl CanvasState {
	pub fn new(width: f64, height: f64, config: EditorConfig) -> Self {
		Self {
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			config,
		}
	}

	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node whose box contains the screen point. Later nodes are drawn on top.
	pub fn node_at_position<'a>(&self, nodes: &'a [Node], sx: f64, sy: f64) -> Option<&'a Node> {
		let (wx, wy) = self.screen_to_world(sx, sy);
		nodes.iter().rev().find(|node| {
			let (x, y) = self.node_position(node);
			wx >= x
				&& wx <= x + self.config.node_width
				&& wy >= y && wy <= y + self.config.node_height
		})
	}

	/// Where `node` is drawn: the drag preview while it is being dragged.
	pub fn node_position(&self, node: &Node) -> (f64, f64) {
		match &self.drag.node_id {
			Some(id) if *id == node.id && self.drag.moved => (self.drag.node_x, self.drag.node_y),
			_ => (node.x, node.y),
		}
	}

	pub fn begin_drag(&mut self, node: &Node, sx: f64, sy: f64) {
		self.drag = DragState {
			node_id: Some(node.id.clone()),
			start_x: sx,
			start_y: sy,
			node_start_x: node.x,
			node_start_y: node.y,
			node_x: node.x,
			node_y: node.y,
			moved: false,
		};
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.drag.node_id.is_some() {
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			if !self.drag.moved && dx.hypot(dy) >= self.config.drag_threshold {
				self.drag.moved = true;
			}
			self.drag.node_x = self.drag.node_start_x + dx / self.transform.k;
			self.drag.node_y = self.drag.node_start_y + dy / self.transform.k;
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Ends any gesture. Returns the node id and rounded position to commit when a drag
	/// travelled past the threshold.
	pub fn finish(&mut self) -> Option<(String, f64, f64)> {
		let drag = std::mem::take(&mut self.drag);
		self.pan.active = false;
		let id = drag.node_id?;
		drag.moved
			.then(|| (id, drag.node_x.round(), drag.node_y.round()))
	}

	pub fn cancel(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}

	/// Zooms by one wheel step about the screen point `(px, py)`, which stays fixed.
	pub fn zoom_at(&mut self, px: f64, py: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 {
			self.config.zoom_out_factor
		} else {
			self.config.zoom_in_factor
		};
		let new_k = (self.transform.k * factor).clamp(self.config.min_zoom, self.config.max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = px - (px - self.transform.x) * ratio;
		self.transform.y = py - (py - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::dialog::Dialog;

	fn node(id: &str, x: f64, y: f64) -> Node {
		Node {
			id: id.into(),
			title: id.into(),
			description: None,
			x,
			y,
			dialog: Dialog::notice(id, ""),
		}
	}

	fn state() -> CanvasState {
		CanvasState::new(800.0, 600.0, EditorConfig::default())
	}

	#[test]
	fn hit_test_prefers_topmost_node() {
		let nodes = vec![node("below", 0.0, 0.0), node("above", 100.0, 40.0)];
		let s = state();
		assert_eq!(s.node_at_position(&nodes, 120.0, 50.0).unwrap().id, "above");
		assert_eq!(s.node_at_position(&nodes, 10.0, 10.0).unwrap().id, "below");
		assert!(s.node_at_position(&nodes, 500.0, 500.0).is_none());
	}

	#[test]
	fn hit_test_follows_pan_and_zoom() {
		let nodes = vec![node("a", 0.0, 0.0)];
		let mut s = state();
		s.transform = ViewTransform {
			x: 100.0,
			y: 100.0,
			k: 2.0,
		};
		assert!(s.node_at_position(&nodes, 50.0, 50.0).is_none());
		assert!(s.node_at_position(&nodes, 400.0, 250.0).is_some());
	}

	#[test]
	fn short_drag_is_a_click() {
		let n = node("a", 10.0, 10.0);
		let mut s = state();
		s.begin_drag(&n, 20.0, 20.0);
		s.pointer_move(23.0, 23.0);
		assert_eq!(s.node_position(&n), (10.0, 10.0));
		assert_eq!(s.finish(), None);
		assert_eq!(s.drag.node_id, None);
	}

	#[test]
	fn drag_commits_rounded_world_position() {
		let n = node("a", 10.0, 10.0);
		let mut s = state();
		s.transform.k = 2.0;
		s.begin_drag(&n, 0.0, 0.0);
		s.pointer_move(41.0, -21.0);
		assert_eq!(s.node_position(&n), (30.5, -0.5));
		assert_eq!(s.finish(), Some(("a".to_string(), 31.0, -1.0)));
	}

	#[test]
	fn pan_moves_transform() {
		let mut s = state();
		s.begin_pan(10.0, 10.0);
		s.pointer_move(40.0, -5.0);
		assert_eq!((s.transform.x, s.transform.y), (30.0, -15.0));
		s.cancel();
		s.pointer_move(100.0, 100.0);
		assert_eq!((s.transform.x, s.transform.y), (30.0, -15.0));
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		for _ in 0..100 {
			s.zoom_at(0.0, 0.0, -1.0);
		}
		assert_eq!(s.transform.k, 10.0);
		for _ in 0..200 {
			s.zoom_at(0.0, 0.0, 1.0);
		}
		assert_eq!(s.transform.k, 0.1);
	}

	proptest! {
		#[test]
		fn zoom_keeps_point_under_pointer(
			px in 0.0f64..800.0,
			py in 0.0f64..600.0,
			tx in -500.0f64..500.0,
			ty in -500.0f64..500.0,
			k in 0.1f64..10.0,
			delta in -100.0f64..100.0,
		) {
			let mut s = state();
			s.transform = ViewTransform { x: tx, y: ty, k };
			let (wx, wy) = s.screen_to_world(px, py);
			s.zoom_at(px, py, delta);
			let sx = s.transform.x + wx * s.transform.k;
			let sy = s.transform.y + wy * s.transform.k;
			prop_assert!((sx - px).abs() < 1e-6);
			prop_assert!((sy - py).abs() < 1e-6);
		}
	}
}
