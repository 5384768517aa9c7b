//! Editor tunables shared through Leptos context.

/// `localStorage` key holding the inspector width in pixels.
pub const INSPECTOR_WIDTH_KEY: &str = "inspectorWidth";

#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
	pub node_width: f64,
	pub node_height: f64,
	pub grid_gap: f64,
	/// Screen pixels a node must travel before a release counts as a move.
	pub drag_threshold: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub zoom_out_factor: f64,
	pub zoom_in_factor: f64,
	pub text_debounce_ms: u64,
	pub inspector_min_width: f64,
	pub inspector_max_width: f64,
	pub inspector_default_width: f64,
	pub export_file_name: &'static str,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			node_width: crate::document::NODE_WIDTH,
			node_height: crate::document::NODE_HEIGHT,
			grid_gap: 24.0,
			drag_threshold: 6.0,
			min_zoom: 0.1,
			max_zoom: 10.0,
			zoom_out_factor: 0.9,
			zoom_in_factor: 1.1,
			text_debounce_ms: 200,
			inspector_min_width: 240.0,
			inspector_max_width: 720.0,
			inspector_default_width: 300.0,
			export_file_name: "dialog-nodes.json",
		}
	}
}

impl EditorConfig {
	pub fn clamp_inspector_width(&self, width: f64) -> f64 {
		if !width.is_finite() {
			return self.inspector_default_width;
		}
		width.clamp(self.inspector_min_width, self.inspector_max_width)
	}

	/// Reads a persisted width; anything unparsable yields the default.
	pub fn inspector_width_from_storage(&self, stored: Option<&str>) -> f64 {
		stored
			.and_then(|s| s.trim().parse::<f64>().ok())
			.map(|w| self.clamp_inspector_width(w))
			.unwrap_or(self.inspector_default_width)
	}
}
