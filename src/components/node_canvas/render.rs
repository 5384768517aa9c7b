use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::CanvasState;
use crate::document::{Edge, Node};

const CANVAS_BG: &str = "#f6f7fb";
const GRID_COLOR: &str = "#e5e7eb";
const EDGE_COLOR: &str = "rgba(99, 102, 241, 0.7)";
const CORNER_RADIUS: f64 = 10.0;

pub fn render(
	state: &CanvasState,
	nodes: &[Node],
	edges: &[Edge],
	selected: Option<&str>,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_fill_style_str(CANVAS_BG);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, nodes, edges, ctx);
	draw_nodes(state, nodes, selected, ctx);
	ctx.restore();
}

/// First grid line at or before the screen origin for a given pan offset.
fn grid_offset(pan: f64, gap: f64) -> f64 {
	-((-pan).rem_euclid(gap))
}

fn draw_grid(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let gap = state.config().grid_gap * state.transform.k;
	if gap < 4.0 {
		return;
	}
	ctx.set_fill_style_str(GRID_COLOR);
	let mut x = grid_offset(state.transform.x, gap);
	while x <= state.width {
		ctx.fill_rect(x, 0.0, 1.0, state.height);
		x += gap;
	}
	let mut y = grid_offset(state.transform.y, gap);
	while y <= state.height {
		ctx.fill_rect(0.0, y, state.width, 1.0);
		y += gap;
	}
}

/// Distance from a box centre to its border along the unit direction `(ux, uy)`.
fn box_exit(ux: f64, uy: f64, half_w: f64, half_h: f64) -> f64 {
	let tx = if ux.abs() > f64::EPSILON {
		half_w / ux.abs()
	} else {
		f64::INFINITY
	};
	let ty = if uy.abs() > f64::EPSILON {
		half_h / uy.abs()
	} else {
		f64::INFINITY
	};
	tx.min(ty)
}

fn draw_edges(
	state: &CanvasState,
	nodes: &[Node],
	edges: &[Edge],
	ctx: &CanvasRenderingContext2d,
) {
	let k = state.transform.k;
	let (w, h) = (state.config().node_width, state.config().node_height);
	let (line_width, dash, gap, arrow_size) = (1.5 / k.max(0.5), 8.0, 4.0, 10.0);
	let centre = |id: &str| {
		nodes.iter().find(|n| n.id == id).map(|n| {
			let (x, y) = state.node_position(n);
			(x + w / 2.0, y + h / 2.0)
		})
	};

	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_fill_style_str(EDGE_COLOR);
	ctx.set_line_width(line_width);
	for edge in edges {
		let (Some((x1, y1)), Some((x2, y2))) = (centre(&edge.from), centre(&edge.to)) else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = dx.hypot(dy);
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let exit = box_exit(ux, uy, w / 2.0, h / 2.0);
		if dist <= exit * 2.0 {
			continue;
		}

		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.begin_path();
		ctx.move_to(x1 + ux * exit, y1 + uy * exit);
		ctx.line_to(x2 - ux * (exit + arrow_size), y2 - uy * (exit + arrow_size));
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		let (tip_x, tip_y) = (x2 - ux * exit, y2 - uy * exit);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

/// Cuts `text` to fit `max_width`, appending an ellipsis when shortened.
fn fit_text(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> String {
	let width = |s: &str| ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0);
	if width(text) <= max_width {
		return text.to_owned();
	}
	let mut chars: Vec<char> = text.chars().collect();
	while !chars.is_empty() {
		chars.pop();
		let candidate: String = chars.iter().chain(['…'].iter()).collect();
		if width(&candidate) <= max_width {
			return candidate;
		}
	}
	String::new()
}

fn draw_nodes(
	state: &CanvasState,
	nodes: &[Node],
	selected: Option<&str>,
	ctx: &CanvasRenderingContext2d,
) {
	let (w, h) = (state.config().node_width, state.config().node_height);
	for node in nodes {
		let (x, y) = state.node_position(node);
		let is_selected = selected == Some(node.id.as_str());

		ctx.set_shadow_color("rgba(0, 0, 0, 0.08)");
		ctx.set_shadow_blur(8.0);
		ctx.set_shadow_offset_y(2.0);
		rounded_rect(ctx, x, y, w, h, CORNER_RADIUS);
		ctx.set_fill_style_str(if is_selected { "#ffffff" } else { "#fafafa" });
		ctx.fill();
		ctx.set_shadow_color("transparent");
		ctx.set_stroke_style_str(if is_selected { "#6366f1" } else { "#d1d5db" });
		ctx.set_line_width(if is_selected { 2.0 } else { 1.0 });
		ctx.stroke();

		ctx.set_fill_style_str("#111827");
		ctx.set_font("bold 16px sans-serif");
		let title = fit_text(ctx, &node.title, w - 24.0);
		let _ = ctx.fill_text(&title, x + 12.0, y + 26.0);

		if let Some(description) = node.description.as_deref().filter(|d| !d.is_empty()) {
			ctx.set_fill_style_str("#374151");
			ctx.set_font("12px sans-serif");
			let description = fit_text(ctx, description, w - 24.0);
			let _ = ctx.fill_text(&description, x + 12.0, y + 48.0);
		}

		ctx.set_fill_style_str("#6b7280");
		ctx.set_font("10px sans-serif");
		let _ = ctx.fill_text(node.dialog.dialog_type().label(), x + 12.0, y + h - 10.0);
	}
}
