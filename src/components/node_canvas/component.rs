use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::CanvasState;
use crate::components::{use_config, use_store};

type SharedState = Rc<RefCell<Option<CanvasState>>>;

fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0))
}

fn pointer_position(canvas: Option<HtmlCanvasElement>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let rect = canvas?.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// The graph view: pans, zooms, drags nodes and selects them.
#[component]
pub fn NodeCanvas() -> impl IntoView {
	let store = use_store();
	let config = use_config();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = container_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok(),
			_ => None,
		};
		let Some(ctx) = ctx else {
			warn!("canvas 2d context unavailable");
			return;
		};
		*state_init.borrow_mut() = Some(CanvasState::new(w, h, config.clone()));
		store.update(|doc| doc.ensure_initial_node(w, h));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = container_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(s) = state_resize.borrow_mut().as_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(cb) = resize_cb_init.borrow().as_ref() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(s) = state_anim.borrow().as_ref() {
				store.try_with_untracked(|doc| {
					render::render(s, doc.nodes(), doc.edges(), doc.selected_id(), &ctx)
				});
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(cb) = animate_init.borrow().as_ref() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref.get_untracked(), &ev) else {
			return;
		};
		let mut guard = state_md.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};
		let hit = store.with_untracked(|doc| s.node_at_position(doc.nodes(), x, y).cloned());
		match hit {
			Some(node) => {
				s.begin_drag(&node, x, y);
				store.update(|doc| doc.select(Some(node.id)));
			}
			None => {
				s.begin_pan(x, y);
				store.update(|doc| doc.select(None));
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref.get_untracked(), &ev) else {
			return;
		};
		if let Some(s) = state_mm.borrow_mut().as_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let committed = state_mu.borrow_mut().as_mut().and_then(CanvasState::finish);
		if let Some((id, x, y)) = committed {
			store.update(|doc| doc.move_node(&id, x, y));
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(s) = state_ml.borrow_mut().as_mut() {
			s.cancel();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref.get_untracked(), &ev) else {
			return;
		};
		if let Some(s) = state_wh.borrow_mut().as_mut() {
			s.zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="node-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
