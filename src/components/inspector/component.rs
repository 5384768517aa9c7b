use leptos::ev;
use leptos::prelude::*;
use log::{debug, warn};

use super::NodeHandle;
use super::dialog_form::DialogForm;
use crate::components::file_io::{export_document, import_document};
use crate::components::{alert, use_config, use_store};
use crate::config::INSPECTOR_WIDTH_KEY;
use crate::document::NodePatch;

fn local_storage() -> Option<web_sys::Storage> {
	web_sys::window()?.local_storage().ok().flatten()
}

/// Side panel editing the selected node.
#[component]
pub fn Inspector() -> impl IntoView {
	let store = use_store();
	let config = use_config();
	let selected = Memo::new(move |_| store.with(|doc| doc.selected_id().map(str::to_owned)));

	let stored = local_storage().and_then(|s| s.get_item(INSPECTOR_WIDTH_KEY).ok().flatten());
	let width = RwSignal::new(config.inspector_width_from_storage(stored.as_deref()));
	Effect::new(move |_| {
		let width = width.get();
		if let Some(storage) = local_storage()
			&& storage.set_item(INSPECTOR_WIDTH_KEY, &width.to_string()).is_err()
		{
			warn!("could not persist inspector width");
		}
	});

	// (pointer x, width) at the start of a resize drag.
	let drag = StoredValue::new(None::<(f64, f64)>);
	let move_config = config.clone();
	let on_move = window_event_listener(ev::mousemove, move |ev| {
		if let Some((start_x, start_width)) = drag.get_value() {
			// Dragging left widens the panel.
			let next = (start_width + start_x - ev.client_x() as f64).round();
			width.set(move_config.clamp_inspector_width(next));
		}
	});
	let on_up = window_event_listener(ev::mouseup, move |_| drag.set_value(None));
	on_cleanup(move || {
		on_move.remove();
		on_up.remove();
	});

	let begin_resize = move |ev: ev::MouseEvent| {
		ev.prevent_default();
		ev.stop_propagation();
		drag.set_value(Some((ev.client_x() as f64, width.get_untracked())));
	};

	let file_name = config.export_file_name;
	let file_buttons = move || {
		view! {
			<button type="button" on:click=move |_| import_document(store)>
				"Import"
			</button>
			<button type="button" on:click=move |_| export_document(store, file_name)>
				"Export"
			</button>
		}
	};

	let content = move || match selected.get() {
		None => view! {
			<div class="inspector-empty">
				<p class="hint">"Select a node to edit it."</p>
				<div class="button-row">{file_buttons()}</div>
			</div>
		}
		.into_any(),
		Some(id) => {
			let handle = NodeHandle::new(store, id);
			view! {
				<div class="inspector-header">
					<h3>"Inspector"</h3>
					<div class="button-row">
						{file_buttons()}
						<button
							type="button"
							class="danger"
							on:click=move |_| {
								let id = handle.id();
								debug!("deleting {id}");
								store.update(|doc| doc.delete(&id));
							}
						>
							"Delete"
						</button>
					</div>
				</div>
				<NodeFields handle />
				<DialogForm handle />
			}
			.into_any()
		}
	};

	view! {
		<aside class="inspector" style:width=move || format!("{}px", width.get())>
			<div class="inspector-resizer" title="Drag to resize" on:mousedown=begin_resize></div>
			{content}
		</aside>
	}
}

/// Id, title and description of the node itself.
#[component]
fn NodeFields(handle: NodeHandle) -> impl IntoView {
	let store = use_store();

	view! {
		<div class="node-fields">
			<label>
				<div class="field-label">"ID"</div>
				<input
					prop:value=move || handle.id()
					on:change=move |ev| {
						let new_id = event_target_value(&ev);
						if new_id.is_empty() {
							return;
						}
						let old_id = handle.id();
						let mut result = Ok(());
						store.update(|doc| result = doc.rename(&old_id, &new_id));
						if let Err(err) = result {
							warn!("rename {old_id} -> {new_id} failed: {err}");
							alert(&err.to_string());
						}
					}
				/>
			</label>
			<label>
				<div class="field-label">"Title"</div>
				<input
					prop:value=move || handle.with(|n| n.title.clone()).unwrap_or_default()
					on:change=move |ev| handle.update(NodePatch::title(event_target_value(&ev)))
				/>
			</label>
			<label>
				<div class="field-label">"Description"</div>
				<input
					prop:value=move || {
						handle.with(|n| n.description.clone().unwrap_or_default()).unwrap_or_default()
					}
					on:change=move |ev| {
						let text = event_target_value(&ev);
						handle.update(NodePatch::description(Some(text).filter(|t| !t.is_empty())));
					}
				/>
			</label>
		</div>
	}
}
