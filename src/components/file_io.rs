//! Import and export through the host shell when it exposes `window.electronAPI`, otherwise
//! through a file picker and a download link.

use js_sys::{Array, Function, Promise, Reflect};
use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, FileReader, HtmlAnchorElement, HtmlInputElement, Url};

use super::alert;
use crate::document::{DocumentStore, export_json, parse_import};

/// A method on the host API object, with the object to call it on.
fn host_method(name: &str) -> Option<(JsValue, Function)> {
	let window = web_sys::window()?;
	let api = Reflect::get(&window, &JsValue::from_str("electronAPI")).ok()?;
	if api.is_undefined() || api.is_null() {
		return None;
	}
	let method = Reflect::get(&api, &JsValue::from_str(name))
		.ok()?
		.dyn_into::<Function>()
		.ok()?;
	Some((api, method))
}

/// Parses `text` and swaps it in, or reports the failure and leaves the document as is.
fn apply_import(store: RwSignal<DocumentStore>, text: &str) {
	match parse_import(text) {
		Ok(nodes) => store.update(|doc| doc.replace_all(nodes)),
		Err(err) => {
			error!("import failed: {err}");
			alert(&format!("Failed to import JSON: {err}"));
		}
	}
}

pub fn import_document(store: RwSignal<DocumentStore>) {
	if let Some((api, open_json)) = host_method("openJson") {
		import_from_host(store, &api, &open_json);
	} else {
		import_from_picker(store);
	}
}

fn import_from_host(store: RwSignal<DocumentStore>, api: &JsValue, open_json: &Function) {
	let promise = match open_json.call0(api).map(Promise::from) {
		Ok(promise) => promise,
		Err(err) => {
			error!("openJson failed: {err:?}");
			return;
		}
	};
	let on_done = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
		match value.as_string() {
			Some(text) => apply_import(store, &text),
			None => info!("import cancelled"),
		}
	});
	let on_error = Closure::<dyn FnMut(JsValue)>::new(move |err: JsValue| {
		error!("openJson rejected: {err:?}");
		alert("Failed to import JSON: could not read file");
	});
	let _ = promise.then2(&on_done, &on_error);
	// The host resolves once; both callbacks live for the page.
	on_done.forget();
	on_error.forget();
}

fn import_from_picker(store: RwSignal<DocumentStore>) {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		return;
	};
	let input = match document
		.create_element("input")
		.map(|el| el.dyn_into::<HtmlInputElement>())
	{
		Ok(Ok(input)) => input,
		_ => {
			warn!("could not create file input");
			return;
		}
	};
	input.set_type("file");
	input.set_accept("application/json,.json");

	let picker = input.clone();
	let on_change = Closure::<dyn FnMut()>::new(move || {
		let Some(file) = picker.files().and_then(|files| files.get(0)) else {
			return;
		};
		let reader = match FileReader::new() {
			Ok(reader) => reader,
			Err(err) => {
				error!("FileReader unavailable: {err:?}");
				return;
			}
		};
		let loaded = reader.clone();
		let on_load = Closure::<dyn FnMut()>::new(move || {
			match loaded.result().ok().and_then(|v| v.as_string()) {
				Some(text) => apply_import(store, &text),
				None => alert("Failed to import JSON: could not read file"),
			}
		});
		reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
		on_load.forget();
		if let Err(err) = reader.read_as_text(&file) {
			error!("read_as_text failed: {err:?}");
		}
	});
	input.set_onchange(Some(on_change.as_ref().unchecked_ref()));
	on_change.forget();
	input.click();
}

pub fn export_document(store: RwSignal<DocumentStore>, file_name: &str) {
	let payload = match store.with_untracked(export_json) {
		Ok(payload) => payload,
		Err(err) => {
			error!("export failed: {err}");
			alert(&format!("Failed to export JSON: {err}"));
			return;
		}
	};
	if let Some((api, save_json)) = host_method("saveJson") {
		if let Err(err) = save_json.call1(&api, &JsValue::from_str(&payload)) {
			error!("saveJson failed: {err:?}");
		}
		return;
	}
	if let Err(err) = download(&payload, file_name) {
		error!("download failed: {err:?}");
		alert("Failed to export JSON");
	}
}

fn download(payload: &str, file_name: &str) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let document = window
		.document()
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let parts = Array::of1(&JsValue::from_str(payload));
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	body.append_child(&anchor)?;
	anchor.click();
	anchor.remove();
	Url::revoke_object_url(&url)?;
	info!("downloaded {file_name}");
	Ok(())
}
