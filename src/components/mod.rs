//! View components and the context they share.

use leptos::prelude::*;
use log::warn;

use crate::config::EditorConfig;
use crate::document::DocumentStore;

pub mod file_io;
pub mod inspector;
pub mod node_canvas;

/// The single document store, provided once by the page.
#[derive(Clone, Copy)]
pub struct StoreContext(pub RwSignal<DocumentStore>);

pub fn provide_editor_context(config: EditorConfig) -> RwSignal<DocumentStore> {
	let store = RwSignal::new(DocumentStore::new());
	provide_context(StoreContext(store));
	provide_context(config);
	store
}

pub fn use_store() -> RwSignal<DocumentStore> {
	expect_context::<StoreContext>().0
}

pub fn use_config() -> EditorConfig {
	use_context::<EditorConfig>().unwrap_or_default()
}

/// Blocking user-facing message.
pub fn alert(message: &str) {
	let shown = web_sys::window().is_some_and(|w| w.alert_with_message(message).is_ok());
	if !shown {
		warn!("alert not shown: {message}");
	}
}
