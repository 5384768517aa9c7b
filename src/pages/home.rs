use leptos::prelude::*;

use crate::components::inspector::Inspector;
use crate::components::node_canvas::NodeCanvas;
use crate::components::provide_editor_context;
use crate::config::EditorConfig;

/// The editor: graph canvas on the left, inspector on the right.
#[component]
pub fn Home() -> impl IntoView {
	provide_editor_context(EditorConfig::default());

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="app-container">
				<div class="canvas-pane">
					<NodeCanvas />
					<div class="canvas-overlay">
						<p class="subtitle">
							"Drag nodes to move them. Drag the background to pan. Scroll to zoom."
						</p>
					</div>
				</div>
				<Inspector />
			</div>
		</ErrorBoundary>
	}
}
