use leptos::prelude::*;

use super::coerce::parse_optional_clamped;
use super::text_editor::TextEditor;
use crate::dialog::{
	ActionDef, ActionKind, ClickAction, DEFAULT_BUTTON_WIDTH, DialogRef, MAX_BUTTON_WIDTH,
	MIN_BUTTON_WIDTH, Text,
};

fn edit_action(
	value: Signal<Option<ClickAction>>,
	on_change: Callback<Option<ClickAction>>,
	edit: impl FnOnce(&mut ClickAction),
) {
	let mut action = value.get_untracked().unwrap_or_default();
	edit(&mut action);
	on_change.run(Some(action));
}

/// Editor for one optional button slot.
#[component]
pub fn ClickActionEditor(
	label: &'static str,
	#[prop(into)] value: Signal<Option<ClickAction>>,
	on_change: Callback<Option<ClickAction>>,
) -> impl IntoView {
	let present = Memo::new(move |_| value.with(Option::is_some));
	let has_tooltip = Memo::new(move |_| {
		value.with(|a| a.as_ref().is_some_and(|a| a.tooltip.is_some()))
	});
	let kind = Memo::new(move |_| {
		value.with(|a| a.as_ref().and_then(|a| a.action.as_ref()).map(ActionDef::kind))
	});

	let label_text = Signal::derive(move || {
		value.with(|a| a.as_ref().map(|a| a.label.clone()).unwrap_or_default())
	});
	let tooltip_text = Signal::derive(move || {
		value.with(|a| a.as_ref().and_then(|a| a.tooltip.clone()).unwrap_or_default())
	});
	let on_label = Callback::new(move |text: Text| edit_action(value, on_change, |a| a.label = text));
	let on_tooltip =
		Callback::new(move |text: Text| edit_action(value, on_change, |a| a.tooltip = Some(text)));

	let inline_title = move || {
		value.with(|a| match a.as_ref().and_then(|a| a.action.as_ref()) {
			Some(ActionDef::ShowDialog {
				dialog: DialogRef::Inline(dialog),
			}) => Some(dialog.title_text()),
			_ => None,
		})
	};

	let action_fields = move || {
		kind.get().map(|kind| {
			ActionDef::empty(kind)
				.fields()
				.into_iter()
				.map(|(name, _)| {
					let current = move || {
						value.with(|a| {
							a.as_ref()
								.and_then(|a| a.action.as_ref())
								.and_then(|def| {
									def.fields()
										.into_iter()
										.find(|(field, _)| *field == name)
										.map(|(_, v)| v)
								})
								.unwrap_or_default()
						})
					};
					view! {
						<label>
							<div class="field-label">{name}</div>
							<input
								prop:value=current
								placeholder=move || inline_title().map(|t| format!("inline: {t}"))
								on:change=move |ev| {
									let input = event_target_value(&ev);
									edit_action(
										value,
										on_change,
										|a| {
											if let Some(def) = a.action.as_mut() {
												def.set_field(name, &input);
											}
										},
									);
								}
							/>
						</label>
					}
				})
				.collect_view()
		})
	};

	let editor = move || {
		if !present.get() {
			return view! {
				<button
					type="button"
					class="icon-btn"
					on:click=move |_| on_change.run(Some(ClickAction::new("")))
				>
					{format!("+ Set {label}")}
				</button>
			}
			.into_any();
		}
		view! {
			<TextEditor label="Label" value=label_text on_change=on_label />
			<label class="checkbox-row">
				<input
					type="checkbox"
					prop:checked=move || has_tooltip.get()
					on:change=move |ev| {
						let on = event_target_checked(&ev);
						edit_action(value, on_change, |a| a.tooltip = on.then(|| Text::literal("")));
					}
				/>
				<span>"tooltip"</span>
			</label>
			{move || {
				has_tooltip
					.get()
					.then(|| view! { <TextEditor label="Tooltip" value=tooltip_text on_change=on_tooltip /> })
			}}
			<label>
				<div class="field-label">{format!("Width ({MIN_BUTTON_WIDTH}~{MAX_BUTTON_WIDTH})")}</div>
				<input
					type="number"
					min=MIN_BUTTON_WIDTH.to_string()
					max=MAX_BUTTON_WIDTH.to_string()
					prop:value=move || {
						value.with(|a| {
							a.as_ref().and_then(|a| a.width).map(|w| w.to_string()).unwrap_or_default()
						})
					}
					on:change=move |ev| {
						let width = parse_optional_clamped(
							&event_target_value(&ev),
							MIN_BUTTON_WIDTH,
							MAX_BUTTON_WIDTH,
							DEFAULT_BUTTON_WIDTH,
						);
						edit_action(value, on_change, |a| a.width = width);
					}
				/>
			</label>
			<label>
				<div class="field-label">"Action"</div>
				<select
					prop:value=move || kind.get().map(ActionKind::as_str).unwrap_or("")
					on:change=move |ev| {
						let kind = ActionKind::parse(&event_target_value(&ev));
						edit_action(value, on_change, |a| a.action = kind.map(ActionDef::empty));
					}
				>
					<option value="">"(none)"</option>
					{ActionKind::ALL
						.into_iter()
						.map(|k| view! { <option value=k.as_str()>{k.as_str()}</option> })
						.collect_view()}
				</select>
			</label>
			{action_fields}
			<button type="button" class="icon-btn" on:click=move |_| on_change.run(None)>
				"Clear"
			</button>
		}
		.into_any()
	};

	view! {
		<div class="click-action-editor">
			<div class="section-title">{label}</div>
			{editor}
		</div>
	}
}
