use leptos::prelude::*;

use super::debounce::Debouncer;
use crate::components::use_config;
use crate::dialog::{
	ClickEvent, ClickEventKind, ContentKind, FormatFlag, HoverEvent, Text, TextComponent,
};

/// Editor for the primary component of a text value.
///
/// Free-text fields go through a draft that is committed after a short pause or on blur;
/// selects and checkboxes commit at once.
#[component]
pub fn TextEditor(
	label: &'static str,
	#[prop(into)] value: Signal<Text>,
	on_change: Callback<Text>,
) -> impl IntoView {
	let config = use_config();
	let draft = RwSignal::new(value.get_untracked().primary());
	let commit = Callback::new(move |component: TextComponent| {
		on_change.run(value.get_untracked().with_primary(component));
	});
	let debouncer = Debouncer::new(config.text_debounce_ms, commit);

	// Pick up outside changes unless the user is mid-edit.
	Effect::new(move |_| {
		let primary = value.with(Text::primary);
		if !debouncer.is_pending() {
			draft.set(primary);
		}
	});

	let edit_text = move |edit: fn(&mut TextComponent, String), input: String| {
		draft.update(|d| edit(d, input));
		debouncer.schedule(draft.get_untracked());
	};
	let edit_now = move |edit: Box<dyn FnOnce(&mut TextComponent)>| {
		debouncer.flush();
		draft.update(|d| edit(d));
		commit.run(draft.get_untracked());
	};

	let kind = Memo::new(move |_| draft.with(TextComponent::content_kind));
	let hover_enabled =
		Memo::new(move |_| draft.with(|d| matches!(d.hover_event.as_deref(), Some(HoverEvent::ShowText { .. }))));
	let click_kind = Memo::new(move |_| draft.with(|d| d.click_event.as_ref().map(ClickEvent::kind)));

	let content_input = move || match kind.get() {
		ContentKind::Translatable => view! {
			<label>
				<div class="field-label">"translate"</div>
				<input
					prop:value=move || draft.with(|d| d.translate.clone().unwrap_or_default())
					on:input=move |ev| edit_text(|d, v| d.translate = Some(v), event_target_value(&ev))
					on:blur=move |_| debouncer.flush()
				/>
			</label>
			<label>
				<div class="field-label">"fallback"</div>
				<input
					prop:value=move || draft.with(|d| d.fallback.clone().unwrap_or_default())
					on:input=move |ev| edit_text(|d, v| d.fallback = Some(v).filter(|v| !v.is_empty()), event_target_value(&ev))
					on:blur=move |_| debouncer.flush()
				/>
			</label>
		}
		.into_any(),
		_ => view! {
			<label>
				<div class="field-label">"text"</div>
				<input
					prop:value=move || draft.with(|d| d.text.clone().unwrap_or_default())
					on:input=move |ev| edit_text(|d, v| d.text = Some(v), event_target_value(&ev))
					on:blur=move |_| debouncer.flush()
				/>
			</label>
		}
		.into_any(),
	};

	let flags = FormatFlag::ALL
		.into_iter()
		.map(|flag| {
			view! {
				<label class="checkbox-row">
					<input
						type="checkbox"
						prop:checked=move || draft.with(|d| d.flag(flag))
						on:change=move |ev| {
							let on = event_target_checked(&ev);
							edit_now(Box::new(move |d: &mut TextComponent| d.set_flag(flag, on)));
						}
					/>
					<span>{flag.as_str()}</span>
				</label>
			}
		})
		.collect_view();

	let hover_text = move || {
		hover_enabled.get().then(|| {
			view! {
				<label>
					<div class="field-label">"hover text"</div>
					<input
						prop:value=move || {
							draft.with(|d| match d.hover_event.as_deref() {
								Some(HoverEvent::ShowText { value }) => value.to_string(),
								_ => String::new(),
							})
						}
						on:input=move |ev| {
							edit_text(
								|d, v| {
									if let Some(HoverEvent::ShowText { value }) = d.hover_event.as_deref_mut() {
										*value = value.with_primary(TextComponent {
											text: Some(v),
											..value.primary()
										});
									}
								},
								event_target_value(&ev),
							)
						}
						on:blur=move |_| debouncer.flush()
					/>
				</label>
			}
		})
	};

	let click_field = move || {
		click_kind.get().and_then(|kind| {
			let (name, _) = ClickEvent::empty(kind).primary_field()?;
			Some(view! {
				<label>
					<div class="field-label">{name}</div>
					<input
						prop:value=move || {
							draft.with(|d| {
								d.click_event
									.as_ref()
									.and_then(ClickEvent::primary_field)
									.map(|(_, v)| v)
									.unwrap_or_default()
							})
						}
						on:change=move |ev| {
							let input = event_target_value(&ev);
							edit_now(Box::new(move |d: &mut TextComponent| {
								if let Some(event) = d.click_event.as_mut() {
									event.set_primary_field(&input);
								}
							}));
						}
					/>
				</label>
			})
		})
	};

	view! {
		<div class="text-editor">
			<div class="section-title">{label}</div>
			<label>
				<div class="field-label">"Content Type"</div>
				<select
					prop:value=move || kind.get().as_str()
					on:change=move |ev| {
						if let Ok(kind) = event_target_value(&ev).parse::<ContentKind>() {
							edit_now(Box::new(move |d: &mut TextComponent| d.set_content_kind(kind)));
						}
					}
				>
					{ContentKind::EDITABLE
						.into_iter()
						.map(|k| view! { <option value=k.as_str()>{k.as_str()}</option> })
						.collect_view()}
				</select>
			</label>
			{content_input}
			<label>
				<div class="field-label">"color"</div>
				<input
					prop:value=move || draft.with(|d| d.color.clone().unwrap_or_default())
					on:input=move |ev| edit_text(|d, v| d.color = Some(v).filter(|v| !v.is_empty()), event_target_value(&ev))
					on:blur=move |_| debouncer.flush()
				/>
			</label>
			<div class="flag-row">{flags}</div>
			<label class="checkbox-row">
				<input
					type="checkbox"
					prop:checked=move || hover_enabled.get()
					on:change=move |ev| {
						let on = event_target_checked(&ev);
						edit_now(
							Box::new(move |d: &mut TextComponent| {
								d.hover_event = on.then(|| {
									Box::new(HoverEvent::ShowText {
										value: Text::literal(""),
									})
								});
							}),
						);
					}
				/>
				<span>"hover_event: show_text"</span>
			</label>
			{hover_text}
			<label>
				<div class="field-label">"click_event"</div>
				<select
					prop:value=move || click_kind.get().map(ClickEventKind::as_str).unwrap_or("")
					on:change=move |ev| {
						let kind = ClickEventKind::parse(&event_target_value(&ev));
						edit_now(Box::new(move |d: &mut TextComponent| d.click_event = kind.map(ClickEvent::empty)));
					}
				>
					<option value="">"(none)"</option>
					{ClickEventKind::ALL
						.into_iter()
						.map(|k| view! { <option value=k.as_str()>{k.as_str()}</option> })
						.collect_view()}
				</select>
			</label>
			{click_field}
		</div>
	}
}
