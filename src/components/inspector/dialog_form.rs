use leptos::prelude::*;

use super::NodeHandle;
use super::action_editor::ClickActionEditor;
use super::body_editor::BodyEditor;
use super::coerce::{parse_clamped, parse_optional_clamped};
use super::text_editor::TextEditor;
use crate::dialog::{
	AfterAction, BodyElement, ClickAction, DEFAULT_BUTTON_WIDTH, DEFAULT_COLUMNS, Dialog,
	DialogRef, DialogType, MAX_BUTTON_WIDTH, MIN_BUTTON_WIDTH, Text, normalize,
};

/// Upper bound for the column count field.
const MAX_COLUMNS: u32 = 64;

/// Everything about the node's dialog: type, shared fields and the variant's own section.
#[component]
pub fn DialogForm(handle: NodeHandle) -> impl IntoView {
	let dialog = handle.dialog();
	let ty = Memo::new(move |_| dialog.with(Dialog::dialog_type));
	let has_external_title = Memo::new(move |_| dialog.with(|d| d.common().external_title.is_some()));

	let title = Signal::derive(move || dialog.with(|d| d.common().title.clone()));
	let on_title = Callback::new(move |text: Text| handle.edit_dialog(|d| d.common_mut().title = text));
	let external_title = Signal::derive(move || {
		dialog.with(|d| d.common().external_title.clone().unwrap_or_default())
	});
	let on_external_title = Callback::new(move |text: Text| {
		handle.edit_dialog(|d| d.common_mut().external_title = Some(text))
	});
	let body = Signal::derive(move || dialog.with(|d| d.common().body_items()));
	let on_body = Callback::new(move |items: Vec<BodyElement>| {
		handle.edit_dialog(|d| d.common_mut().set_body_items(items))
	});

	let result_json = move || {
		dialog.with(|d| serde_json::to_string_pretty(&normalize(d)).unwrap_or_else(|err| err.to_string()))
	};

	let variant = move || match ty.get() {
		DialogType::Notice => view! { <NoticeSection handle dialog /> }.into_any(),
		DialogType::Confirmation => view! { <ConfirmationSection handle dialog /> }.into_any(),
		DialogType::MultiAction => view! {
			<ColumnsField handle dialog />
			<MultiActionList handle dialog />
			<ExitActionField handle dialog />
		}
		.into_any(),
		DialogType::ServerLinks => view! {
			<ColumnsField handle dialog />
			<ButtonWidthField handle dialog />
			<ExitActionField handle dialog />
		}
		.into_any(),
		DialogType::DialogList => view! {
			<DialogListEntries handle dialog />
			<ColumnsField handle dialog />
			<ButtonWidthField handle dialog />
			<ExitActionField handle dialog />
		}
		.into_any(),
	};

	view! {
		<div class="dialog-form">
			<label>
				<div class="field-label">"Dialog type"</div>
				<select
					prop:value=move || ty.get().as_str()
					on:change=move |ev| {
						if let Ok(next) = event_target_value(&ev).parse::<DialogType>() {
							handle.edit_dialog(|d| *d = std::mem::take(d).with_type(next));
						}
					}
				>
					{DialogType::ALL
						.into_iter()
						.map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
						.collect_view()}
				</select>
			</label>
			<TextEditor label="Title" value=title on_change=on_title />
			<label class="checkbox-row">
				<input
					type="checkbox"
					prop:checked=move || has_external_title.get()
					on:change=move |ev| {
						let on = event_target_checked(&ev);
						handle.edit_dialog(|d| {
							d.common_mut().external_title = on.then(|| Text::literal(""));
						});
					}
				/>
				<span>"external_title"</span>
			</label>
			{move || {
				has_external_title
					.get()
					.then(|| {
						view! {
							<TextEditor
								label="External title"
								value=external_title
								on_change=on_external_title
							/>
						}
					})
			}}
			<div class="section-title">"Body"</div>
			<BodyEditor items=body on_change=on_body />
			<div class="flag-row">
				<label class="checkbox-row">
					<input
						type="checkbox"
						prop:checked=move || dialog.with(|d| d.common().can_close_with_escape())
						on:change=move |ev| {
							let on = event_target_checked(&ev);
							handle.edit_dialog(|d| d.common_mut().can_close_with_escape = Some(on));
						}
					/>
					<span>"can_close_with_escape"</span>
				</label>
				<label class="checkbox-row">
					<input
						type="checkbox"
						prop:checked=move || dialog.with(|d| d.common().pause())
						on:change=move |ev| {
							let on = event_target_checked(&ev);
							handle.edit_dialog(|d| d.common_mut().pause = Some(on));
						}
					/>
					<span>"pause"</span>
				</label>
			</div>
			<label>
				<div class="field-label">"after_action"</div>
				<select
					prop:value=move || dialog.with(|d| d.common().after_action().as_str())
					on:change=move |ev| {
						let after = AfterAction::parse(&event_target_value(&ev));
						handle.edit_dialog(|d| d.common_mut().after_action = after);
					}
				>
					{AfterAction::ALL
						.into_iter()
						.map(|a| view! { <option value=a.as_str()>{a.as_str()}</option> })
						.collect_view()}
				</select>
			</label>
			{variant}
			<details class="result-json">
				<summary>"Advanced: Result JSON"</summary>
				<pre>{result_json}</pre>
			</details>
		</div>
	}
}

#[component]
fn NoticeSection(handle: NodeHandle, dialog: Memo<Dialog>) -> impl IntoView {
	let value = Signal::derive(move || {
		dialog.with(|d| match d {
			Dialog::Notice(n) => n.action.clone(),
			_ => None,
		})
	});
	let on_change = Callback::new(move |action: Option<ClickAction>| {
		handle.edit_dialog(|d| {
			if let Dialog::Notice(n) = d {
				n.action = action;
			}
		})
	});
	view! { <ClickActionEditor label="action" value on_change /> }
}

#[component]
fn ConfirmationSection(handle: NodeHandle, dialog: Memo<Dialog>) -> impl IntoView {
	let yes = Signal::derive(move || {
		dialog.with(|d| match d {
			Dialog::Confirmation(c) => c.yes.clone(),
			_ => None,
		})
	});
	let no = Signal::derive(move || {
		dialog.with(|d| match d {
			Dialog::Confirmation(c) => c.no.clone(),
			_ => None,
		})
	});
	let on_yes = Callback::new(move |action: Option<ClickAction>| {
		handle.edit_dialog(|d| {
			if let Dialog::Confirmation(c) = d {
				c.yes = action;
			}
		})
	});
	let on_no = Callback::new(move |action: Option<ClickAction>| {
		handle.edit_dialog(|d| {
			if let Dialog::Confirmation(c) = d {
				c.no = action;
			}
		})
	});
	view! {
		<ClickActionEditor label="yes" value=yes on_change=on_yes />
		<ClickActionEditor label="no" value=no on_change=on_no />
	}
}

#[component]
fn ColumnsField(handle: NodeHandle, dialog: Memo<Dialog>) -> impl IntoView {
	view! {
		<label>
			<div class="field-label">"columns"</div>
			<input
				type="number"
				min="1"
				max=MAX_COLUMNS.to_string()
				prop:value=move || dialog.with(|d| d.columns().unwrap_or(DEFAULT_COLUMNS).to_string())
				on:change=move |ev| {
					let columns = parse_clamped(
						&event_target_value(&ev),
						1,
						MAX_COLUMNS,
						DEFAULT_COLUMNS,
					);
					handle.edit_dialog(|d| d.set_columns(Some(columns)));
				}
			/>
		</label>
	}
}

#[component]
fn ButtonWidthField(handle: NodeHandle, dialog: Memo<Dialog>) -> impl IntoView {
	view! {
		<label>
			<div class="field-label">
				{format!("button_width ({MIN_BUTTON_WIDTH}~{MAX_BUTTON_WIDTH})")}
			</div>
			<input
				type="number"
				min=MIN_BUTTON_WIDTH.to_string()
				max=MAX_BUTTON_WIDTH.to_string()
				prop:value=move || {
					dialog.with(|d| d.button_width().unwrap_or(DEFAULT_BUTTON_WIDTH).to_string())
				}
				on:change=move |ev| {
					let width = parse_optional_clamped(
						&event_target_value(&ev),
						MIN_BUTTON_WIDTH,
						MAX_BUTTON_WIDTH,
						DEFAULT_BUTTON_WIDTH,
					);
					handle.edit_dialog(|d| d.set_button_width(width));
				}
			/>
		</label>
	}
}

#[component]
fn ExitActionField(handle: NodeHandle, dialog: Memo<Dialog>) -> impl IntoView {
	let value = Signal::derive(move || dialog.with(|d| d.exit_action().cloned()));
	let on_change = Callback::new(move |action: Option<ClickAction>| {
		handle.edit_dialog(|d| d.set_exit_action(action))
	});
	view! { <ClickActionEditor label="exit_action" value on_change /> }
}

#[component]
fn MultiActionList(handle: NodeHandle, dialog: Memo<Dialog>) -> impl IntoView {
	let count = Memo::new(move |_| {
		dialog.with(|d| match d {
			Dialog::MultiAction(m) => m.actions.len(),
			_ => 0,
		})
	});

	view! {
		<div class="section-title">"actions"</div>
		<div class="list">
			<For
				each=move || 0..count.get()
				key=|index| *index
				children=move |index| {
					let value = Signal::derive(move || {
						dialog.with(|d| match d {
							Dialog::MultiAction(m) => m.actions.get(index).cloned(),
							_ => None,
						})
					});
					// Clearing a list entry removes it.
					let on_change = Callback::new(move |action: Option<ClickAction>| {
						handle.edit_dialog(|d| {
							let Dialog::MultiAction(m) = d else {
								return;
							};
							match action {
								Some(action) => {
									if let Some(slot) = m.actions.get_mut(index) {
										*slot = action;
									}
								}
								None if index < m.actions.len() => {
									m.actions.remove(index);
								}
								None => {}
							}
						})
					});
					view! {
						<div class="list-item">
							<ClickActionEditor label="action" value on_change />
						</div>
					}
				}
			/>
			<button
				type="button"
				class="icon-btn"
				on:click=move |_| {
					handle.edit_dialog(|d| {
						if let Dialog::MultiAction(m) = d {
							m.actions.push(ClickAction::new(""));
						}
					})
				}
			>
				"+ Add action"
			</button>
		</div>
	}
}

#[component]
fn DialogListEntries(handle: NodeHandle, dialog: Memo<Dialog>) -> impl IntoView {
	let entries = Memo::new(move |_| {
		dialog.with(|d| match d {
			Dialog::DialogList(list) => list
				.dialogs
				.iter()
				.enumerate()
				.map(|(i, entry)| (i, matches!(entry, DialogRef::Inline(_))))
				.collect::<Vec<_>>(),
			_ => Vec::new(),
		})
	});

	let edit_entries = move |edit: Box<dyn FnOnce(&mut Vec<DialogRef>)>| {
		handle.edit_dialog(|d| {
			if let Dialog::DialogList(list) = d {
				edit(&mut list.dialogs);
			}
		})
	};

	view! {
		<div class="section-title">"dialogs"</div>
		<div class="list">
			<For
				each=move || entries.get()
				key=|entry| *entry
				children=move |(index, inline)| {
					let entry = move || {
						dialog.with(|d| match d {
							Dialog::DialogList(list) => list.dialogs.get(index).cloned(),
							_ => None,
						})
					};
					let field = if inline {
						view! {
							<div class="inline-ref">
								{move || match entry() {
									Some(DialogRef::Inline(inner)) => {
										format!("inline: {}", inner.title_text())
									}
									_ => String::new(),
								}}
							</div>
						}
						.into_any()
					} else {
						view! {
							<input
								placeholder="dialog id"
								prop:value=move || match entry() {
									Some(DialogRef::Id(id)) => id,
									_ => String::new(),
								}
								on:change=move |ev| {
									let id = event_target_value(&ev);
									edit_entries(
										Box::new(move |dialogs| {
											if let Some(slot) = dialogs.get_mut(index) {
												*slot = DialogRef::Id(id);
											}
										}),
									);
								}
							/>
						}
						.into_any()
					};
					view! {
						<div class="list-item list-item-row">
							{field}
							<button
								type="button"
								class="icon-btn"
								on:click=move |_| {
									edit_entries(
										Box::new(move |dialogs| {
											if index < dialogs.len() {
												dialogs.remove(index);
											}
										}),
									)
								}
							>
								"Remove"
							</button>
						</div>
					}
				}
			/>
			<button
				type="button"
				class="icon-btn"
				on:click=move |_| edit_entries(Box::new(|dialogs| dialogs.push(DialogRef::Id(String::new()))))
			>
				"+ Add dialog id"
			</button>
		</div>
	}
}
