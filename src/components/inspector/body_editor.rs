use leptos::prelude::*;

use super::coerce::{parse_clamped, parse_optional_clamped, parse_or};
use super::text_editor::TextEditor;
use crate::dialog::{
	BodyElement, DEFAULT_ITEM_SIZE, DEFAULT_MESSAGE_WIDTH, Description, ItemBody,
	MAX_BUTTON_WIDTH, MAX_ITEM_SIZE, Text,
};

fn edit_item(
	items: Signal<Vec<BodyElement>>,
	on_change: Callback<Vec<BodyElement>>,
	index: usize,
	edit: impl FnOnce(&mut BodyElement),
) {
	let mut next = items.get_untracked();
	if let Some(item) = next.get_mut(index) {
		edit(item);
		on_change.run(next);
	}
}

fn read_item<R: Default>(
	items: Signal<Vec<BodyElement>>,
	index: usize,
	read: impl FnOnce(&ItemBody) -> R,
) -> R {
	items.with(|items| match items.get(index) {
		Some(BodyElement::Item(item)) => read(item),
		_ => R::default(),
	})
}

fn edit_item_body(
	items: Signal<Vec<BodyElement>>,
	on_change: Callback<Vec<BodyElement>>,
	index: usize,
	edit: impl FnOnce(&mut ItemBody),
) {
	edit_item(items, on_change, index, |element| {
		if let BodyElement::Item(item) = element {
			edit(item);
		}
	});
}

/// The body list: plain messages and items, each removable.
#[component]
pub fn BodyEditor(
	#[prop(into)] items: Signal<Vec<BodyElement>>,
	on_change: Callback<Vec<BodyElement>>,
) -> impl IntoView {
	let keys = Memo::new(move |_| {
		items.with(|items| {
			items
				.iter()
				.enumerate()
				.map(|(i, item)| (i, item.kind_name()))
				.collect::<Vec<_>>()
		})
	});

	let push = move |element: BodyElement| {
		let mut next = items.get_untracked();
		next.push(element);
		on_change.run(next);
	};

	view! {
		<div class="list">
			<For
				each=move || keys.get()
				key=|key| *key
				children=move |(index, kind)| {
					let remove = move |_| {
						let mut next = items.get_untracked();
						if index < next.len() {
							next.remove(index);
							on_change.run(next);
						}
					};
					let fields = match kind {
						"minecraft:plain_message" => {
							view! { <PlainMessageFields items on_change index /> }.into_any()
						}
						_ => view! { <ItemFields items on_change index /> }.into_any(),
					};
					view! {
						<div class="list-item">
							<div class="list-item-header">
								<strong>{kind}</strong>
								<button type="button" class="icon-btn" on:click=remove>
									"Remove"
								</button>
							</div>
							{fields}
						</div>
					}
				}
			/>
			<div class="button-row">
				<button
					type="button"
					class="icon-btn"
					on:click=move |_| push(BodyElement::plain(""))
				>
					"+ Add plain_message"
				</button>
				<button type="button" class="icon-btn" on:click=move |_| push(BodyElement::item(""))>
					"+ Add item"
				</button>
			</div>
		</div>
	}
}

#[component]
fn PlainMessageFields(
	items: Signal<Vec<BodyElement>>,
	on_change: Callback<Vec<BodyElement>>,
	index: usize,
) -> impl IntoView {
	let contents = Signal::derive(move || {
		items.with(|items| match items.get(index) {
			Some(BodyElement::PlainMessage(m)) => m.contents.clone(),
			_ => Text::default(),
		})
	});
	let on_contents = Callback::new(move |text: Text| {
		edit_item(items, on_change, index, |item| {
			if let BodyElement::PlainMessage(m) = item {
				m.contents = text;
			}
		});
	});

	view! {
		<TextEditor label="contents" value=contents on_change=on_contents />
		<label>
			<div class="field-label">"width"</div>
			<input
				type="number"
				min="1"
				max=MAX_BUTTON_WIDTH.to_string()
				prop:value=move || {
					items.with(|items| match items.get(index) {
						Some(BodyElement::PlainMessage(m)) => {
							m.width.unwrap_or(DEFAULT_MESSAGE_WIDTH).to_string()
						}
						_ => String::new(),
					})
				}
				on:change=move |ev| {
					let width = parse_optional_clamped(
						&event_target_value(&ev),
						1,
						MAX_BUTTON_WIDTH,
						DEFAULT_MESSAGE_WIDTH,
					);
					edit_item(items, on_change, index, |item| {
						if let BodyElement::PlainMessage(m) = item {
							m.width = width;
						}
					});
				}
			/>
		</label>
	}
}

#[component]
fn ItemFields(
	items: Signal<Vec<BodyElement>>,
	on_change: Callback<Vec<BodyElement>>,
	index: usize,
) -> impl IntoView {
	let read = move |f: fn(&ItemBody) -> String| read_item(items, index, f);
	let edit = move |edit: Box<dyn FnOnce(&mut ItemBody)>| edit_item_body(items, on_change, index, edit);
	let flag = move |f: fn(&ItemBody) -> Option<bool>| {
		read_item(items, index, |item| f(item).unwrap_or(true))
	};

	let has_description = Memo::new(move |_| {
		items.with(|items| {
			matches!(items.get(index), Some(BodyElement::Item(item)) if item.description.is_some())
		})
	});
	let description = Signal::derive(move || {
		items.with(|items| match items.get(index) {
			Some(BodyElement::Item(item)) => item
				.description
				.as_ref()
				.map(|d| d.contents().clone())
				.unwrap_or_default(),
			_ => Text::default(),
		})
	});
	let on_description = Callback::new(move |text: Text| {
		edit(Box::new(move |item| {
			item.description
				.get_or_insert_with(|| Description::Text(Text::default()))
				.set_contents(text);
		}));
	});

	let size_input = move |name: &'static str,
	                       get: fn(&ItemBody) -> Option<u32>,
	                       set: fn(&mut ItemBody, u32)| {
		view! {
			<label class="grow">
				<div class="field-label">{name}</div>
				<input
					type="number"
					min="1"
					max=MAX_ITEM_SIZE.to_string()
					prop:value=move || read_item(items, index, |item| item_size(get(item)).to_string())
					on:change=move |ev| {
						let size = parse_clamped(
							&event_target_value(&ev),
							1,
							MAX_ITEM_SIZE,
							DEFAULT_ITEM_SIZE,
						);
						edit(Box::new(move |item| set(item, size)));
					}
				/>
			</label>
		}
	};

	view! {
		<label>
			<div class="field-label">"item.id"</div>
			<input
				prop:value=move || read(|item| item.item.id.clone())
				on:change=move |ev| {
					let id = event_target_value(&ev);
					edit(Box::new(move |item| item.item.id = id));
				}
			/>
		</label>
		<label>
			<div class="field-label">"item.count"</div>
			<input
				type="number"
				min="1"
				prop:value=move || read(|item| item.item.count.to_string())
				on:change=move |ev| {
					let count = parse_or(&event_target_value(&ev), 1u32).max(1);
					edit(Box::new(move |item| item.item.count = count));
				}
			/>
		</label>
		<label class="checkbox-row">
			<input
				type="checkbox"
				prop:checked=move || has_description.get()
				on:change=move |ev| {
					let on = event_target_checked(&ev);
					edit(
						Box::new(move |item| {
							item.description = on
								.then(|| Description::Block {
									contents: Text::default(),
									width: None,
								});
						}),
					);
				}
			/>
			<span>"Use description"</span>
		</label>
		{move || {
			has_description
				.get()
				.then(|| {
					view! {
						<TextEditor
							label="description.contents"
							value=description
							on_change=on_description
						/>
						<label>
							<div class="field-label">"description.width"</div>
							<input
								type="number"
								min="1"
								max=MAX_BUTTON_WIDTH.to_string()
								prop:value=move || {
									read(|item| match &item.description {
										Some(Description::Block { width, .. }) => {
											width.unwrap_or(DEFAULT_MESSAGE_WIDTH).to_string()
										}
										_ => DEFAULT_MESSAGE_WIDTH.to_string(),
									})
								}
								on:change=move |ev| {
									let width = parse_optional_clamped(
										&event_target_value(&ev),
										1,
										MAX_BUTTON_WIDTH,
										DEFAULT_MESSAGE_WIDTH,
									);
									edit(
										Box::new(move |item| {
											let contents = item
												.description
												.as_ref()
												.map(|d| d.contents().clone())
												.unwrap_or_default();
											item.description = Some(Description::Block { contents, width });
										}),
									);
								}
							/>
						</label>
					}
				})
		}}
		<div class="flag-row">
			<label class="checkbox-row">
				<input
					type="checkbox"
					prop:checked=move || flag(|item| item.show_decoration)
					on:change=move |ev| {
						let on = event_target_checked(&ev);
						edit(Box::new(move |item| item.show_decoration = Some(on)));
					}
				/>
				<span>"show_decoration"</span>
			</label>
			<label class="checkbox-row">
				<input
					type="checkbox"
					prop:checked=move || flag(|item| item.show_tooltip)
					on:change=move |ev| {
						let on = event_target_checked(&ev);
						edit(Box::new(move |item| item.show_tooltip = Some(on)));
					}
				/>
				<span>"show_tooltip"</span>
			</label>
		</div>
		<div class="flag-row">
			{size_input("width", |item| item.width, |item, v| item.width = Some(v))}
			{size_input("height", |item| item.height, |item, v| item.height = Some(v))}
		</div>
	}
}

fn item_size(size: Option<u32>) -> u32 {
	size.unwrap_or(DEFAULT_ITEM_SIZE)
}
