//! Export-ready pruning of dialog documents.
//!
//! [`normalize`] drops every field that equals its documented default, every empty list or
//! object (including empty text components in optional slots), and the non-authoritative
//! content key of each text component, recursing into inline dialogs. Serialising the result therefore emits only meaningful fields. The
//! operation is idempotent, which is what the store relies on when it compares inline
//! dialogs for equality.

use serde_json::{Map, Value};

use super::action::{ActionDef, ClickAction, DEFAULT_BUTTON_WIDTH};
use super::body::{BodyElement, DEFAULT_ITEM_SIZE, DEFAULT_MESSAGE_WIDTH, Description};
use super::flexible::Flexible;
use super::text::{ClickEvent, ContentKind, HoverEvent, Text, TextComponent};
use super::{
	AfterAction, ConfirmationDialog, DEFAULT_COLUMNS, Dialog, DialogCommon, DialogListDialog,
	DialogRef, MultiActionDialog, NoticeDialog, ServerLinksDialog,
};

pub fn normalize(dialog: &Dialog) -> Dialog {
	match dialog {
		Dialog::Notice(d) => Dialog::Notice(NoticeDialog {
			common: normalize_common(&d.common),
			action: d.action.as_ref().map(normalize_click_action),
		}),
		Dialog::Confirmation(d) => Dialog::Confirmation(ConfirmationDialog {
			common: normalize_common(&d.common),
			yes: d.yes.as_ref().map(normalize_click_action),
			no: d.no.as_ref().map(normalize_click_action),
		}),
		Dialog::MultiAction(d) => Dialog::MultiAction(MultiActionDialog {
			common: normalize_common(&d.common),
			actions: d.actions.iter().map(normalize_click_action).collect(),
			columns: non_default(d.columns, DEFAULT_COLUMNS),
			exit_action: d.exit_action.as_ref().map(normalize_click_action),
		}),
		Dialog::ServerLinks(d) => Dialog::ServerLinks(ServerLinksDialog {
			common: normalize_common(&d.common),
			columns: non_default(d.columns, DEFAULT_COLUMNS),
			button_width: non_default(d.button_width, DEFAULT_BUTTON_WIDTH),
			exit_action: d.exit_action.as_ref().map(normalize_click_action),
		}),
		Dialog::DialogList(d) => Dialog::DialogList(DialogListDialog {
			common: normalize_common(&d.common),
			dialogs: d.dialogs.iter().map(normalize_ref).collect(),
			columns: non_default(d.columns, DEFAULT_COLUMNS),
			button_width: non_default(d.button_width, DEFAULT_BUTTON_WIDTH),
			exit_action: d.exit_action.as_ref().map(normalize_click_action),
		}),
	}
}

fn non_default<T: PartialEq>(value: Option<T>, default: T) -> Option<T> {
	value.filter(|v| *v != default)
}

fn normalize_common(common: &DialogCommon) -> DialogCommon {
	let title = normalize_text(&common.title);
	let external_title = common
		.external_title
		.as_ref()
		.and_then(optional_text)
		.filter(|t| *t != title);
	DialogCommon {
		title,
		external_title,
		body: common.body.as_ref().and_then(normalize_body),
		inputs: common
			.inputs
			.iter()
			.map(prune_map)
			.filter(|m| !m.is_empty())
			.collect(),
		can_close_with_escape: non_default(common.can_close_with_escape, true),
		pause: non_default(common.pause, true),
		after_action: non_default(common.after_action, AfterAction::Close),
	}
}

fn normalize_body(body: &Flexible<BodyElement>) -> Option<Flexible<BodyElement>> {
	match body {
		Flexible::Scalar(text) => {
			Some(Flexible::Scalar(text.clone())).filter(|_| !text.trim().is_empty())
		}
		Flexible::Single(element) => {
			let element = normalize_body_element(element);
			Some(Flexible::Single(element)).filter(|b| !b.items()[0].is_blank())
		}
		Flexible::List(elements) if elements.is_empty() => None,
		Flexible::List(elements) => Some(Flexible::List(
			elements.iter().map(normalize_body_element).collect(),
		)),
	}
}

fn normalize_body_element(element: &BodyElement) -> BodyElement {
	match element {
		BodyElement::PlainMessage(message) => {
			let mut message = message.clone();
			message.contents = normalize_text(&message.contents);
			message.width = non_default(message.width, DEFAULT_MESSAGE_WIDTH);
			BodyElement::PlainMessage(message)
		}
		BodyElement::Item(item) => {
			let mut item = item.clone();
			item.item.components = item
				.item
				.components
				.as_ref()
				.map(prune_map)
				.filter(|m| !m.is_empty());
			item.description = item.description.as_ref().and_then(|d| match d {
				Description::Block { contents, width } => {
					optional_text(contents).map(|contents| Description::Block {
						contents,
						width: non_default(*width, DEFAULT_MESSAGE_WIDTH),
					})
				}
				Description::Text(text) => optional_text(text).map(Description::Text),
			});
			item.show_decoration = non_default(item.show_decoration, true);
			item.show_tooltip = non_default(item.show_tooltip, true);
			item.width = non_default(item.width, DEFAULT_ITEM_SIZE);
			item.height = non_default(item.height, DEFAULT_ITEM_SIZE);
			BodyElement::Item(item)
		}
	}
}

fn normalize_click_action(button: &ClickAction) -> ClickAction {
	ClickAction {
		label: normalize_text(&button.label),
		tooltip: button.tooltip.as_ref().and_then(optional_text),
		width: non_default(button.width, DEFAULT_BUTTON_WIDTH),
		action: button.action.as_ref().map(normalize_action),
	}
}

fn normalize_action(action: &ActionDef) -> ActionDef {
	match action {
		ActionDef::ShowDialog { dialog } => ActionDef::ShowDialog {
			dialog: normalize_ref(dialog),
		},
		ActionDef::Custom { id, payload } => ActionDef::Custom {
			id: id.clone(),
			payload: payload.clone().filter(|p| !p.is_empty()),
		},
		ActionDef::DynamicCustom { id, additions } => ActionDef::DynamicCustom {
			id: id.clone(),
			additions: additions.as_ref().map(prune_map).filter(|m| !m.is_empty()),
		},
		other => other.clone(),
	}
}

fn normalize_ref(dialog: &DialogRef) -> DialogRef {
	match dialog {
		DialogRef::Id(id) => DialogRef::Id(id.clone()),
		DialogRef::Inline(inline) => DialogRef::Inline(Box::new(normalize(inline))),
	}
}

fn normalize_text(text: &Text) -> Text {
	match text {
		Flexible::Scalar(value) => Flexible::Scalar(value.clone()),
		Flexible::Single(component) => Flexible::Single(normalize_component(component)),
		Flexible::List(components) => Flexible::List(
			components
				.iter()
				.map(normalize_component)
				.filter(|c| !is_empty_component(c))
				.collect(),
		),
	}
}

/// Normalizes a text slot that may be left out, dropping it when nothing remains.
fn optional_text(text: &Text) -> Option<Text> {
	let text = normalize_text(text);
	let empty = match &text {
		Flexible::Scalar(_) => false,
		Flexible::Single(component) => is_empty_component(component),
		Flexible::List(components) => components.is_empty(),
	};
	(!empty).then_some(text)
}

fn is_empty_component(component: &TextComponent) -> bool {
	*component == TextComponent::default()
}

fn normalize_component(component: &TextComponent) -> TextComponent {
	let mut out = component.clone();
	match component.content_kind() {
		ContentKind::Text => {
			out.translate = None;
			out.fallback = None;
			out.with.clear();
		}
		ContentKind::Translatable => out.text = None,
		_ => {}
	}
	out.with = out.with.iter().filter_map(optional_text).collect();
	out.extra = out.extra.iter().filter_map(optional_text).collect();
	out.separator = out.separator.as_deref().and_then(optional_text).map(Box::new);
	out.click_event = out.click_event.as_ref().map(|event| match event {
		ClickEvent::ShowDialog { dialog } => ClickEvent::ShowDialog {
			dialog: normalize_ref(dialog),
		},
		ClickEvent::Custom { id, payload } => ClickEvent::Custom {
			id: id.clone(),
			payload: payload.clone().filter(|p| !p.is_empty()),
		},
		other => other.clone(),
	});
	out.hover_event = out
		.hover_event
		.as_deref()
		.and_then(|event| match event {
			HoverEvent::ShowText { value } => {
				optional_text(value).map(|value| HoverEvent::ShowText { value })
			}
			HoverEvent::ShowItem {
				id,
				count,
				components,
			} => Some(HoverEvent::ShowItem {
				id: id.clone(),
				count: *count,
				components: components.as_ref().map(prune_map).filter(|m| !m.is_empty()),
			}),
			HoverEvent::ShowEntity { name, id, uuid } => Some(HoverEvent::ShowEntity {
				name: name.as_ref().and_then(optional_text),
				id: id.clone(),
				uuid: uuid.clone(),
			}),
		})
		.map(Box::new);
	out
}

/// Drops nulls, empty arrays and (recursively) empty objects from free-form JSON.
pub fn prune_map(map: &Map<String, Value>) -> Map<String, Value> {
	map.iter()
		.filter_map(|(key, value)| prune_value(value).map(|v| (key.clone(), v)))
		.collect()
}

fn prune_value(value: &Value) -> Option<Value> {
	match value {
		Value::Null => None,
		Value::Array(items) if items.is_empty() => None,
		Value::Object(map) => {
			let pruned = prune_map(map);
			(!pruned.is_empty()).then_some(Value::Object(pruned))
		}
		other => Some(other.clone()),
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use serde_json::json;

	use super::*;
	use crate::dialog::{DialogType, ItemBody, ItemStack, PlainMessage};

	fn export(dialog: &Dialog) -> Value {
		serde_json::to_value(normalize(dialog)).unwrap()
	}

	#[test]
	fn default_notice_prunes_to_type_title_and_body() {
		let dialog = Dialog::notice("Start", "Hello");
		assert_eq!(
			export(&dialog),
			json!({
				"type": "minecraft:notice",
				"title": { "text": "Start" },
				"body": {
					"type": "minecraft:plain_message",
					"contents": { "text": "Hello" }
				}
			})
		);
	}

	#[test]
	fn blank_body_is_dropped() {
		let dialog = Dialog::notice("Stub", "");
		assert_eq!(
			export(&dialog),
			json!({ "type": "minecraft:notice", "title": { "text": "Stub" } })
		);
	}

	#[test]
	fn non_default_values_are_kept() {
		let dialog: Dialog = serde_json::from_value(json!({
			"type": "minecraft:multi_action",
			"title": "Menu",
			"external_title": "Outside",
			"pause": false,
			"can_close_with_escape": true,
			"after_action": "wait_for_response",
			"columns": 3,
			"actions": [{ "label": "A", "width": 150 }, { "label": "B", "width": 90 }]
		}))
		.unwrap();
		assert_eq!(
			export(&dialog),
			json!({
				"type": "minecraft:multi_action",
				"title": "Menu",
				"external_title": "Outside",
				"pause": false,
				"after_action": "wait_for_response",
				"columns": 3,
				"actions": [{ "label": "A" }, { "label": "B", "width": 90 }]
			})
		);
	}

	#[test]
	fn default_columns_and_widths_are_dropped() {
		let dialog: Dialog = serde_json::from_value(json!({
			"type": "minecraft:dialog_list",
			"title": "L",
			"columns": 1,
			"button_width": 150,
			"dialogs": []
		}))
		.unwrap();
		assert_eq!(
			export(&dialog),
			json!({ "type": "minecraft:dialog_list", "title": "L" })
		);
	}

	#[test]
	fn nested_inline_dialogs_are_normalized() {
		let dialog: Dialog = serde_json::from_value(json!({
			"type": "minecraft:dialog_list",
			"title": "Root",
			"dialogs": [{
				"type": "minecraft:notice",
				"title": { "text": "Child" },
				"pause": true,
				"action": {
					"label": "Next",
					"action": {
						"type": "show_dialog",
						"dialog": { "type": "minecraft:notice", "title": "Leaf", "inputs": [] }
					}
				}
			}]
		}))
		.unwrap();
		assert_eq!(
			export(&dialog)["dialogs"][0],
			json!({
				"type": "minecraft:notice",
				"title": { "text": "Child" },
				"action": {
					"label": "Next",
					"action": {
						"type": "show_dialog",
						"dialog": { "type": "minecraft:notice", "title": "Leaf" }
					}
				}
			})
		);
	}

	#[test]
	fn text_keeps_only_authoritative_content() {
		let text: Text = serde_json::from_value(json!({
			"translate": "gui.done",
			"text": "stale",
			"extra": [],
			"bold": false
		}))
		.unwrap();
		let out = serde_json::to_value(normalize_text(&text)).unwrap();
		assert_eq!(out, json!({ "translate": "gui.done", "bold": false }));
	}

	#[test]
	fn prune_map_recurses_into_objects() {
		let map = json!({ "a": null, "b": [], "c": { "d": {} }, "e": [1], "f": { "g": 0 } });
		let pruned = prune_map(map.as_object().unwrap());
		assert_eq!(Value::Object(pruned), json!({ "e": [1], "f": { "g": 0 } }));
	}

	#[test]
	fn empty_text_objects_in_optional_slots_are_dropped() {
		let dialog: Dialog = serde_json::from_value(json!({
			"type": "minecraft:notice",
			"title": "t",
			"external_title": {},
			"inputs": [{ "label": null }, { "type": "minecraft:text", "key": "k" }],
			"body": {
				"type": "minecraft:item",
				"item": { "id": "minecraft:stone" },
				"description": { "contents": {}, "width": 90 }
			},
			"action": {
				"label": {
					"text": "L",
					"extra": [{}, { "text": "!" }],
					"hover_event": { "action": "show_text", "value": {} }
				},
				"tooltip": {}
			}
		}))
		.unwrap();
		assert_eq!(
			export(&dialog),
			json!({
				"type": "minecraft:notice",
				"title": "t",
				"inputs": [{ "type": "minecraft:text", "key": "k" }],
				"body": { "type": "minecraft:item", "item": { "id": "minecraft:stone", "count": 1 } },
				"action": { "label": { "text": "L", "extra": [{ "text": "!" }] } }
			})
		);
	}

	#[test]
	fn nested_hover_text_is_normalized_at_every_level() {
		let text: Text = serde_json::from_value(json!({
			"text": "a",
			"hover_event": {
				"action": "show_text",
				"value": {
					"translate": "k",
					"text": "stale",
					"hover_event": { "action": "show_text", "value": { "extra": [{}] } }
				}
			}
		}))
		.unwrap();
		let out = serde_json::to_value(normalize_text(&text)).unwrap();
		assert_eq!(
			out,
			json!({
				"text": "a",
				"hover_event": { "action": "show_text", "value": { "translate": "k" } }
			})
		);
	}

	fn arb_width(default: u32, max: u32) -> impl Strategy<Value = Option<u32>> {
		proptest::option::of(prop_oneof![Just(default), 1..=max])
	}

	fn arb_text() -> impl Strategy<Value = Text> {
		let leaf = prop_oneof![
			"[a-z ]{0,6}".prop_map(Text::Scalar),
			("[a-z ]{0,6}", proptest::option::of(any::<bool>())).prop_map(|(text, bold)| {
				Text::Single(TextComponent {
					bold,
					..TextComponent::literal(text)
				})
			}),
			Just(Text::Single(TextComponent::default())),
		];
		leaf.prop_recursive(3, 16, 3, |inner| {
			(
				"[a-z.]{1,8}",
				proptest::option::of("[a-z]{0,4}"),
				proptest::collection::vec(inner.clone(), 0..3),
				proptest::collection::vec(inner.clone(), 0..3),
				proptest::option::of(inner),
				any::<bool>(),
			)
				.prop_map(|(translate, text, with, extra, hover, listed)| {
					let component = TextComponent {
						translate: Some(translate),
						text,
						with,
						extra,
						hover_event: hover.map(|value| Box::new(HoverEvent::ShowText { value })),
						..TextComponent::default()
					};
					if listed {
						Text::List(vec![component, TextComponent::default()])
					} else {
						Text::Single(component)
					}
				})
		})
	}

	fn arb_click_action() -> impl Strategy<Value = ClickAction> {
		let action = prop_oneof![
			"[a-z/ ]{1,8}".prop_map(|command| ActionDef::RunCommand { command }),
			"[a-z]{1,6}".prop_map(|id| ActionDef::ShowDialog {
				dialog: DialogRef::Id(id),
			}),
			(
				"[a-z ]{0,8}",
				"[a-z ]{0,8}",
				proptest::option::of(any::<bool>())
			)
				.prop_map(|(title, body, pause)| {
					let mut inline = Dialog::notice(&title, &body);
					inline.common_mut().pause = pause;
					ActionDef::ShowDialog {
						dialog: DialogRef::Inline(Box::new(inline)),
					}
				}),
		];
		(
			arb_text(),
			proptest::option::of(arb_text()),
			arb_width(DEFAULT_BUTTON_WIDTH, 1024),
			proptest::option::of(action),
		)
			.prop_map(|(label, tooltip, width, action)| ClickAction {
				label,
				tooltip,
				width,
				action,
			})
	}

	fn arb_body_element() -> impl Strategy<Value = BodyElement> {
		prop_oneof![
			("[a-z ]{0,8}", arb_width(DEFAULT_MESSAGE_WIDTH, 1024)).prop_map(|(text, width)| {
				BodyElement::PlainMessage(PlainMessage {
					contents: Text::literal(text),
					width,
				})
			}),
			(
				"[a-z:]{1,12}",
				proptest::option::of(arb_text()),
				proptest::option::of(any::<bool>()),
				arb_width(DEFAULT_ITEM_SIZE, 256),
				any::<bool>(),
			)
				.prop_map(|(id, description, show_tooltip, size, with_components)| {
					let components = json!({ "minecraft:custom_data": { "empty": {} }, "n": [1] });
					BodyElement::Item(ItemBody {
						item: ItemStack {
							id,
							count: 1,
							components: with_components
								.then(|| components.as_object().cloned().unwrap_or_default()),
						},
						description: description.map(Description::Text),
						show_decoration: None,
						show_tooltip,
						width: size,
						height: size,
					})
				}),
		]
	}

	fn arb_input() -> impl Strategy<Value = Map<String, Value>> {
		prop_oneof![
			Just(json!({ "type": "minecraft:text", "key": "name", "label": "Name" })),
			Just(json!({ "type": "minecraft:boolean", "key": "ok", "initial": null, "extra": {} })),
			Just(json!({ "label": null, "options": [] })),
		]
		.prop_map(|input| input.as_object().cloned().unwrap_or_default())
	}

	fn arb_dialog() -> impl Strategy<Value = Dialog> {
		(
			(
				arb_text(),
				proptest::option::of(arb_text()),
				"[a-z ]{0,8}",
				proptest::collection::vec(arb_body_element(), 0..3),
				proptest::collection::vec(arb_input(), 0..3),
			),
			(
				proptest::option::of(any::<bool>()),
				proptest::option::of(any::<bool>()),
				proptest::option::of(0usize..3),
				proptest::option::of(0u32..4),
				arb_width(DEFAULT_BUTTON_WIDTH, 1024),
			),
			0usize..5,
			proptest::collection::vec(arb_click_action(), 0..3),
			proptest::option::of(arb_click_action()),
		)
			.prop_map(|(content, settings, ty, actions, exit)| {
				let (title, external_title, body, elements, inputs) = content;
				let (escape, pause, after, columns, button_width) = settings;
				let mut dialog = Dialog::notice("", &body).with_type(DialogType::ALL[ty]);
				let common = dialog.common_mut();
				common.title = title;
				common.external_title = external_title;
				if !elements.is_empty() {
					common.set_body_items(elements);
				}
				common.inputs = inputs;
				common.can_close_with_escape = escape;
				common.pause = pause;
				common.after_action = after.map(|i| AfterAction::ALL[i]);
				dialog.set_columns(columns);
				dialog.set_button_width(button_width);
				match &mut dialog {
					Dialog::Notice(d) => d.action = actions.into_iter().next(),
					Dialog::Confirmation(d) => {
						d.yes = actions.into_iter().next();
						d.no = exit;
					}
					Dialog::MultiAction(d) => {
						d.actions = actions;
						d.exit_action = exit;
					}
					Dialog::ServerLinks(d) => d.exit_action = exit,
					Dialog::DialogList(d) => {
						d.dialogs.push(DialogRef::Inline(Box::new(Dialog::notice(&body, ""))));
						d.dialogs.push(DialogRef::Id("next".into()));
						d.exit_action = exit;
					}
				}
				dialog
			})
	}

	/// Keys whose value is an empty object anywhere in `value`. Array entries report the
	/// key of the array.
	fn empty_object_keys(value: &Value, key: &str, found: &mut Vec<String>) {
		match value {
			Value::Object(map) if map.is_empty() => found.push(key.to_owned()),
			Value::Object(map) => {
				for (k, v) in map {
					empty_object_keys(v, k, found);
				}
			}
			Value::Array(items) => {
				for item in items {
					empty_object_keys(item, key, found);
				}
			}
			_ => {}
		}
	}

	fn button_widths(value: &Value) -> Vec<&Value> {
		let mut buttons: Vec<&Value> = value
			.get("actions")
			.and_then(Value::as_array)
			.map(|a| a.iter().collect())
			.unwrap_or_default();
		buttons.extend(["action", "yes", "no", "exit_action"].iter().filter_map(|k| value.get(*k)));
		buttons.into_iter().filter_map(|b| b.get("width")).collect()
	}

	proptest! {
		#[test]
		fn normalize_is_idempotent(dialog in arb_dialog()) {
			let once = normalize(&dialog);
			prop_assert_eq!(normalize(&once), once);
		}

		#[test]
		fn normalized_export_has_no_default_fields(dialog in arb_dialog()) {
			let value = export(&dialog);
			prop_assert_ne!(value.get("pause"), Some(&json!(true)));
			prop_assert_ne!(value.get("can_close_with_escape"), Some(&json!(true)));
			prop_assert_ne!(value.get("after_action"), Some(&json!("close")));
			prop_assert_ne!(value.get("columns"), Some(&json!(1)));
			prop_assert_ne!(value.get("button_width"), Some(&json!(150)));
			prop_assert!(!button_widths(&value).contains(&&json!(150)));

			let mut empty = Vec::new();
			empty_object_keys(&value, "", &mut empty);
			// Required text slots may still hold `{}`; nothing else may.
			prop_assert!(
				empty.iter().all(|k| matches!(k.as_str(), "title" | "label" | "contents")),
				"empty objects under {:?}",
				empty
			);
		}
	}
}
