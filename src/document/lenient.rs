//! Field-by-field dialog decoding for imports.
//!
//! A dialog is rebuilt from its `type` and `title` outwards. Each further field is kept only
//! if the dialog still decodes with it; objects and arrays that fail as a whole are rebuilt
//! key by key and element by element, so one bad value costs that value and nothing else.

use log::warn;
use serde_json::{Map, Value};

use crate::dialog::{Dialog, DialogType, UnknownDialogType};

/// Tag keys that must be present before any sibling can decode.
const TAG_KEYS: [&str; 2] = ["type", "action"];

enum Step {
	Key(String),
	Index(usize),
}

/// Result of reading one dialog object.
#[derive(Debug)]
pub enum LenientDialog {
	Decoded(Dialog),
	/// `title` cannot be read as text; the caller synthesises a dialog instead.
	Unreadable,
}

/// Decodes `fields`, which must carry a string `type`. Only an unknown type is an error.
pub fn decode_dialog(fields: &Map<String, Value>) -> Result<LenientDialog, UnknownDialogType> {
	let ty = fields.get("type").and_then(Value::as_str).unwrap_or_default();
	ty.parse::<DialogType>()?;

	let whole = Value::Object(fields.clone());
	if let Ok(dialog) = serde_json::from_value::<Dialog>(whole) {
		return Ok(LenientDialog::Decoded(dialog));
	}

	let mut seed = Map::new();
	for key in ["type", "title"] {
		if let Some(value) = fields.get(key) {
			seed.insert(key.to_owned(), value.clone());
		}
	}
	let mut root = Value::Object(seed);
	if !decodes(&root) {
		warn!("dialog title is unreadable; synthesising one");
		return Ok(LenientDialog::Unreadable);
	}

	let rest: Vec<(&String, &Value)> = fields
		.iter()
		.filter(|(key, _)| !matches!(key.as_str(), "type" | "title"))
		.collect();
	let mut path = Vec::new();
	build_object(&mut root, &mut path, rest);

	Ok(serde_json::from_value(root)
		.map(LenientDialog::Decoded)
		.unwrap_or(LenientDialog::Unreadable))
}

fn decodes(root: &Value) -> bool {
	serde_json::from_value::<Dialog>(root.clone()).is_ok()
}

fn slot<'a>(root: &'a mut Value, path: &[Step]) -> Option<&'a mut Value> {
	path.iter().try_fold(root, |value, step| match step {
		Step::Key(key) => value.get_mut(key.as_str()),
		Step::Index(index) => value.get_mut(*index),
	})
}

/// Writes `value` at `path`; the parent must already exist.
fn put(root: &mut Value, path: &[Step], value: Value) {
	let Some((last, parent)) = path.split_last() else {
		*root = value;
		return;
	};
	match (slot(root, parent), last) {
		(Some(Value::Object(map)), Step::Key(key)) => {
			map.insert(key.clone(), value);
		}
		(Some(Value::Array(items)), Step::Index(index)) => {
			if *index < items.len() {
				items[*index] = value;
			} else {
				items.push(value);
			}
		}
		_ => {}
	}
}

fn remove(root: &mut Value, path: &[Step]) {
	let Some((last, parent)) = path.split_last() else {
		return;
	};
	match (slot(root, parent), last) {
		(Some(Value::Object(map)), Step::Key(key)) => {
			map.remove(key);
		}
		(Some(Value::Array(items)), Step::Index(_)) => {
			items.pop();
		}
		_ => {}
	}
}

fn describe(path: &[Step]) -> String {
	path.iter()
		.map(|step| match step {
			Step::Key(key) => key.clone(),
			Step::Index(index) => index.to_string(),
		})
		.collect::<Vec<_>>()
		.join(".")
}

/// Adds `value` at `path`, salvaging what it can. Returns whether anything was kept.
fn admit(root: &mut Value, path: &mut Vec<Step>, value: &Value) -> bool {
	put(root, path, value.clone());
	if decodes(root) {
		return true;
	}
	let kept = match value {
		Value::Object(map) => {
			let seed = map
				.iter()
				.filter(|(key, v)| TAG_KEYS.contains(&key.as_str()) && v.is_string())
				.map(|(key, v)| (key.clone(), v.clone()))
				.collect();
			put(root, path, Value::Object(seed));
			let rest = map
				.iter()
				.filter(|(key, v)| !(TAG_KEYS.contains(&key.as_str()) && v.is_string()))
				.collect();
			build_object(root, path, rest);
			decodes(root)
		}
		Value::Array(items) => {
			put(root, path, Value::Array(Vec::new()));
			let mut next = 0;
			for item in items {
				path.push(Step::Index(next));
				if admit(root, path, item) {
					next += 1;
				}
				path.pop();
			}
			decodes(root)
		}
		_ => false,
	};
	if !kept {
		warn!("dropping unreadable dialog field `{}`", describe(path));
		remove(root, path);
	}
	kept
}

/// Adds the fields of an object whose current contents already sit at `path`.
fn build_object(root: &mut Value, path: &mut Vec<Step>, mut pending: Vec<(&String, &Value)>) {
	// Whole values first, repeating while fields that need a sibling become acceptable.
	loop {
		let before = pending.len();
		pending.retain(|(key, value)| {
			path.push(Step::Key((*key).clone()));
			put(root, path, (*value).clone());
			let ok = decodes(root);
			if !ok {
				remove(root, path);
			}
			path.pop();
			!ok
		});
		if pending.is_empty() || pending.len() == before {
			break;
		}
	}
	for (key, value) in pending {
		path.push(Step::Key(key.clone()));
		admit(root, path, value);
		path.pop();
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::dialog::{AfterAction, BodyElement, Text};

	fn decode(value: Value) -> Dialog {
		match decode_dialog(value.as_object().unwrap()).unwrap() {
			LenientDialog::Decoded(dialog) => dialog,
			LenientDialog::Unreadable => panic!("expected a dialog"),
		}
	}

	#[test]
	fn wrong_typed_common_fields_are_dropped() {
		let dialog = decode(json!({
			"type": "minecraft:notice",
			"title": { "text": "x" },
			"pause": "yes",
			"after_action": "wait_for_response"
		}));
		assert_eq!(dialog.common().pause, None);
		assert_eq!(dialog.common().after_action, Some(AfterAction::WaitForResponse));
		assert_eq!(dialog.title_text(), "x");
	}

	#[test]
	fn negative_columns_are_dropped() {
		let dialog = decode(json!({
			"type": "minecraft:multi_action",
			"title": "Menu",
			"columns": -1,
			"actions": [{ "label": "A" }]
		}));
		assert_eq!(dialog.columns(), None);
		assert_eq!(dialog.click_actions().len(), 1);
	}

	#[test]
	fn bad_entries_inside_lists_are_dropped_one_by_one() {
		let dialog = decode(json!({
			"type": "minecraft:multi_action",
			"title": "Menu",
			"actions": [
				{ "label": "A", "width": "wide" },
				{ "tooltip": "no label" },
				{ "label": "C", "action": { "type": "bogus" } }
			]
		}));
		let Dialog::MultiAction(menu) = dialog else {
			panic!("expected multi_action");
		};
		assert_eq!(menu.actions.len(), 2);
		assert_eq!(menu.actions[0].label, Text::Scalar("A".into()));
		assert_eq!(menu.actions[0].width, None);
		assert_eq!(menu.actions[1].label, Text::Scalar("C".into()));
		assert_eq!(menu.actions[1].action, None);
	}

	#[test]
	fn tagged_body_elements_keep_their_good_fields() {
		let dialog = decode(json!({
			"type": "minecraft:notice",
			"title": "t",
			"body": {
				"type": "minecraft:plain_message",
				"contents": "hello",
				"width": "narrow"
			}
		}));
		match dialog.common().body_items().as_slice() {
			[BodyElement::PlainMessage(message)] => {
				assert_eq!(message.contents, Text::Scalar("hello".into()));
				assert_eq!(message.width, None);
			}
			other => panic!("unexpected body {other:?}"),
		}
	}

	#[test]
	fn unreadable_title_is_reported() {
		let result = decode_dialog(
			json!({ "type": "minecraft:notice", "title": 5 })
				.as_object()
				.unwrap(),
		)
		.unwrap();
		assert!(matches!(result, LenientDialog::Unreadable));
	}

	#[test]
	fn unknown_type_is_an_error() {
		let err = decode_dialog(
			json!({ "type": "minecraft:bogus", "title": "t" })
				.as_object()
				.unwrap(),
		)
		.unwrap_err();
		assert_eq!(err, UnknownDialogType("minecraft:bogus".into()));
	}
}
