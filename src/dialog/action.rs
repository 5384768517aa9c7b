use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::text::Text;
use super::DialogRef;

pub const DEFAULT_BUTTON_WIDTH: u32 = 150;
pub const MIN_BUTTON_WIDTH: u32 = 1;
pub const MAX_BUTTON_WIDTH: u32 = 1024;

/// A button: label, optional tooltip, width and the action it runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickAction {
	pub label: Text,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tooltip: Option<Text>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub action: Option<ActionDef>,
}

impl ClickAction {
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: Text::literal(label),
			..Self::default()
		}
	}

	/// The dialog this button opens, if it opens one.
	pub fn dialog_ref(&self) -> Option<&DialogRef> {
		match &self.action {
			Some(ActionDef::ShowDialog { dialog }) => Some(dialog),
			_ => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionDef {
	OpenUrl {
		url: String,
	},
	RunCommand {
		command: String,
	},
	SuggestCommand {
		command: String,
	},
	ChangePage {
		page: u32,
	},
	CopyToClipboard {
		value: String,
	},
	ShowDialog {
		dialog: DialogRef,
	},
	Custom {
		id: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		payload: Option<String>,
	},
	#[serde(rename = "dynamic/run_command")]
	DynamicRunCommand {
		template: String,
	},
	#[serde(rename = "dynamic/custom")]
	DynamicCustom {
		id: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		additions: Option<Map<String, Value>>,
	},
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
	OpenUrl,
	RunCommand,
	SuggestCommand,
	ChangePage,
	CopyToClipboard,
	ShowDialog,
	Custom,
	DynamicRunCommand,
	DynamicCustom,
}

impl ActionKind {
	pub const ALL: [ActionKind; 9] = [
		ActionKind::OpenUrl,
		ActionKind::RunCommand,
		ActionKind::SuggestCommand,
		ActionKind::ChangePage,
		ActionKind::CopyToClipboard,
		ActionKind::ShowDialog,
		ActionKind::Custom,
		ActionKind::DynamicRunCommand,
		ActionKind::DynamicCustom,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::OpenUrl => "open_url",
			Self::RunCommand => "run_command",
			Self::SuggestCommand => "suggest_command",
			Self::ChangePage => "change_page",
			Self::CopyToClipboard => "copy_to_clipboard",
			Self::ShowDialog => "show_dialog",
			Self::Custom => "custom",
			Self::DynamicRunCommand => "dynamic/run_command",
			Self::DynamicCustom => "dynamic/custom",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.as_str() == s)
	}
}

impl ActionDef {
	/// The blank action installed when the user picks a new action type.
	pub fn empty(kind: ActionKind) -> Self {
		match kind {
			ActionKind::OpenUrl => Self::OpenUrl { url: String::new() },
			ActionKind::RunCommand => Self::RunCommand {
				command: String::new(),
			},
			ActionKind::SuggestCommand => Self::SuggestCommand {
				command: String::new(),
			},
			ActionKind::ChangePage => Self::ChangePage { page: 1 },
			ActionKind::CopyToClipboard => Self::CopyToClipboard {
				value: String::new(),
			},
			ActionKind::ShowDialog => Self::ShowDialog {
				dialog: DialogRef::Id(String::new()),
			},
			ActionKind::Custom => Self::Custom {
				id: String::new(),
				payload: Some(String::new()),
			},
			ActionKind::DynamicRunCommand => Self::DynamicRunCommand {
				template: String::new(),
			},
			ActionKind::DynamicCustom => Self::DynamicCustom {
				id: String::new(),
				additions: Some(Map::new()),
			},
		}
	}

	pub fn kind(&self) -> ActionKind {
		match self {
			Self::OpenUrl { .. } => ActionKind::OpenUrl,
			Self::RunCommand { .. } => ActionKind::RunCommand,
			Self::SuggestCommand { .. } => ActionKind::SuggestCommand,
			Self::ChangePage { .. } => ActionKind::ChangePage,
			Self::CopyToClipboard { .. } => ActionKind::CopyToClipboard,
			Self::ShowDialog { .. } => ActionKind::ShowDialog,
			Self::Custom { .. } => ActionKind::Custom,
			Self::DynamicRunCommand { .. } => ActionKind::DynamicRunCommand,
			Self::DynamicCustom { .. } => ActionKind::DynamicCustom,
		}
	}

	/// String-editable fields as `(name, value)` pairs. Inline dialogs have none.
	pub fn fields(&self) -> Vec<(&'static str, String)> {
		match self {
			Self::OpenUrl { url } => vec![("url", url.clone())],
			Self::RunCommand { command } | Self::SuggestCommand { command } => {
				vec![("command", command.clone())]
			}
			Self::ChangePage { page } => vec![("page", page.to_string())],
			Self::CopyToClipboard { value } => vec![("value", value.clone())],
			Self::ShowDialog {
				dialog: DialogRef::Id(id),
			} => vec![("dialog", id.clone())],
			Self::ShowDialog { .. } => Vec::new(),
			Self::Custom { id, payload } => vec![
				("id", id.clone()),
				("payload", payload.clone().unwrap_or_default()),
			],
			Self::DynamicRunCommand { template } => vec![("template", template.clone())],
			Self::DynamicCustom { id, .. } => vec![("id", id.clone())],
		}
	}

	/// Writes one of the fields listed by [`ActionDef::fields`]; other names are ignored.
	pub fn set_field(&mut self, name: &str, value: &str) {
		match (self, name) {
			(Self::OpenUrl { url }, "url") => *url = value.to_owned(),
			(Self::RunCommand { command } | Self::SuggestCommand { command }, "command") => {
				*command = value.to_owned()
			}
			(Self::ChangePage { page }, "page") => {
				*page = value.trim().parse().unwrap_or(1).max(1)
			}
			(Self::CopyToClipboard { value: v }, "value") => *v = value.to_owned(),
			(Self::ShowDialog { dialog }, "dialog") => *dialog = DialogRef::Id(value.to_owned()),
			(Self::Custom { id, .. } | Self::DynamicCustom { id, .. }, "id") => {
				*id = value.to_owned()
			}
			(Self::Custom { payload, .. }, "payload") => {
				*payload = Some(value.to_owned()).filter(|p| !p.is_empty())
			}
			(Self::DynamicRunCommand { template }, "template") => *template = value.to_owned(),
			_ => {}
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn decodes_every_action_tag() {
		let tags = [
			json!({ "type": "open_url", "url": "https://x" }),
			json!({ "type": "run_command", "command": "say hi" }),
			json!({ "type": "suggest_command", "command": "/tp" }),
			json!({ "type": "change_page", "page": 2 }),
			json!({ "type": "copy_to_clipboard", "value": "v" }),
			json!({ "type": "show_dialog", "dialog": "ns:next" }),
			json!({ "type": "custom", "id": "ns:c" }),
			json!({ "type": "dynamic/run_command", "template": "say $(x)" }),
			json!({ "type": "dynamic/custom", "id": "ns:d", "additions": { "k": 1 } }),
		];
		let kinds: Vec<ActionKind> = tags
			.into_iter()
			.map(|v| serde_json::from_value::<ActionDef>(v).unwrap().kind())
			.collect();
		assert_eq!(kinds, ActionKind::ALL.to_vec());
	}

	#[test]
	fn unknown_action_tag_is_an_error() {
		let err = serde_json::from_value::<ActionDef>(json!({ "type": "explode" }));
		assert!(err.is_err());
	}

	#[test]
	fn empty_actions_serialize_with_their_tag() {
		for kind in ActionKind::ALL {
			let value = serde_json::to_value(ActionDef::empty(kind)).unwrap();
			assert_eq!(value["type"], kind.as_str());
			assert_eq!(ActionKind::parse(kind.as_str()), Some(kind));
		}
		assert_eq!(
			serde_json::to_value(ActionDef::empty(ActionKind::ChangePage)).unwrap(),
			json!({ "type": "change_page", "page": 1 })
		);
	}

	#[test]
	fn set_field_updates_named_field_only() {
		let mut action = ActionDef::empty(ActionKind::Custom);
		action.set_field("id", "ns:hello");
		action.set_field("payload", "");
		action.set_field("url", "ignored");
		assert_eq!(
			action,
			ActionDef::Custom {
				id: "ns:hello".into(),
				payload: None
			}
		);

		let mut action = ActionDef::empty(ActionKind::ShowDialog);
		action.set_field("dialog", "ns:next");
		assert_eq!(action.fields(), vec![("dialog", "ns:next".to_string())]);
	}

	#[test]
	fn click_action_exposes_dialog_ref() {
		let mut button = ClickAction::new("Go");
		assert!(button.dialog_ref().is_none());
		button.action = Some(ActionDef::ShowDialog {
			dialog: DialogRef::Id("ns:next".into()),
		});
		assert_eq!(button.dialog_ref(), Some(&DialogRef::Id("ns:next".into())));
	}
}
