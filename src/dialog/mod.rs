//! Typed model of Minecraft dialog documents and their JSON wire format.

mod action;
mod body;
mod flexible;
mod normalize;
mod text;

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use action::{
	ActionDef, ActionKind, ClickAction, DEFAULT_BUTTON_WIDTH, MAX_BUTTON_WIDTH, MIN_BUTTON_WIDTH,
};
pub use body::{
	BodyElement, DEFAULT_ITEM_SIZE, DEFAULT_MESSAGE_WIDTH, Description, ItemBody, ItemStack,
	MAX_ITEM_SIZE, PlainMessage,
};
pub use flexible::{Flexible, ScalarItem};
pub use normalize::{normalize, prune_map};
pub use text::{
	ClickEvent, ClickEventKind, ContentKind, EntityUuid, FormatFlag, HoverEvent, NbtSource,
	Score, ShadowColor, Text, TextComponent,
};

pub const DEFAULT_COLUMNS: u32 = 1;

/// Free-form input control definition.
pub type InputControl = Map<String, Value>;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown dialog type `{0}`")]
pub struct UnknownDialogType(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogType {
	#[serde(rename = "minecraft:notice")]
	Notice,
	#[serde(rename = "minecraft:confirmation")]
	Confirmation,
	#[serde(rename = "minecraft:multi_action")]
	MultiAction,
	#[serde(rename = "minecraft:server_links")]
	ServerLinks,
	#[serde(rename = "minecraft:dialog_list")]
	DialogList,
}

impl DialogType {
	pub const ALL: [DialogType; 5] = [
		DialogType::Notice,
		DialogType::Confirmation,
		DialogType::MultiAction,
		DialogType::ServerLinks,
		DialogType::DialogList,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Notice => "minecraft:notice",
			Self::Confirmation => "minecraft:confirmation",
			Self::MultiAction => "minecraft:multi_action",
			Self::ServerLinks => "minecraft:server_links",
			Self::DialogList => "minecraft:dialog_list",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Notice => "Notice",
			Self::Confirmation => "Confirmation",
			Self::MultiAction => "Multi action",
			Self::ServerLinks => "Server links",
			Self::DialogList => "Dialog list",
		}
	}
}

impl FromStr for DialogType {
	type Err = UnknownDialogType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|ty| ty.as_str() == s)
			.ok_or_else(|| UnknownDialogType(s.to_owned()))
	}
}

impl fmt::Display for DialogType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterAction {
	#[default]
	Close,
	None,
	WaitForResponse,
}

impl AfterAction {
	pub const ALL: [AfterAction; 3] = [
		AfterAction::Close,
		AfterAction::None,
		AfterAction::WaitForResponse,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Close => "close",
			Self::None => "none",
			Self::WaitForResponse => "wait_for_response",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|a| a.as_str() == s)
	}
}

/// Fields shared by every dialog variant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogCommon {
	pub title: Text,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub external_title: Option<Text>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub body: Option<Flexible<BodyElement>>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub inputs: Vec<InputControl>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub can_close_with_escape: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pause: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub after_action: Option<AfterAction>,
}

impl DialogCommon {
	pub fn can_close_with_escape(&self) -> bool {
		self.can_close_with_escape.unwrap_or(true)
	}

	pub fn pause(&self) -> bool {
		self.pause.unwrap_or(true)
	}

	pub fn after_action(&self) -> AfterAction {
		self.after_action.unwrap_or_default()
	}

	pub fn body_items(&self) -> Vec<BodyElement> {
		self.body.as_ref().map(Flexible::to_vec).unwrap_or_default()
	}

	pub fn set_body_items(&mut self, items: Vec<BodyElement>) {
		self.body = Flexible::from_vec(items);
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NoticeDialog {
	#[serde(flatten)]
	pub common: DialogCommon,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub action: Option<ClickAction>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationDialog {
	#[serde(flatten)]
	pub common: DialogCommon,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub yes: Option<ClickAction>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub no: Option<ClickAction>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiActionDialog {
	#[serde(flatten)]
	pub common: DialogCommon,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub actions: Vec<ClickAction>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub columns: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub exit_action: Option<ClickAction>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerLinksDialog {
	#[serde(flatten)]
	pub common: DialogCommon,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub columns: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub button_width: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub exit_action: Option<ClickAction>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogListDialog {
	#[serde(flatten)]
	pub common: DialogCommon,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub dialogs: Vec<DialogRef>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub columns: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub button_width: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub exit_action: Option<ClickAction>,
}

/// One screen of the game's dialog UI, discriminated by `type`.
///
/// Decoding an unrecognised `type` fails; there is no fallback variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Dialog {
	#[serde(rename = "minecraft:notice")]
	Notice(NoticeDialog),
	#[serde(rename = "minecraft:confirmation")]
	Confirmation(ConfirmationDialog),
	#[serde(rename = "minecraft:multi_action")]
	MultiAction(MultiActionDialog),
	#[serde(rename = "minecraft:server_links")]
	ServerLinks(ServerLinksDialog),
	#[serde(rename = "minecraft:dialog_list")]
	DialogList(DialogListDialog),
}

/// A dialog referenced by id, or defined inline.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DialogRef {
	Id(String),
	Inline(Box<Dialog>),
}

impl<'de> Deserialize<'de> for DialogRef {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		match Value::deserialize(deserializer)? {
			Value::String(id) => Ok(Self::Id(id)),
			value @ Value::Object(_) => serde_json::from_value(value)
				.map(|dialog| Self::Inline(Box::new(dialog)))
				.map_err(de::Error::custom),
			other => Err(de::Error::custom(format!(
				"expected a dialog id or an inline dialog, found {other}"
			))),
		}
	}
}

impl Default for Dialog {
	fn default() -> Self {
		Self::notice("Untitled", "")
	}
}

impl Dialog {
	/// The notice used for fresh, stub and synthesised nodes.
	pub fn notice(title: &str, body: &str) -> Self {
		Self::Notice(NoticeDialog {
			common: DialogCommon {
				title: Text::literal(title),
				external_title: Some(Text::literal(title)),
				body: Some(Flexible::Single(BodyElement::plain(body))),
				inputs: Vec::new(),
				can_close_with_escape: Some(true),
				pause: Some(true),
				after_action: Some(AfterAction::Close),
			},
			action: None,
		})
	}

	pub fn dialog_type(&self) -> DialogType {
		match self {
			Self::Notice(_) => DialogType::Notice,
			Self::Confirmation(_) => DialogType::Confirmation,
			Self::MultiAction(_) => DialogType::MultiAction,
			Self::ServerLinks(_) => DialogType::ServerLinks,
			Self::DialogList(_) => DialogType::DialogList,
		}
	}

	pub fn common(&self) -> &DialogCommon {
		match self {
			Self::Notice(d) => &d.common,
			Self::Confirmation(d) => &d.common,
			Self::MultiAction(d) => &d.common,
			Self::ServerLinks(d) => &d.common,
			Self::DialogList(d) => &d.common,
		}
	}

	pub fn common_mut(&mut self) -> &mut DialogCommon {
		match self {
			Self::Notice(d) => &mut d.common,
			Self::Confirmation(d) => &mut d.common,
			Self::MultiAction(d) => &mut d.common,
			Self::ServerLinks(d) => &mut d.common,
			Self::DialogList(d) => &mut d.common,
		}
	}

	/// Title as plain text, `"Dialog"` when it has none.
	pub fn title_text(&self) -> String {
		self.common()
			.title
			.plain_text()
			.unwrap_or_else(|| "Dialog".to_owned())
	}

	pub fn columns(&self) -> Option<u32> {
		match self {
			Self::MultiAction(d) => d.columns,
			Self::ServerLinks(d) => d.columns,
			Self::DialogList(d) => d.columns,
			Self::Notice(_) | Self::Confirmation(_) => None,
		}
	}

	pub fn set_columns(&mut self, columns: Option<u32>) {
		match self {
			Self::MultiAction(d) => d.columns = columns,
			Self::ServerLinks(d) => d.columns = columns,
			Self::DialogList(d) => d.columns = columns,
			Self::Notice(_) | Self::Confirmation(_) => {}
		}
	}

	pub fn button_width(&self) -> Option<u32> {
		match self {
			Self::ServerLinks(d) => d.button_width,
			Self::DialogList(d) => d.button_width,
			_ => None,
		}
	}

	pub fn set_button_width(&mut self, width: Option<u32>) {
		match self {
			Self::ServerLinks(d) => d.button_width = width,
			Self::DialogList(d) => d.button_width = width,
			_ => {}
		}
	}

	pub fn exit_action(&self) -> Option<&ClickAction> {
		match self {
			Self::MultiAction(d) => d.exit_action.as_ref(),
			Self::ServerLinks(d) => d.exit_action.as_ref(),
			Self::DialogList(d) => d.exit_action.as_ref(),
			Self::Notice(_) | Self::Confirmation(_) => None,
		}
	}

	pub fn set_exit_action(&mut self, action: Option<ClickAction>) {
		match self {
			Self::MultiAction(d) => d.exit_action = action,
			Self::ServerLinks(d) => d.exit_action = action,
			Self::DialogList(d) => d.exit_action = action,
			Self::Notice(_) | Self::Confirmation(_) => {}
		}
	}

	/// Converts to another variant. Common fields survive, as do `columns`,
	/// `button_width` and `exit_action` when the target has them.
	pub fn with_type(self, ty: DialogType) -> Dialog {
		if self.dialog_type() == ty {
			return self;
		}
		let columns = self.columns();
		let button_width = self.button_width();
		let exit_action = self.exit_action().cloned();
		let common = match self {
			Self::Notice(d) => d.common,
			Self::Confirmation(d) => d.common,
			Self::MultiAction(d) => d.common,
			Self::ServerLinks(d) => d.common,
			Self::DialogList(d) => d.common,
		};
		match ty {
			DialogType::Notice => Self::Notice(NoticeDialog {
				common,
				action: None,
			}),
			DialogType::Confirmation => Self::Confirmation(ConfirmationDialog {
				common,
				yes: None,
				no: None,
			}),
			DialogType::MultiAction => Self::MultiAction(MultiActionDialog {
				common,
				actions: Vec::new(),
				columns,
				exit_action,
			}),
			DialogType::ServerLinks => Self::ServerLinks(ServerLinksDialog {
				common,
				columns,
				button_width,
				exit_action,
			}),
			DialogType::DialogList => Self::DialogList(DialogListDialog {
				common,
				dialogs: Vec::new(),
				columns,
				button_width,
				exit_action,
			}),
		}
	}

	/// Every button slot of this dialog, in document order.
	pub fn click_actions(&self) -> Vec<&ClickAction> {
		match self {
			Self::Notice(d) => d.action.iter().collect(),
			Self::Confirmation(d) => d.yes.iter().chain(d.no.iter()).collect(),
			Self::MultiAction(d) => d.actions.iter().chain(d.exit_action.iter()).collect(),
			Self::ServerLinks(d) => d.exit_action.iter().collect(),
			Self::DialogList(d) => d.exit_action.iter().collect(),
		}
	}

	/// Dialogs this one can open directly: `show_dialog` buttons, then list entries.
	/// Inline dialogs are not searched recursively.
	pub fn dialog_refs(&self) -> Vec<&DialogRef> {
		let mut refs: Vec<&DialogRef> = self
			.click_actions()
			.into_iter()
			.filter_map(ClickAction::dialog_ref)
			.collect();
		if let Self::DialogList(d) = self {
			refs.extend(d.dialogs.iter());
		}
		refs
	}
}
