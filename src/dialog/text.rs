use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::flexible::{Flexible, ScalarItem};
use super::DialogRef;

/// Formatted text: a bare string, one component, or a list of components.
pub type Text = Flexible<TextComponent>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
	Text,
	Translatable,
	Score,
	Selector,
	Keybind,
	Nbt,
	Object,
}

impl ContentKind {
	/// Kinds the inspector can switch between.
	pub const EDITABLE: [ContentKind; 2] = [ContentKind::Text, ContentKind::Translatable];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Translatable => "translatable",
			Self::Score => "score",
			Self::Selector => "selector",
			Self::Keybind => "keybind",
			Self::Nbt => "nbt",
			Self::Object => "object",
		}
	}
}

impl FromStr for ContentKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"text" => Ok(Self::Text),
			"translatable" => Ok(Self::Translatable),
			"score" => Ok(Self::Score),
			"selector" => Ok(Self::Selector),
			"keybind" => Ok(Self::Keybind),
			"nbt" => Ok(Self::Nbt),
			"object" => Ok(Self::Object),
			other => Err(format!("unknown text content type `{other}`")),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
	pub name: String,
	pub objective: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NbtSource {
	Entity,
	Block,
	Storage,
}

/// Packed ARGB integer or a float RGBA quadruple.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShadowColor {
	Packed(i64),
	Components([f64; 4]),
}

/// One node of a text component tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextComponent {
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub content_type: Option<ContentKind>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub translate: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fallback: Option<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub with: Vec<Text>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub score: Option<Score>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub selector: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub separator: Option<Box<Text>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub keybind: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nbt: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<NbtSource>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub entity: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub block: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub storage: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub interpret: Option<bool>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub font: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bold: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub italic: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub underlined: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub strikethrough: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub obfuscated: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub shadow_color: Option<ShadowColor>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub insertion: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub click_event: Option<ClickEvent>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hover_event: Option<Box<HoverEvent>>,

	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub extra: Vec<Text>,
}

/// Formatting flags the inspector exposes as checkboxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatFlag {
	Bold,
	Italic,
	Underlined,
	Strikethrough,
	Obfuscated,
}

impl FormatFlag {
	pub const ALL: [FormatFlag; 5] = [
		FormatFlag::Bold,
		FormatFlag::Italic,
		FormatFlag::Underlined,
		FormatFlag::Strikethrough,
		FormatFlag::Obfuscated,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bold => "bold",
			Self::Italic => "italic",
			Self::Underlined => "underlined",
			Self::Strikethrough => "strikethrough",
			Self::Obfuscated => "obfuscated",
		}
	}
}

impl TextComponent {
	pub fn literal(text: impl Into<String>) -> Self {
		Self {
			text: Some(text.into()),
			..Self::default()
		}
	}

	/// Which content key is authoritative for this component.
	pub fn content_kind(&self) -> ContentKind {
		if let Some(kind) = self.content_type {
			return kind;
		}
		if self.translate.is_some() {
			ContentKind::Translatable
		} else if self.score.is_some() {
			ContentKind::Score
		} else if self.selector.is_some() {
			ContentKind::Selector
		} else if self.keybind.is_some() {
			ContentKind::Keybind
		} else if self.nbt.is_some() {
			ContentKind::Nbt
		} else {
			ContentKind::Text
		}
	}

	/// Switches between literal and translatable content, clearing the other key.
	pub fn set_content_kind(&mut self, kind: ContentKind) {
		match kind {
			ContentKind::Text => {
				self.text.get_or_insert_with(String::new);
				self.translate = None;
				self.fallback = None;
				self.with.clear();
			}
			ContentKind::Translatable => {
				self.translate.get_or_insert_with(String::new);
				self.text = None;
			}
			_ => {}
		}
		self.content_type = Some(kind);
	}

	pub fn flag(&self, flag: FormatFlag) -> bool {
		let value = match flag {
			FormatFlag::Bold => self.bold,
			FormatFlag::Italic => self.italic,
			FormatFlag::Underlined => self.underlined,
			FormatFlag::Strikethrough => self.strikethrough,
			FormatFlag::Obfuscated => self.obfuscated,
		};
		value.unwrap_or(false)
	}

	pub fn set_flag(&mut self, flag: FormatFlag, on: bool) {
		let slot = match flag {
			FormatFlag::Bold => &mut self.bold,
			FormatFlag::Italic => &mut self.italic,
			FormatFlag::Underlined => &mut self.underlined,
			FormatFlag::Strikethrough => &mut self.strikethrough,
			FormatFlag::Obfuscated => &mut self.obfuscated,
		};
		*slot = Some(on);
	}

	/// The literal text or translation key, whichever is authoritative.
	pub fn label(&self) -> Option<&str> {
		let value = match self.content_kind() {
			ContentKind::Translatable => self.translate.as_deref(),
			ContentKind::Keybind => self.keybind.as_deref(),
			ContentKind::Selector => self.selector.as_deref(),
			_ => self.text.as_deref(),
		};
		value.filter(|v| !v.is_empty())
	}

	/// True for literal content with no visible characters and no children.
	pub fn is_blank(&self) -> bool {
		self.content_kind() == ContentKind::Text
			&& self.text.as_deref().is_none_or(|t| t.trim().is_empty())
			&& self.extra.is_empty()
	}
}

impl ScalarItem for TextComponent {
	fn from_scalar(value: String) -> Self {
		Self::literal(value)
	}
}

impl Flexible<TextComponent> {
	pub fn literal(text: impl Into<String>) -> Self {
		Self::Single(TextComponent::literal(text))
	}

	/// Short plain-text rendering used for node titles.
	pub fn plain_text(&self) -> Option<String> {
		match self {
			Self::Scalar(value) => Some(value.clone()).filter(|v| !v.is_empty()),
			Self::Single(component) => component.label().map(str::to_owned),
			Self::List(components) => components
				.iter()
				.find_map(|c| c.label())
				.map(str::to_owned),
		}
	}

	pub fn is_blank(&self) -> bool {
		match self {
			Self::Scalar(value) => value.trim().is_empty(),
			Self::Single(component) => component.is_blank(),
			Self::List(components) => components.iter().all(TextComponent::is_blank),
		}
	}

	/// The component the inspector edits: the single object or the first list entry.
	pub fn primary(&self) -> TextComponent {
		match self {
			Self::Scalar(value) => TextComponent::literal(value.clone()),
			Self::Single(component) => component.clone(),
			Self::List(components) => components.first().cloned().unwrap_or_default(),
		}
	}

	/// Replaces the primary component, keeping any trailing list entries.
	pub fn with_primary(&self, component: TextComponent) -> Self {
		match self {
			Self::List(components) if components.len() > 1 => {
				let mut components = components.clone();
				components[0] = component;
				Self::List(components)
			}
			_ => Self::Single(component),
		}
	}
}

impl Default for Flexible<TextComponent> {
	fn default() -> Self {
		Self::literal("")
	}
}

impl fmt::Display for Flexible<TextComponent> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.plain_text().as_deref().unwrap_or(""))
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClickEvent {
	OpenUrl { url: String },
	OpenFile { path: String },
	RunCommand { command: String },
	SuggestCommand { command: String },
	ChangePage { page: u32 },
	CopyToClipboard { value: String },
	ShowDialog { dialog: DialogRef },
	Custom {
		id: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		payload: Option<String>,
	},
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClickEventKind {
	OpenUrl,
	OpenFile,
	RunCommand,
	SuggestCommand,
	ChangePage,
	CopyToClipboard,
	ShowDialog,
	Custom,
}

impl ClickEventKind {
	pub const ALL: [ClickEventKind; 8] = [
		ClickEventKind::OpenUrl,
		ClickEventKind::OpenFile,
		ClickEventKind::RunCommand,
		ClickEventKind::SuggestCommand,
		ClickEventKind::ChangePage,
		ClickEventKind::CopyToClipboard,
		ClickEventKind::ShowDialog,
		ClickEventKind::Custom,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::OpenUrl => "open_url",
			Self::OpenFile => "open_file",
			Self::RunCommand => "run_command",
			Self::SuggestCommand => "suggest_command",
			Self::ChangePage => "change_page",
			Self::CopyToClipboard => "copy_to_clipboard",
			Self::ShowDialog => "show_dialog",
			Self::Custom => "custom",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.as_str() == s)
	}
}

impl ClickEvent {
	pub fn empty(kind: ClickEventKind) -> Self {
		match kind {
			ClickEventKind::OpenUrl => Self::OpenUrl { url: String::new() },
			ClickEventKind::OpenFile => Self::OpenFile { path: String::new() },
			ClickEventKind::RunCommand => Self::RunCommand {
				command: String::new(),
			},
			ClickEventKind::SuggestCommand => Self::SuggestCommand {
				command: String::new(),
			},
			ClickEventKind::ChangePage => Self::ChangePage { page: 1 },
			ClickEventKind::CopyToClipboard => Self::CopyToClipboard {
				value: String::new(),
			},
			ClickEventKind::ShowDialog => Self::ShowDialog {
				dialog: DialogRef::Id(String::new()),
			},
			ClickEventKind::Custom => Self::Custom {
				id: String::new(),
				payload: None,
			},
		}
	}

	pub fn kind(&self) -> ClickEventKind {
		match self {
			Self::OpenUrl { .. } => ClickEventKind::OpenUrl,
			Self::OpenFile { .. } => ClickEventKind::OpenFile,
			Self::RunCommand { .. } => ClickEventKind::RunCommand,
			Self::SuggestCommand { .. } => ClickEventKind::SuggestCommand,
			Self::ChangePage { .. } => ClickEventKind::ChangePage,
			Self::CopyToClipboard { .. } => ClickEventKind::CopyToClipboard,
			Self::ShowDialog { .. } => ClickEventKind::ShowDialog,
			Self::Custom { .. } => ClickEventKind::Custom,
		}
	}

	/// Name and current value of the single string-editable field, if any.
	pub fn primary_field(&self) -> Option<(&'static str, String)> {
		match self {
			Self::OpenUrl { url } => Some(("url", url.clone())),
			Self::OpenFile { path } => Some(("path", path.clone())),
			Self::RunCommand { command } | Self::SuggestCommand { command } => {
				Some(("command", command.clone()))
			}
			Self::ChangePage { page } => Some(("page", page.to_string())),
			Self::CopyToClipboard { value } => Some(("value", value.clone())),
			Self::ShowDialog {
				dialog: DialogRef::Id(id),
			} => Some(("dialog id", id.clone())),
			Self::ShowDialog { .. } => None,
			Self::Custom { id, .. } => Some(("id", id.clone())),
		}
	}

	pub fn set_primary_field(&mut self, value: &str) {
		match self {
			Self::OpenUrl { url } => *url = value.to_owned(),
			Self::OpenFile { path } => *path = value.to_owned(),
			Self::RunCommand { command } | Self::SuggestCommand { command } => {
				*command = value.to_owned()
			}
			Self::ChangePage { page } => *page = value.trim().parse().unwrap_or(1).max(1),
			Self::CopyToClipboard { value: v } => *v = value.to_owned(),
			Self::ShowDialog { dialog } => *dialog = DialogRef::Id(value.to_owned()),
			Self::Custom { id, .. } => *id = value.to_owned(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityUuid {
	Text(String),
	Ints([i32; 4]),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HoverEvent {
	ShowText {
		value: Text,
	},
	ShowItem {
		id: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		count: Option<u32>,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		components: Option<Map<String, Value>>,
	},
	ShowEntity {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		name: Option<Text>,
		id: String,
		uuid: EntityUuid,
	},
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn content_kind_prefers_explicit_type() {
		let mut c = TextComponent::literal("hi");
		assert_eq!(c.content_kind(), ContentKind::Text);
		c.translate = Some("gui.ok".into());
		assert_eq!(c.content_kind(), ContentKind::Translatable);
		c.content_type = Some(ContentKind::Text);
		assert_eq!(c.content_kind(), ContentKind::Text);
	}

	#[test]
	fn switching_kind_clears_the_other_key() {
		let mut c = TextComponent::literal("hello");
		c.set_content_kind(ContentKind::Translatable);
		assert_eq!(c.text, None);
		assert_eq!(c.translate.as_deref(), Some(""));

		c.translate = Some("menu.title".into());
		c.with.push(Text::literal("arg"));
		c.set_content_kind(ContentKind::Text);
		assert_eq!(c.text.as_deref(), Some(""));
		assert_eq!(c.translate, None);
		assert!(c.with.is_empty());
	}

	#[test]
	fn decodes_string_object_and_array_text() {
		let plain: Text = serde_json::from_value(json!("Hello")).unwrap();
		assert_eq!(plain.plain_text().as_deref(), Some("Hello"));

		let object: Text =
			serde_json::from_value(json!({ "translate": "a.b", "bold": true })).unwrap();
		assert_eq!(object.plain_text().as_deref(), Some("a.b"));
		assert!(object.primary().flag(FormatFlag::Bold));

		let list: Text = serde_json::from_value(json!(["", { "text": "second" }])).unwrap();
		assert_eq!(list.plain_text().as_deref(), Some("second"));
	}

	#[test]
	fn click_and_hover_events_use_action_tag() {
		let c: TextComponent = serde_json::from_value(json!({
			"text": "link",
			"click_event": { "action": "open_url", "url": "https://example.com" },
			"hover_event": { "action": "show_text", "value": "tip" }
		}))
		.unwrap();
		assert_eq!(
			c.click_event,
			Some(ClickEvent::OpenUrl {
				url: "https://example.com".into()
			})
		);
		assert!(matches!(c.hover_event.as_deref(), Some(HoverEvent::ShowText { .. })));

		let entity: HoverEvent = serde_json::from_value(json!({
			"action": "show_entity", "id": "minecraft:pig", "uuid": [1, 2, 3, 4]
		}))
		.unwrap();
		assert!(matches!(
			entity,
			HoverEvent::ShowEntity {
				uuid: EntityUuid::Ints([1, 2, 3, 4]),
				..
			}
		));
	}

	#[test]
	fn primary_field_edits_round_trip() {
		let mut event = ClickEvent::empty(ClickEventKind::ChangePage);
		event.set_primary_field("7");
		assert_eq!(event, ClickEvent::ChangePage { page: 7 });
		event.set_primary_field("nope");
		assert_eq!(event.primary_field(), Some(("page", "1".to_string())));

		let mut event = ClickEvent::empty(ClickEventKind::ShowDialog);
		event.set_primary_field("other");
		assert_eq!(
			event,
			ClickEvent::ShowDialog {
				dialog: DialogRef::Id("other".into())
			}
		);
	}

	#[test]
	fn with_primary_keeps_trailing_entries() {
		let list = Text::List(vec![
			TextComponent::literal("a"),
			TextComponent::literal("b"),
		]);
		let edited = list.with_primary(TextComponent::literal("z"));
		assert_eq!(
			edited,
			Text::List(vec![
				TextComponent::literal("z"),
				TextComponent::literal("b")
			])
		);
		assert_eq!(
			Text::Scalar("x".into()).with_primary(TextComponent::literal("y")),
			Text::literal("y")
		);
	}
}
