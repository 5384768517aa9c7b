use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::flexible::ScalarItem;
use super::text::Text;

pub const DEFAULT_MESSAGE_WIDTH: u32 = 200;
pub const DEFAULT_ITEM_SIZE: u32 = 16;
pub const MAX_ITEM_SIZE: u32 = 256;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BodyElement {
	#[serde(rename = "minecraft:plain_message")]
	PlainMessage(PlainMessage),
	#[serde(rename = "minecraft:item")]
	Item(ItemBody),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlainMessage {
	pub contents: Text,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
	pub id: String,
	#[serde(default = "default_count")]
	pub count: u32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub components: Option<Map<String, Value>>,
}

fn default_count() -> u32 {
	1
}

/// Either bare text or text with its own width.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Description {
	Block {
		contents: Text,
		#[serde(skip_serializing_if = "Option::is_none")]
		width: Option<u32>,
	},
	Text(Text),
}

impl<'de> Deserialize<'de> for Description {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		struct Block {
			contents: Text,
			#[serde(default)]
			width: Option<u32>,
		}

		let value = Value::deserialize(deserializer)?;
		if value.get("contents").is_some() {
			let Block { contents, width } =
				serde_json::from_value(value).map_err(de::Error::custom)?;
			Ok(Self::Block { contents, width })
		} else {
			serde_json::from_value(value)
				.map(Self::Text)
				.map_err(de::Error::custom)
		}
	}
}

impl Description {
	pub fn contents(&self) -> &Text {
		match self {
			Self::Block { contents, .. } | Self::Text(contents) => contents,
		}
	}

	pub fn set_contents(&mut self, text: Text) {
		match self {
			Self::Block { contents, .. } | Self::Text(contents) => *contents = text,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemBody {
	pub item: ItemStack,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<Description>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub show_decoration: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub show_tooltip: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub height: Option<u32>,
}

impl BodyElement {
	pub fn plain(text: impl Into<String>) -> Self {
		Self::PlainMessage(PlainMessage {
			contents: Text::literal(text),
			width: Some(DEFAULT_MESSAGE_WIDTH),
		})
	}

	pub fn item(id: impl Into<String>) -> Self {
		Self::Item(ItemBody {
			item: ItemStack {
				id: id.into(),
				count: 1,
				components: None,
			},
			description: None,
			show_decoration: None,
			show_tooltip: None,
			width: None,
			height: None,
		})
	}

	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::PlainMessage(_) => "minecraft:plain_message",
			Self::Item(_) => "minecraft:item",
		}
	}

	/// A plain message with no visible text.
	pub fn is_blank(&self) -> bool {
		matches!(self, Self::PlainMessage(message) if message.contents.is_blank())
	}
}

impl ScalarItem for BodyElement {
	fn from_scalar(value: String) -> Self {
		Self::PlainMessage(PlainMessage {
			contents: Text::Scalar(value),
			width: None,
		})
	}
}
