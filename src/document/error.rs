use thiserror::Error;

use crate::dialog::UnknownDialogType;

#[derive(Debug, Error)]
pub enum ImportError {
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error("invalid format: expected an object with a `nodes` array")]
	InvalidFormat,
	#[error("node {index}: {source}")]
	UnknownDialogType {
		index: usize,
		#[source]
		source: UnknownDialogType,
	},
}

#[derive(Debug, Error)]
pub enum ExportError {
	#[error("failed to serialize document: {0}")]
	Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
	#[error("node `{0}` not found")]
	NodeNotFound(String),
	#[error("node id must not be empty")]
	EmptyId,
	#[error("node id `{0}` is already in use")]
	DuplicateId(String),
}
