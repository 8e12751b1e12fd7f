use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::csv::Row;
use super::model::SheetRow;

/// Header name → new cell value.
pub type RowData = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Update,
}

impl Action {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "read" => Some(Action::Read),
            "update" => Some(Action::Update),
            _ => None,
        }
    }

    /// Missing, null, and non-string actions are all unknown.
    pub fn from_value(value: Option<&Value>) -> Option<Self> {
        value.and_then(Value::as_str).and_then(Self::parse)
    }
}

/// Request body for the sheet endpoint.
#[derive(Debug, Deserialize)]
pub struct SheetRequest {
    #[serde(default)]
    pub action: Option<Value>,
    #[serde(default)]
    pub row: Option<SheetRow>,
    #[serde(default)]
    pub data: Option<RowData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadResponse {
    pub data: Vec<Row>,
    pub user_email: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
}
