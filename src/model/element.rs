use super::{FieldValue, Record};
use serde::Serialize;
use std::collections::BTreeMap;

/// A typed BIM element, selectable through property-based field access.
///
/// The fixed properties are exposed under their display names; anything in
/// `parameters` is reachable by parameter name.
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub id: u64,
    pub global_id: String,
    pub name: String,
    pub category: String,
    pub type_name: Option<String>,
    pub level: Option<String>,
    pub parameters: BTreeMap<String, String>,
}

impl Element {
    pub const COLUMNS: [&'static str; 5] = ["Id", "Name", "Category", "Type", "Level"];

    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            global_id: String::new(),
            name: name.into(),
            category: category.into(),
            type_name: None,
            level: None,
            parameters: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

impl Record for Element {
    fn field(&self, column: &str) -> Option<FieldValue> {
        match column {
            "Id" => Some(FieldValue::Id(self.id)),
            "GlobalId" if !self.global_id.is_empty() => {
                Some(FieldValue::Text(self.global_id.clone()))
            }
            "Name" => Some(FieldValue::Text(self.name.clone())),
            "Category" => Some(FieldValue::Text(self.category.clone())),
            "Type" => self.type_name.clone().map(FieldValue::Text),
            "Level" => self.level.clone().map(FieldValue::Text),
            other => self
                .parameters
                .get(other)
                .map(|v| FieldValue::parse_text(v)),
        }
    }

    fn column_names(&self) -> Vec<String> {
        Self::COLUMNS.iter().map(ToString::to_string).collect()
    }
}
