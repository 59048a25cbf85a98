//! Dataset loading: the static sauce list embedded in the host page.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Errors raised while reading the embedded dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
	/// No element with the configured id exists in the document.
	#[error("no element with id `{0}` in the document")]
	MissingElement(String),
	/// The element exists but its text could not be read.
	#[error("element `{0}` has no readable text")]
	Unreadable(String),
	/// The element text is not a valid dataset document.
	#[error("invalid dataset JSON: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Sauce classification taken from the dataset `type` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SauceKind {
	/// One of the classical mother sauces other sauces derive from.
	Mother,
	/// Any other sauce. Unknown or missing types land here.
	#[default]
	#[serde(other)]
	Sauce,
}

impl SauceKind {
	/// Display name used in the detail panel.
	pub fn label(self) -> &'static str {
		match self {
			Self::Mother => "Mother sauce",
			Self::Sauce => "Sauce",
		}
	}
}

/// A single sauce record as it appears in the dataset.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SauceNode {
	pub id: String,
	pub name: String,
	#[serde(rename = "type", default, deserialize_with = "kind_or_default")]
	pub kind: SauceKind,
	#[serde(default, deserialize_with = "non_empty")]
	pub country: Option<String>,
	#[serde(default, deserialize_with = "non_empty")]
	pub description: Option<String>,
	#[serde(default, deserialize_with = "non_empty")]
	pub wikipedia: Option<String>,
	#[serde(default, deserialize_with = "non_empty")]
	pub parent: Option<String>,
	#[serde(default, deserialize_with = "non_empty")]
	pub relationship_to_parent: Option<String>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub ingredients: Vec<String>,
}

impl SauceNode {
	/// Minimal record with no optional fields, handy for building datasets in code.
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			kind: SauceKind::Sauce,
			country: None,
			description: None,
			wikipedia: None,
			parent: None,
			relationship_to_parent: None,
			ingredients: Vec::new(),
		}
	}

	/// Builder-style setter for the ingredient list.
	pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.ingredients = ingredients.into_iter().map(Into::into).collect();
		self
	}

	/// Builder-style setter for the parent reference and its label.
	pub fn with_parent(mut self, parent: impl Into<String>, relationship: Option<&str>) -> Self {
		self.parent = Some(parent.into());
		self.relationship_to_parent = relationship.map(str::to_string);
		self
	}
}

/// The loaded sauce list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
	pub sauces: Vec<SauceNode>,
}

/// Accepts either a bare array of records or an object wrapping one.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
	List(Vec<SauceNode>),
	Wrapped { sauces: Vec<SauceNode> },
}

impl Dataset {
	/// Parse a dataset document.
	pub fn from_json(text: &str) -> Result<Self, DatasetError> {
		let sauces = match serde_json::from_str::<Document>(text)? {
			Document::List(sauces) | Document::Wrapped { sauces } => sauces,
		};
		Ok(Self { sauces })
	}

	pub fn is_empty(&self) -> bool {
		self.sauces.is_empty()
	}
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<String>::deserialize(deserializer)?;
	Ok(value.filter(|s| !s.trim().is_empty()))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn kind_or_default<'de, D>(deserializer: D) -> Result<SauceKind, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<SauceKind>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read and parse the dataset from a `<script type="application/json">` element.
pub fn load_dataset(element_id: &str) -> Result<Dataset, DatasetError> {
	use wasm_bindgen::JsCast;
	use web_sys::HtmlScriptElement;

	let element = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(element_id))
		.ok_or_else(|| DatasetError::MissingElement(element_id.to_string()))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| DatasetError::Unreadable(element_id.to_string()))?;
	let text = script
		.text()
		.map_err(|_| DatasetError::Unreadable(element_id.to_string()))?;

	Dataset::from_json(&text)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_bare_array_with_defaults() {
		let text = r#"[
			{"id": "bechamel", "name": "Béchamel", "type": "mother", "country": "FR",
			 "ingredients": ["Milk", "Butter", "Flour"]},
			{"id": "mornay", "name": "Mornay", "parent": "bechamel",
			 "relationshipToParent": "adds cheese"}
		]"#;

		let dataset = Dataset::from_json(text).unwrap();
		assert_eq!(dataset.sauces.len(), 2);

		let bechamel = &dataset.sauces[0];
		assert_eq!(bechamel.kind, SauceKind::Mother);
		assert_eq!(bechamel.country.as_deref(), Some("FR"));
		assert_eq!(bechamel.ingredients, vec!["Milk", "Butter", "Flour"]);

		let mornay = &dataset.sauces[1];
		assert_eq!(mornay.kind, SauceKind::Sauce);
		assert_eq!(mornay.parent.as_deref(), Some("bechamel"));
		assert_eq!(mornay.relationship_to_parent.as_deref(), Some("adds cheese"));
		assert!(mornay.ingredients.is_empty());
		assert!(mornay.description.is_none());
	}

	#[test]
	fn parses_wrapped_document() {
		let text = r#"{"sauces": [{"id": "pesto", "name": "Pesto", "country": "IT"}]}"#;
		let dataset = Dataset::from_json(text).unwrap();
		assert_eq!(dataset.sauces[0].name, "Pesto");
	}

	#[test]
	fn unknown_and_null_type_fall_back_to_sauce() {
		let text = r#"[
			{"id": "a", "name": "A", "type": "condiment"},
			{"id": "b", "name": "B", "type": null, "ingredients": null}
		]"#;
		let dataset = Dataset::from_json(text).unwrap();
		assert!(dataset.sauces.iter().all(|s| s.kind == SauceKind::Sauce));
		assert!(dataset.sauces[1].ingredients.is_empty());
	}

	#[test]
	fn blank_optional_fields_are_absent() {
		let text = r#"[{"id": "a", "name": "A", "country": "", "wikipedia": "  "}]"#;
		let dataset = Dataset::from_json(text).unwrap();
		assert!(dataset.sauces[0].country.is_none());
		assert!(dataset.sauces[0].wikipedia.is_none());
	}

	#[test]
	fn malformed_document_is_an_error() {
		let err = Dataset::from_json("{\"nodes\": 3}").unwrap_err();
		assert!(matches!(err, DatasetError::Parse(_)));
	}
}
