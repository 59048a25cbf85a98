//! Application configuration read from the host page.
//!
//! Every field has a default, so the page only needs a
//! `<script id="sauce-config" type="application/json">` element to override
//! what it cares about. Without one the defaults apply.

use log::warn;
use serde::Deserialize;

use crate::sauces::ViewMode;
use crate::sauces::image::DEFAULT_SUMMARY_PATH;

/// Id of the optional configuration element.
pub const CONFIG_ELEMENT_ID: &str = "sauce-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
	/// Id of the `<script>` element holding the dataset.
	pub dataset_element: String,
	/// View mode on first render.
	pub initial_mode: ViewMode,
	/// Document title and overlay heading.
	pub title: String,
	/// REST path used to resolve article thumbnails.
	pub summary_path: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			dataset_element: "sauce-data".to_string(),
			initial_mode: ViewMode::SaucesOnly,
			title: "Sauce Graph".to_string(),
			summary_path: DEFAULT_SUMMARY_PATH.to_string(),
		}
	}
}

impl AppConfig {
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Read the configuration element, falling back to defaults.
	pub fn load() -> Self {
		use wasm_bindgen::JsCast;
		use web_sys::HtmlScriptElement;

		let Some(text) = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|e| e.dyn_into::<HtmlScriptElement>().ok())
			.and_then(|s| s.text().ok())
		else {
			return Self::default();
		};

		Self::from_json(&text).unwrap_or_else(|e| {
			warn!("sauce-graph: ignoring invalid config: {}", e);
			Self::default()
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_config_keeps_defaults() {
		let config =
			AppConfig::from_json(r#"{"initialMode": "with_ingredients", "title": "Sauces"}"#)
				.unwrap();
		assert_eq!(config.initial_mode, ViewMode::WithIngredients);
		assert_eq!(config.title, "Sauces");
		assert_eq!(config.dataset_element, "sauce-data");
		assert_eq!(config.summary_path, DEFAULT_SUMMARY_PATH);
	}

	#[test]
	fn empty_object_is_default() {
		assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
	}

	#[test]
	fn unknown_mode_is_rejected() {
		assert!(AppConfig::from_json(r#"{"initialMode": "everything"}"#).is_err());
	}
}
