//! Wikipedia thumbnail lookup with a passive, URL-keyed memo.
//!
//! Lookups are fire-and-forget: a late response only fills its cache entry,
//! and the detail panel reads whatever entry matches the node it shows.

use std::collections::HashMap;

use log::debug;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

/// Default REST path appended to `https://<lang>.wikipedia.org`.
pub const DEFAULT_SUMMARY_PATH: &str = "/api/rest_v1/page/summary/";

#[derive(Debug, Error)]
pub enum ImageError {
	#[error("not a Wikipedia article URL: {0}")]
	NotWikipedia(String),
	#[error("summary request failed: {0}")]
	Http(#[from] reqwest::Error),
	#[error("article has no thumbnail")]
	NoThumbnail,
}

#[derive(Deserialize)]
struct Summary {
	thumbnail: Option<ImageRef>,
	originalimage: Option<ImageRef>,
}

#[derive(Deserialize)]
struct ImageRef {
	source: String,
}

/// Map `https://<lang>.wikipedia.org/wiki/<Title>` to its REST summary URL.
pub fn summary_endpoint(article_url: &str, summary_path: &str) -> Result<Url, ImageError> {
	let not_wiki = || ImageError::NotWikipedia(article_url.to_string());

	let url = Url::parse(article_url).map_err(|_| not_wiki())?;
	let host = url.host_str().ok_or_else(not_wiki)?;
	if !host.ends_with(".wikipedia.org") {
		return Err(not_wiki());
	}
	let title = url
		.path()
		.strip_prefix("/wiki/")
		.filter(|t| !t.is_empty())
		.ok_or_else(not_wiki)?;

	let host = host.replacen(".m.wikipedia.org", ".wikipedia.org", 1);
	Url::parse(&format!("https://{host}{summary_path}{title}")).map_err(|_| not_wiki())
}

/// Fetch the thumbnail URL for an article.
pub async fn fetch_thumbnail(
	client: &Client,
	article_url: &str,
	summary_path: &str,
) -> Result<String, ImageError> {
	let endpoint = summary_endpoint(article_url, summary_path)?;
	let summary: Summary = client
		.get(endpoint)
		.send()
		.await?
		.error_for_status()?
		.json()
		.await?;

	summary
		.thumbnail
		.or(summary.originalimage)
		.map(|i| i.source)
		.ok_or(ImageError::NoThumbnail)
}

/// Like [`fetch_thumbnail`], but every failure resolves to "no image".
pub async fn lookup_image(client: &Client, article_url: &str, summary_path: &str) -> Option<String> {
	match fetch_thumbnail(client, article_url, summary_path).await {
		Ok(src) => Some(src),
		Err(e) => {
			debug!("sauce-graph: no image for {article_url}: {e}");
			None
		}
	}
}

/// State of one memoized lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageLookup {
	/// Never requested.
	Unknown,
	/// Request in flight.
	Pending,
	/// Finished; `None` means no image.
	Resolved(Option<String>),
}

/// Memo of image lookups keyed by article URL.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageCache {
	entries: HashMap<String, Option<Option<String>>>,
}

impl ImageCache {
	pub fn get(&self, url: &str) -> ImageLookup {
		match self.entries.get(url) {
			None => ImageLookup::Unknown,
			Some(None) => ImageLookup::Pending,
			Some(Some(image)) => ImageLookup::Resolved(image.clone()),
		}
	}

	/// Mark `url` as in flight. Returns `false` if a lookup already started or finished.
	pub fn begin(&mut self, url: &str) -> bool {
		if self.entries.contains_key(url) {
			return false;
		}
		self.entries.insert(url.to_string(), None);
		true
	}

	/// Record the outcome of a lookup.
	pub fn resolve(&mut self, url: &str, image: Option<String>) {
		self.entries.insert(url.to_string(), Some(image));
	}

	/// The resolved image for `url`, if any.
	pub fn image(&self, url: &str) -> Option<&str> {
		self.entries.get(url)?.as_ref()?.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoint_from_article_url() {
		let url = summary_endpoint(
			"https://en.wikipedia.org/wiki/Hollandaise_sauce",
			DEFAULT_SUMMARY_PATH,
		)
		.unwrap();
		assert_eq!(
			url.as_str(),
			"https://en.wikipedia.org/api/rest_v1/page/summary/Hollandaise_sauce"
		);
	}

	#[test]
	fn endpoint_keeps_language_and_drops_mobile_host() {
		let url = summary_endpoint(
			"https://fr.m.wikipedia.org/wiki/Sauce_b%C3%A9arnaise",
			DEFAULT_SUMMARY_PATH,
		)
		.unwrap();
		assert_eq!(
			url.as_str(),
			"https://fr.wikipedia.org/api/rest_v1/page/summary/Sauce_b%C3%A9arnaise"
		);
	}

	#[test]
	fn non_wikipedia_urls_are_rejected() {
		for url in [
			"https://example.com/wiki/Pesto",
			"https://en.wikipedia.org/w/index.php?title=Pesto",
			"https://en.wikipedia.org/wiki/",
			"not a url",
		] {
			assert!(
				matches!(
					summary_endpoint(url, DEFAULT_SUMMARY_PATH),
					Err(ImageError::NotWikipedia(_))
				),
				"{url}"
			);
		}
	}

	#[test]
	fn summary_prefers_thumbnail() {
		let summary: Summary = serde_json::from_str(
			r#"{"title": "Pesto",
				"thumbnail": {"source": "https://upload.wikimedia.org/thumb.jpg", "width": 320},
				"originalimage": {"source": "https://upload.wikimedia.org/full.jpg"}}"#,
		)
		.unwrap();
		let src = summary.thumbnail.or(summary.originalimage).map(|i| i.source);
		assert_eq!(src.as_deref(), Some("https://upload.wikimedia.org/thumb.jpg"));
	}

	#[test]
	fn cache_tracks_lookup_lifecycle() {
		let mut cache = ImageCache::default();
		let url = "https://en.wikipedia.org/wiki/Pesto";

		assert_eq!(cache.get(url), ImageLookup::Unknown);
		assert!(cache.begin(url));
		assert!(!cache.begin(url));
		assert_eq!(cache.get(url), ImageLookup::Pending);
		assert_eq!(cache.image(url), None);

		cache.resolve(url, Some("https://upload.wikimedia.org/pesto.jpg".into()));
		assert!(!cache.begin(url));
		assert_eq!(cache.image(url), Some("https://upload.wikimedia.org/pesto.jpg"));
	}

	#[test]
	fn failed_lookup_is_memoized_as_no_image() {
		let mut cache = ImageCache::default();
		let url = "https://en.wikipedia.org/wiki/Nothing";
		cache.begin(url);
		cache.resolve(url, None);
		assert_eq!(cache.get(url), ImageLookup::Resolved(None));
		assert!(!cache.begin(url));
	}
}
