//! Reactive application state shared by the page components.
//!
//! The derived graph is stored once and never mutated. User choices live in
//! a [`ViewState`] signal and a [`Selection`] signal; every redraw filters
//! the stored graph afresh from those two values.

use leptos::prelude::*;
use log::{debug, info};

use crate::components::force_graph::{GraphData, NodeClick};
use crate::sauces::{
	FilteredGraph, ImageCache, SauceGraph, Selection, ViewState, VisibleCounts, filter_graph,
	lookup_image, to_graph_data,
};

/// Handles to the graph and interaction signals. Cheap to copy into closures.
#[derive(Clone, Copy)]
pub struct AppState {
	/// The derived graph, fixed after load.
	pub graph: StoredValue<SauceGraph>,
	pub view: RwSignal<ViewState>,
	/// Detail panel subject.
	pub selection: RwSignal<Selection>,
	/// Thumbnails keyed by Wikipedia article URL.
	pub images: RwSignal<ImageCache>,
	summary_path: StoredValue<String>,
}

impl AppState {
	pub fn new(graph: SauceGraph, view: ViewState, summary_path: String) -> Self {
		Self {
			graph: StoredValue::new(graph),
			view: RwSignal::new(view),
			selection: RwSignal::new(Selection::default()),
			images: RwSignal::new(ImageCache::default()),
			summary_path: StoredValue::new(summary_path),
		}
	}

	/// Run `f` over the visible subset for the current view state (tracked).
	pub fn with_visible<T>(&self, f: impl FnOnce(&FilteredGraph<'_>) -> T) -> T {
		let view = self.view.get();
		self.graph.with_value(|g| f(&filter_graph(g, &view)))
	}

	/// Canvas input for the current view and selection (tracked).
	pub fn graph_data(&self) -> GraphData {
		let selection = self.selection.get();
		let view = self.view.get();
		self.graph
			.with_value(|g| to_graph_data(&filter_graph(g, &view), &view, &selection))
	}

	pub fn counts(&self) -> VisibleCounts {
		self.with_visible(VisibleCounts::of)
	}

	/// Route a canvas click through the selection rules.
	pub fn click_node(&self, click: &NodeClick) {
		let mut view = self.view.get_untracked();
		let mut selection = self.selection.get_untracked();
		let known = self.graph.with_value(|g| match g.node(&click.id) {
			Some(node) => {
				selection.click(node, click.additive, &mut view);
				true
			}
			None => false,
		});
		if !known {
			debug!("sauce-graph: click on unknown node `{}`", click.id);
			return;
		}
		self.view.set(view);
		self.selection.set(selection);
	}

	/// Open the details of sauce `id` from a detail-panel link, lifting any
	/// filter that would hide it.
	pub fn navigate_to(&self, id: &str) {
		let mut view = self.view.get_untracked();
		let mut selection = self.selection.get_untracked();
		self.graph
			.with_value(|g| selection.navigate(g, id, &mut view));
		if view != self.view.get_untracked() {
			self.view.set(view);
		}
		self.selection.set(selection);
	}

	/// Drop a detail subject the current filter hides. Tracks only the view state.
	pub fn reconcile_selection(&self) {
		let dropped = self.with_visible(|visible| {
			let mut selection = self.selection.get_untracked();
			selection.reconcile(visible).then_some(selection)
		});
		if let Some(selection) = dropped {
			info!("sauce-graph: selected sauce filtered out, clearing details");
			self.selection.set(selection);
		}
	}

	/// Start an image lookup for the detail subject unless one is cached or in flight.
	pub fn request_detail_image(&self) {
		let Some(url) = self.selection.with(|s| {
			let id = s.detail()?;
			self.graph
				.with_value(|g| g.node(id)?.as_sauce()?.wikipedia.clone())
		}) else {
			return;
		};

		let mut start = false;
		self.images.update(|cache| start = cache.begin(&url));
		if !start {
			return;
		}

		let images = self.images;
		let path = self.summary_path.get_value();
		leptos::task::spawn_local(async move {
			let client = reqwest::Client::new();
			let image = lookup_image(&client, &url, &path).await;
			images.update(|cache| cache.resolve(&url, image));
		});
	}
}
