//! sauce-graph: Interactive force-directed graph of sauces.
//!
//! The page embeds a JSON dataset of sauces. This crate derives a graph of
//! sauces, their parent sauces and their ingredients from it, and renders the
//! visible part as a physics-based canvas with search, ingredient filters and
//! a detail panel for the selected sauce.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};

pub mod app;
pub mod components;
pub mod config;
pub mod sauces;

pub use components::force_graph::{ForceGraphCanvas, GraphData, GraphLink, GraphNode, NodeClick};

use app::AppState;
use components::controls::Controls;
use components::details::DetailPanel;
use config::AppConfig;
use sauces::{SauceGraph, ViewState, load_dataset};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("sauce-graph: logging initialized");
}

/// Read the embedded dataset and derive the graph. An unreadable dataset
/// yields an empty graph.
fn load_graph(config: &AppConfig) -> SauceGraph {
	match load_dataset(&config.dataset_element) {
		Ok(dataset) => {
			let graph = SauceGraph::derive(&dataset.sauces);
			info!(
				"sauce-graph: loaded {} sauces, {} ingredients, {} links",
				graph.sauce_count(),
				graph.ingredient_count(),
				graph.links().len()
			);
			graph
		}
		Err(e) => {
			warn!("sauce-graph: failed to load dataset: {}", e);
			SauceGraph::default()
		}
	}
}

/// Main application component.
/// Loads the dataset from the DOM and renders the graph with its controls.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::load();
	let graph = load_graph(&config);
	let state = AppState::new(
		graph,
		ViewState::new(config.initial_mode),
		config.summary_path.clone(),
	);

	Effect::new(move |_| state.reconcile_selection());
	Effect::new(move |_| state.request_detail_image());

	let graph_data = Memo::new(move |_| state.graph_data());
	let on_node_click = Callback::new(move |click: NodeClick| state.click_node(&click));
	let title = config.title;

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text=title.clone() />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_data fullscreen=true on_node_click=on_node_click />
			<div class="graph-overlay">
				<h1>{title}</h1>
				<p class="subtitle">
					"Click a sauce for details. Shift-click ingredients to combine filters. Drag to pan, scroll to zoom."
				</p>
				<Controls state=state />
			</div>
			<aside class="detail-panel">
				<DetailPanel state=state />
			</aside>
		</div>
	}
}
