//! Force-directed graph visualization component.
//!
//! Renders an interactive force-directed graph on an HTML canvas with:
//! - Physics-based node positioning via force simulation
//! - Pan, zoom, node dragging and node clicks
//! - Smooth highlight transitions on hover, rings on selected nodes
//! - Solid arrowed links and dashed flowing links
//!
//! # Example
//!
//! ```ignore
//! use sauce_graph::{ForceGraphCanvas, GraphData, GraphNode, GraphLink};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "a".into(), label: Some("Node A".into()), size: 1.0, ..Default::default() },
//!         GraphNode { id: "b".into(), label: Some("Node B".into()), size: 1.0, ..Default::default() },
//!     ],
//!     links: vec![
//!         GraphLink { source: "a".into(), target: "b".into(), dashed: false },
//!     ],
//! };
//!
//! view! { <ForceGraphCanvas data=data on_node_click=|click| log::info!("{}", click.id) /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, NodeClick};
