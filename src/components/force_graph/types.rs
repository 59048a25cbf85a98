//! Graph data structures for input to the force graph component.

/// A node in the graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links and
	/// reported back on click.
	pub id: String,
	/// Optional display label drawn beside the node.
	pub label: Option<String>,
	/// Optional CSS color override (e.g., "#ff0000" or "rgb(255, 0, 0)").
	/// If not set, color is derived from the theme palette based on `group`.
	pub color: Option<String>,
	/// Optional group name for class-based coloring (e.g., "country-fr").
	pub group: Option<String>,
	/// Size multiplier (1.0 = normal). Connection count scales it further.
	pub size: f64,
	/// Draw a selection ring around the node.
	pub selected: bool,
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Dashed, animated line without an arrowhead. Solid links get an arrow.
	pub dashed: bool,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// A click on a node, reported by the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeClick {
	/// ID of the clicked node.
	pub id: String,
	/// Whether a modifier key (shift, ctrl or meta) was held.
	pub additive: bool,
}
