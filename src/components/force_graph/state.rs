//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node metadata, view
//! transforms for pan/zoom, and hover highlight state with smooth fades.
//! The state is rebuilt whenever the visible graph changes; positions of
//! nodes that stay visible are carried over so the layout does not jump.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Theme;
use super::types::GraphData;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: Option<String>,
	pub color: String,
	/// Size multiplier (1.0 = normal, >1.0 = larger/more important)
	pub size: f64,
	pub selected: bool,
}

/// Per-edge display metadata.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeInfo {
	pub dashed: bool,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Pointer travelled far enough that the release is not a click.
	pub moved: bool,
}

/// Pointer travel (screen px) below which a press and release count as a click.
pub const CLICK_SLOP: f64 = 4.0;

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Intensity of one fading highlight plus the time it must hold before fading.
#[derive(Clone, Copy, Debug, Default)]
struct Fade {
	value: f64,
	hold: f64,
}

/// Minimum time (seconds) a highlight must be held before it can fade out.
const MIN_HOLD_TIME: f64 = 0.12;
const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;
const FADE_FLOOR: f64 = 0.005;

/// Hover highlight with per-node intensities eased towards their targets.
///
/// The hovered node and its neighbours fade in; everything that leaves the
/// set holds briefly, then decays exponentially.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered_node: Option<DefaultNodeIdx>,
	target_set: HashSet<DefaultNodeIdx>,
	nodes: HashMap<DefaultNodeIdx, Fade>,
	ring: HashMap<DefaultNodeIdx, Fade>,
	cached_max: f64,
}

impl HighlightState {
	/// Update the hovered node and recompute the target highlight set.
	pub fn set_hover(
		&mut self,
		node: Option<DefaultNodeIdx>,
		edges: &[(DefaultNodeIdx, DefaultNodeIdx)],
	) {
		if self.hovered_node == node {
			return;
		}
		self.hovered_node = node;
		self.target_set.clear();

		let Some(idx) = node else {
			return;
		};
		self.target_set.insert(idx);
		for &(src, tgt) in edges {
			if src == idx {
				self.target_set.insert(tgt);
			} else if tgt == idx {
				self.target_set.insert(src);
			}
		}
		for &i in &self.target_set {
			self.nodes.entry(i).or_default().hold = MIN_HOLD_TIME;
		}
		self.ring.entry(idx).or_default().hold = MIN_HOLD_TIME;
	}

	/// Advance all fades by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let rise = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let decay = (-FADE_OUT_SPEED * dt).exp();

		let step = |fade: &mut Fade, active: bool| {
			if active {
				fade.value += (1.0 - fade.value) * rise;
			} else if fade.hold > 0.0 {
				fade.hold -= dt;
			} else {
				fade.value *= decay;
			}
			active || fade.value > FADE_FLOOR
		};

		for &idx in &self.target_set {
			self.nodes.entry(idx).or_default();
		}
		if let Some(idx) = self.hovered_node {
			self.ring.entry(idx).or_default();
		}

		let targets = &self.target_set;
		self.nodes.retain(|idx, fade| step(fade, targets.contains(idx)));
		let hovered = self.hovered_node;
		self.ring.retain(|idx, fade| step(fade, hovered == Some(*idx)));

		self.cached_max = self.nodes.values().map(|f| f.value).fold(0.0, f64::max);
	}

	/// Smoothed highlight intensity of a node (0.0 to 1.0).
	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.nodes.get(&idx).map_or(0.0, |f| f.value)
	}

	/// Smoothed hover ring intensity of a node.
	pub fn hover_ring_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.ring.get(&idx).map_or(0.0, |f| f.value)
	}

	/// Edge intensity as the geometric mean of its endpoints.
	pub fn edge_intensity(&self, idx1: DefaultNodeIdx, idx2: DefaultNodeIdx) -> f64 {
		(self.node_intensity(idx1) * self.node_intensity(idx2)).sqrt()
	}

	/// Highest node intensity, used to dim everything else.
	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}
}

/// Stable palette slot for a group name, so a class keeps its color across rebuilds.
fn palette_slot(group: &str) -> usize {
	let mut hasher = DefaultHasher::new();
	group.hash(&mut hasher);
	hasher.finish() as usize
}

/// Core graph state combining physics simulation with interaction and highlight tracking.
///
/// Rebuilt when the visible graph changes, mutated each frame by the
/// animation loop.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, theme: &Theme) -> Self {
		Self::with_positions(data, width, height, theme, &HashMap::new())
	}

	/// Build the simulation, seeding nodes found in `positions` at their old place.
	pub fn with_positions(
		data: &GraphData,
		width: f64,
		height: f64,
		theme: &Theme,
		positions: &HashMap<String, (f32, f32)>,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		let mut edge_counts: HashMap<&str, usize> = HashMap::new();
		let mut neighbours: HashMap<&str, Vec<&str>> = HashMap::new();
		for link in &data.links {
			*edge_counts.entry(&link.source).or_insert(0) += 1;
			*edge_counts.entry(&link.target).or_insert(0) += 1;
			neighbours.entry(&link.source).or_default().push(&link.target);
			neighbours.entry(&link.target).or_default().push(&link.source);
		}
		let max_edges = edge_counts.values().copied().max().unwrap_or(1).max(1);

		for (i, node) in data.nodes.iter().enumerate() {
			let color = node.color.clone().unwrap_or_else(|| {
				let slot = node.group.as_deref().map_or(i, palette_slot);
				theme.palette.get(slot).to_css_rgb()
			});

			// Keep the old spot, else join a placed neighbour, else ring around the centre.
			let angle = (i as f64) * 2.0 * PI / data.nodes.len().max(1) as f64;
			let (x, y) = positions
				.get(&node.id)
				.copied()
				.or_else(|| {
					neighbours
						.get(node.id.as_str())?
						.iter()
						.find_map(|n| positions.get(*n))
						.map(|&(nx, ny)| {
							(nx + 20.0 * angle.cos() as f32, ny + 20.0 * angle.sin() as f32)
						})
				})
				.unwrap_or((
					(width / 2.0 + 100.0 * angle.cos()) as f32,
					(height / 2.0 + 100.0 * angle.sin()) as f32,
				));

			// Connected nodes grow a little on top of their class size.
			let node_edges = edge_counts.get(node.id.as_str()).copied().unwrap_or(0);
			let edge_factor = (node_edges as f64 / max_edges as f64).sqrt();
			let size = node.size.max(0.1) * (0.85 + 0.3 * edge_factor);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color,
					size,
					selected: node.selected,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeInfo {
							dashed: link.dashed,
						},
					},
				);
				edges.push((src, tgt));
			}
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	/// Rebuild for new data, keeping positions, pan/zoom and animation clock.
	pub fn rebuild(&mut self, data: &GraphData, theme: &Theme) {
		let positions = self.positions();
		let mut next = Self::with_positions(data, self.width, self.height, theme, &positions);
		next.transform = self.transform.clone();
		next.flow_time = self.flow_time;
		*self = next;
	}

	/// Current position of every node by id.
	pub fn positions(&self) -> HashMap<String, (f32, f32)> {
		let mut out = HashMap::new();
		self.graph.visit_nodes(|node| {
			out.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});
		out
	}

	/// Id of the node at simulation index `idx`.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let node_hit_radius = scale.hit_radius * node.data.user_data.size;
			if (dx * dx + dy * dy).sqrt() < node_hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node, &self.edges);
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
		self.highlight.tick(dt as f64);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
