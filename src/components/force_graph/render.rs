//! Canvas rendering for the force graph.
//!
//! Draw order:
//! 1. Background and vignette frame (screen space)
//! 2. Edges: solid parent edges with arrowheads, dashed flowing ingredient edges
//! 3. Dimmed nodes, then hovered/selected nodes with rings and labels on top

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, NodeInfo};
use super::theme::{Color, Theme};

/// Ease values that would otherwise change abruptly.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, config, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}
}

fn fill_radial(
	ctx: &CanvasRenderingContext2d,
	circles: (f64, f64, f64, f64, f64, f64),
	stops: &[(f32, String)],
) -> bool {
	let (x0, y0, r0, x1, y1, r1) = circles;
	let Ok(gradient) = ctx.create_radial_gradient(x0, y0, r0, x1, y1, r1) else {
		return false;
	};
	for (offset, color) in stops {
		if gradient.add_color_stop(*offset, color).is_err() {
			return false;
		}
	}
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	true
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let bg = &theme.background;
	let gradient_set = bg.use_gradient
		&& fill_radial(
			ctx,
			(cx, cy, 0.0, cx, cy, state.width.max(state.height) * 0.8),
			&[
				(0.0, bg.color_secondary.to_css()),
				(1.0, bg.color.to_css()),
			],
		);
	if !gradient_set {
		ctx.set_fill_style_str(&bg.color.to_css());
	}
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	if fill_radial(
		ctx,
		(
			cx,
			cy,
			state.width.min(state.height) * 0.3,
			cx,
			cy,
			state.width.max(state.height) * 0.7,
		),
		&[
			(0.0, "rgba(0, 0, 0, 0)".to_string()),
			(1.0, format!("rgba(0, 0, 0, {})", theme.background.vignette)),
		],
	) {
		ctx.fill_rect(0.0, 0.0, state.width, state.height);
	}
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let dash_offset = scale.dash_offset(state.flow_time, config.flow_speed);
	let max_t = smooth_step(state.highlight.max_intensity());
	let solid = js_sys::Array::new();
	let dashed = js_sys::Array::of2(
		&JsValue::from_f64(scale.dash_pattern.0),
		&JsValue::from_f64(scale.dash_pattern.1),
	);

	state.graph.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let r1 = scale.node_radius * n1.data.user_data.size;
		let r2 = scale.node_radius * n2.data.user_data.size;

		// Highlighted edges brighten, the rest dim while anything is hovered.
		let edge_t = smooth_step(state.highlight.edge_intensity(n1.index(), n2.index()));
		let (alpha, width) = if edge_t > 0.01 {
			(0.7 + 0.3 * edge_t, scale.edge_line_width * (1.0 + 0.4 * edge_t))
		} else {
			(0.7 - 0.5 * max_t, scale.edge_line_width * (1.0 - 0.3 * max_t))
		};

		let is_dashed = edge.user_data.dashed;
		let color = if is_dashed {
			theme.edge.dashed_color
		} else {
			theme.edge.color
		};
		let arrow = if is_dashed { 0.0 } else { scale.arrow_size };

		ctx.set_stroke_style_str(&color.with_alpha(alpha * color.a).to_css());
		ctx.set_line_width(width);
		if is_dashed {
			let _ = ctx.set_line_dash(&dashed);
			ctx.set_line_dash_offset(dash_offset);
		} else {
			let _ = ctx.set_line_dash(&solid);
		}

		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow), y2 - uy * (r2 + arrow));
		ctx.stroke();

		let arrow_alpha = alpha * scale.arrow_alpha;
		if !is_dashed && arrow_alpha > 0.02 {
			let _ = ctx.set_line_dash(&solid);
			ctx.set_fill_style_str(&color.with_alpha(arrow_alpha * color.a).to_css());

			let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
			let (back_x, back_y) = (tip_x - ux * arrow, tip_y - uy * arrow);
			let (px, py) = (-uy * arrow * 0.5, ux * arrow * 0.5);

			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	});

	let _ = ctx.set_line_dash(&solid);
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let dim_alpha = 1.0 - 0.7 * max_t;
	let dim_radius = 1.0 - 0.15 * max_t;

	let is_front = |node: &force_graph::Node<NodeInfo>| {
		node.data.user_data.selected || state.highlight.node_intensity(node.index()) > 0.001
	};

	// Pass 1: nodes in the background of the current hover.
	state.graph.visit_nodes(|node| {
		if !is_front(node) {
			draw_node(ctx, node, scale, theme, dim_alpha, dim_radius, false);
		}
	});

	// Pass 2: hovered, neighbouring and selected nodes on top.
	state.graph.visit_nodes(|node| {
		if !is_front(node) {
			return;
		}
		let idx = node.index();
		let eased_t = smooth_step(state.highlight.node_intensity(idx));
		let hover_t = smooth_step(state.highlight.hover_ring_intensity(idx));

		let highlight_radius = 1.0 + (0.25 + 0.15 * hover_t) * eased_t;
		let alpha = if node.data.user_data.selected {
			1.0
		} else {
			dim_alpha + (1.0 - dim_alpha) * eased_t
		};
		let radius_mult = dim_radius + (highlight_radius - dim_radius) * eased_t;
		draw_node(ctx, node, scale, theme, alpha, radius_mult, true);

		let (x, y) = (node.x() as f64, node.y() as f64);
		let radius = scale.node_radius * radius_mult * node.data.user_data.size;

		if node.data.user_data.selected {
			ring(
				ctx,
				x,
				y,
				radius + scale.ring_offset,
				theme.node.selected_color,
				scale.ring_width * 1.5,
			);
		}
		if hover_t > 0.01 {
			let white = Color::rgb(255, 255, 255);
			ring(
				ctx,
				x,
				y,
				radius + scale.ring_offset * 2.5,
				white.with_alpha(0.8 * hover_t),
				scale.ring_width,
			);
		}
	});
}

fn ring(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64, color: Color, width: f64) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);
	ctx.stroke();
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &force_graph::Node<NodeInfo>,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	radius_mult: f64,
	front: bool,
) {
	let info = &node.data.user_data;
	let (x, y) = (node.x() as f64, node.y() as f64);
	let radius = scale.node_radius * radius_mult * info.size;
	let base = Color::parse(&info.color);

	ctx.set_global_alpha(alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	let gradient_set = theme.node.use_gradient
		&& fill_radial(
			ctx,
			(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius),
			&[
				(0.0, base.lighten(0.4).to_css()),
				(0.7, base.to_css()),
				(1.0, base.darken(0.2).to_css()),
			],
		);
	if !gradient_set {
		ctx.set_fill_style_str(&info.color);
	}
	ctx.fill();

	// Background labels fade out when zoomed far out; front labels always show.
	let label_alpha = if front {
		alpha
	} else {
		alpha * scale.label_alpha
	};
	if let Some(label) = &info.label
		&& label_alpha > 0.05
	{
		ctx.set_global_alpha(label_alpha);
		ctx.set_fill_style_str(&theme.node.label_color.to_css());
		ctx.set_font(&scale.label_font);
		let _ = ctx.fill_text(label, x + radius + 4.0, y + 3.0);
	}
	ctx.set_global_alpha(1.0);
}
