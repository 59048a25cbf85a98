//! Presentation adapter: per-node display attributes for the canvas.
//!
//! Size follows the node kind (mother sauces largest, ingredients smallest),
//! color follows a class derived from kind and country. Classes without a
//! fixed color fall through to the theme palette in the canvas.

use std::fmt;

use super::dataset::SauceKind;
use super::derive::{LinkKind, Node};
use super::filter::{FilteredGraph, ViewState};
use super::selection::Selection;
use crate::components::force_graph::{GraphData, GraphLink, GraphNode};

/// Color class shared by every ingredient node.
pub const INGREDIENT_CLASS: &str = "ingredient";
/// Color class for sauces without a country.
pub const NO_COUNTRY_CLASS: &str = "country-none";

/// Fixed colors per class. Muted to sit on the dark theme background.
const CLASS_COLORS: &[(&str, &str)] = &[
	(INGREDIENT_CLASS, "#8a9499"),
	(NO_COUNTRY_CLASS, "#a08c78"),
	("country-fr", "#5e81ac"),
	("country-it", "#6b9e6e"),
	("country-es", "#c8875a"),
	("country-mx", "#b4645a"),
	("country-us", "#7f8fb8"),
	("country-gb", "#8c7fa8"),
	("country-jp", "#c07088"),
	("country-cn", "#b85c5c"),
	("country-th", "#a6a35c"),
	("country-in", "#d0a050"),
	("country-kr", "#9a6ea8"),
	("country-vn", "#6aa09a"),
	("country-ar", "#78a0c8"),
	("country-pe", "#c8a078"),
];

/// Color class for a node: `ingredient`, `country-<code>` or `country-none`.
pub fn color_class(node: &Node) -> String {
	match node {
		Node::Ingredient(_) => INGREDIENT_CLASS.to_string(),
		Node::Sauce(s) => match s.country.as_deref().map(str::trim) {
			Some(code) if !code.is_empty() => format!("country-{}", code.to_lowercase()),
			_ => NO_COUNTRY_CLASS.to_string(),
		},
	}
}

/// The fixed color for a class, if it has one.
pub fn class_color(class: &str) -> Option<&'static str> {
	CLASS_COLORS
		.iter()
		.find(|(name, _)| *name == class)
		.map(|(_, color)| *color)
}

/// Base radius multiplier by node kind.
pub fn radius_scale(node: &Node) -> f64 {
	match node.sauce_kind() {
		Some(SauceKind::Mother) => 2.0,
		Some(SauceKind::Sauce) => 1.4,
		None => 0.8,
	}
}

/// Whether a visible node is highlighted: the detail subject or a selected ingredient.
pub fn is_highlighted(node: &Node, view: &ViewState, selection: &Selection) -> bool {
	match node {
		Node::Sauce(s) => selection.detail() == Some(s.id.as_str()),
		Node::Ingredient(i) => view.is_ingredient_selected(&i.name),
	}
}

/// Build canvas input for the visible subset.
pub fn to_graph_data(
	visible: &FilteredGraph<'_>,
	view: &ViewState,
	selection: &Selection,
) -> GraphData {
	let nodes = visible
		.nodes
		.iter()
		.map(|&node| {
			let class = color_class(node);
			GraphNode {
				id: node.id().to_string(),
				label: Some(node.name().to_string()),
				color: class_color(&class).map(str::to_string),
				group: Some(class),
				size: radius_scale(node),
				selected: is_highlighted(node, view, selection),
			}
		})
		.collect();

	let links = visible
		.links
		.iter()
		.map(|&link| GraphLink {
			source: link.source.clone(),
			target: link.target.clone(),
			dashed: link.kind == LinkKind::Ingredient,
		})
		.collect();

	GraphData { nodes, links }
}

/// Summary of what is currently drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibleCounts {
	pub sauces: usize,
	pub ingredients: usize,
	pub links: usize,
}

impl VisibleCounts {
	pub fn of(visible: &FilteredGraph<'_>) -> Self {
		let ingredients = visible.nodes.iter().filter(|n| n.is_ingredient()).count();
		Self {
			sauces: visible.nodes.len() - ingredients,
			ingredients,
			links: visible.links.len(),
		}
	}
}

impl fmt::Display for VisibleCounts {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let plural = |n: usize, one: &str, many: &str| {
			format!("{n} {}", if n == 1 { one } else { many })
		};
		write!(f, "{}", plural(self.sauces, "sauce", "sauces"))?;
		if self.ingredients > 0 {
			write!(f, ", {}", plural(self.ingredients, "ingredient", "ingredients"))?;
		}
		write!(f, ", {}", plural(self.links, "link", "links"))
	}
}
