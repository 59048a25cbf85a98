//! View filtering: computes the visible node/link subset for one redraw.
//!
//! Exactly one filter class applies at a time, chosen by precedence:
//! a non-blank search wins, then a non-empty ingredient selection, then the
//! bare mode flag. Every class works inside the node and link set of the
//! current [`ViewMode`], so sauces-only mode never shows an ingredient link.

use std::collections::{BTreeSet, HashSet};

use super::derive::{Link, Node, SauceGraph, normalize_ingredient_id};

/// Which part of the graph is eligible for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
	/// Sauces and parent links only.
	#[default]
	SaucesOnly,
	/// The full graph including ingredient nodes and links.
	WithIngredients,
}

impl ViewMode {
	pub fn shows_ingredients(self) -> bool {
		self == Self::WithIngredients
	}

	fn admits_node(self, node: &Node) -> bool {
		self.shows_ingredients() || !node.is_ingredient()
	}

	fn admits_link(self, link: &Link) -> bool {
		self.shows_ingredients() || !link.is_ingredient()
	}
}

/// Input of the view filter: an immutable snapshot of the user's choices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
	pub mode: ViewMode,
	/// Raw search text as typed. Blank means no search.
	pub search: String,
	/// Selected ingredient display names.
	pub selected_ingredients: BTreeSet<String>,
}

impl ViewState {
	pub fn new(mode: ViewMode) -> Self {
		Self {
			mode,
			..Self::default()
		}
	}

	/// The trimmed search term, if any.
	pub fn search_term(&self) -> Option<&str> {
		Some(self.search.trim()).filter(|s| !s.is_empty())
	}

	/// True when neither a search nor an ingredient selection is active.
	pub fn is_unfiltered(&self) -> bool {
		self.search_term().is_none() && self.selected_ingredients.is_empty()
	}

	/// Whether `name` is part of the ingredient selection.
	pub fn is_ingredient_selected(&self, name: &str) -> bool {
		let id = normalize_ingredient_id(name);
		self.selected_ingredients
			.iter()
			.any(|s| normalize_ingredient_id(s) == id)
	}
}

/// The visible subset of a [`SauceGraph`], in graph order.
#[derive(Clone, Debug, Default)]
pub struct FilteredGraph<'a> {
	pub nodes: Vec<&'a Node>,
	pub links: Vec<&'a Link>,
}

impl<'a> FilteredGraph<'a> {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id() == id)
	}

	pub fn node_ids(&self) -> HashSet<&'a str> {
		self.nodes.iter().map(|&n| n.id()).collect()
	}
}

/// Compute the visible subset of `graph` for `state`.
pub fn filter_graph<'a>(graph: &'a SauceGraph, state: &ViewState) -> FilteredGraph<'a> {
	let mode = state.mode;

	let visible: HashSet<&str> = if let Some(term) = state.search_term() {
		search_matches(graph, mode, term)
	} else if !state.selected_ingredients.is_empty() {
		ingredient_matches(graph, mode, &state.selected_ingredients)
	} else {
		return FilteredGraph {
			nodes: graph.nodes().iter().filter(|n| mode.admits_node(n)).collect(),
			links: graph.links().iter().filter(|l| mode.admits_link(l)).collect(),
		};
	};

	restrict(graph, mode, &visible)
}

/// Keep the nodes in `visible` and the mode's links whose endpoints both survive.
fn restrict<'a>(graph: &'a SauceGraph, mode: ViewMode, visible: &HashSet<&str>) -> FilteredGraph<'a> {
	FilteredGraph {
		nodes: graph
			.nodes()
			.iter()
			.filter(|n| visible.contains(n.id()))
			.collect(),
		links: graph
			.links()
			.iter()
			.filter(|l| {
				mode.admits_link(l)
					&& visible.contains(l.source.as_str())
					&& visible.contains(l.target.as_str())
			})
			.collect(),
	}
}

fn search_matches<'a>(graph: &'a SauceGraph, mode: ViewMode, term: &str) -> HashSet<&'a str> {
	let needle = term.to_lowercase();
	let matched: HashSet<&str> = graph
		.nodes()
		.iter()
		.filter(|n| mode.admits_node(n) && n.name().to_lowercase().contains(&needle))
		.map(Node::id)
		.collect();

	let mut visible = matched.clone();
	for link in graph.links() {
		let (source, target) = (link.source.as_str(), link.target.as_str());
		match mode {
			// One hop across ingredient links in either direction.
			ViewMode::WithIngredients if link.is_ingredient() => {
				if matched.contains(target) {
					visible.insert(source);
				}
				if matched.contains(source) {
					visible.insert(target);
				}
			}
			// Direct parent and direct children of matched sauces.
			ViewMode::SaucesOnly if !link.is_ingredient() => {
				if matched.contains(target) {
					visible.insert(source);
				}
				if matched.contains(source) {
					visible.insert(target);
				}
			}
			_ => {}
		}
	}
	visible
}

fn ingredient_matches<'a>(
	graph: &'a SauceGraph,
	mode: ViewMode,
	selected: &BTreeSet<String>,
) -> HashSet<&'a str> {
	let wanted: HashSet<String> = selected.iter().map(|s| normalize_ingredient_id(s)).collect();

	graph
		.nodes()
		.iter()
		.filter(|node| match node {
			Node::Ingredient(i) => {
				mode.shows_ingredients() && wanted.contains(&normalize_ingredient_id(&i.name))
			}
			Node::Sauce(s) => {
				let listed: HashSet<String> = s
					.ingredients
					.iter()
					.map(|i| normalize_ingredient_id(i))
					.collect();
				wanted.iter().all(|w| listed.contains(w))
			}
		})
		.map(Node::id)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sauces::dataset::SauceNode;

	fn caesar_graph() -> SauceGraph {
		SauceGraph::derive(&[
			SauceNode::new("mayonnaise", "Mayonnaise").with_ingredients(["Egg yolk", "Oil"]),
			SauceNode::new("caesar", "Caesar")
				.with_parent("mayonnaise", Some("variant of"))
				.with_ingredients(["Anchovies", "Parmesan", "Egg yolk"]),
			SauceNode::new("remoulade", "Rémoulade")
				.with_parent("mayonnaise", None)
				.with_ingredients(["Mayonnaise", "Capers"]),
			SauceNode::new("tartare", "Tartare").with_parent("remoulade", None),
		])
	}

	fn ids<'a>(filtered: &FilteredGraph<'a>) -> Vec<&'a str> {
		filtered.nodes.iter().map(|&n| n.id()).collect()
	}

	fn state(mode: ViewMode, search: &str, ingredients: &[&str]) -> ViewState {
		ViewState {
			mode,
			search: search.to_string(),
			selected_ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
		}
	}

	#[test]
	fn unfiltered_sauces_only_shows_sauces_and_parent_links() {
		let graph = caesar_graph();
		let filtered = filter_graph(&graph, &ViewState::new(ViewMode::SaucesOnly));

		assert_eq!(ids(&filtered), vec!["mayonnaise", "caesar", "remoulade", "tartare"]);
		assert_eq!(filtered.links.len(), 3);
		assert!(filtered.links.iter().all(|l| !l.is_ingredient()));
	}

	#[test]
	fn unfiltered_ingredient_mode_shows_everything() {
		let graph = caesar_graph();
		let filtered = filter_graph(&graph, &ViewState::new(ViewMode::WithIngredients));

		assert_eq!(filtered.nodes.len(), graph.nodes().len());
		assert_eq!(filtered.links.len(), graph.links().len());
	}

	#[test]
	fn search_in_ingredient_mode_pulls_in_users_of_matched_ingredient() {
		let graph = SauceGraph::derive(&[
			SauceNode::new("caesar", "Caesar").with_ingredients(["Anchovies"]),
			SauceNode::new("hollandaise", "Hollandaise").with_ingredients(["Butter"]),
		]);
		let filtered = filter_graph(&graph, &state(ViewMode::WithIngredients, "anch", &[]));

		let names: Vec<&str> = filtered.nodes.iter().map(|n| n.name()).collect();
		assert!(names.contains(&"Anchovies"));
		assert!(names.contains(&"Caesar"));
		assert_eq!(filtered.nodes.len(), 2);
		assert_eq!(filtered.links.len(), 1);
		assert_eq!(filtered.links[0].source, "anchovies");
		assert_eq!(filtered.links[0].target, "caesar");
	}

	#[test]
	fn search_in_ingredient_mode_pulls_in_ingredients_of_matched_sauce() {
		let graph = caesar_graph();
		let filtered = filter_graph(&graph, &state(ViewMode::WithIngredients, "  CAES ", &[]));

		assert_eq!(ids(&filtered), vec!["caesar", "egg_yolk", "anchovies", "parmesan"]);
		// Parent mayonnaise is not an ingredient neighbour, so no parent link.
		assert_eq!(filtered.links.len(), 3);
		assert!(filtered.links.iter().all(|l| l.is_ingredient()));
	}

	#[test]
	fn search_hops_are_not_transitive() {
		let graph = caesar_graph();
		let filtered = filter_graph(&graph, &state(ViewMode::WithIngredients, "egg yolk", &[]));

		// egg yolk -> mayonnaise, caesar; their other ingredients stay hidden.
		assert_eq!(ids(&filtered), vec!["mayonnaise", "caesar", "egg_yolk"]);
	}

	#[test]
	fn search_in_sauces_only_adds_direct_parent_and_children() {
		let graph = caesar_graph();
		let filtered = filter_graph(&graph, &state(ViewMode::SaucesOnly, "rémou", &[]));

		assert_eq!(ids(&filtered), vec!["mayonnaise", "remoulade", "tartare"]);
		assert_eq!(filtered.links.len(), 2);
		assert!(filtered.links.iter().all(|l| !l.is_ingredient()));
	}

	#[test]
	fn search_in_sauces_only_ignores_ingredient_names() {
		let graph = caesar_graph();
		let filtered = filter_graph(&graph, &state(ViewMode::SaucesOnly, "capers", &[]));
		assert!(filtered.is_empty());
		assert!(filtered.links.is_empty());
	}

	#[test]
	fn ingredient_selection_is_conjunctive() {
		let graph = SauceGraph::derive(&[
			SauceNode::new("a", "A").with_ingredients(["salt", "pepper"]),
			SauceNode::new("b", "B").with_ingredients(["salt"]),
		]);
		let filtered = filter_graph(
			&graph,
			&state(ViewMode::WithIngredients, "", &["salt", "pepper"]),
		);

		let sauces: Vec<&str> = filtered
			.nodes
			.iter()
			.filter(|n| !n.is_ingredient())
			.map(|n| n.id())
			.collect();
		assert_eq!(sauces, vec!["a"]);
		assert_eq!(ids(&filtered), vec!["a", "salt", "pepper"]);
		assert_eq!(filtered.links.len(), 2);
	}

	#[test]
	fn ingredient_selection_is_case_insensitive_exact() {
		let graph = SauceGraph::derive(&[
			SauceNode::new("a", "A").with_ingredients(["Sea Salt"]),
			SauceNode::new("b", "B").with_ingredients(["salt"]),
		]);
		let filtered = filter_graph(&graph, &state(ViewMode::WithIngredients, "", &["SALT"]));
		assert_eq!(ids(&filtered), vec!["b", "salt"]);
	}

	#[test]
	fn ingredient_selection_in_sauces_only_keeps_mode_invariant() {
		let graph = caesar_graph();
		let filtered = filter_graph(&graph, &state(ViewMode::SaucesOnly, "", &["egg yolk"]));

		assert_eq!(ids(&filtered), vec!["mayonnaise", "caesar"]);
		assert_eq!(filtered.links.len(), 1);
		assert!(!filtered.links[0].is_ingredient());
	}

	#[test]
	fn search_takes_precedence_over_ingredient_selection() {
		let graph = caesar_graph();
		let filtered = filter_graph(
			&graph,
			&state(ViewMode::SaucesOnly, "tartare", &["Anchovies"]),
		);
		assert_eq!(ids(&filtered), vec!["remoulade", "tartare"]);
	}

	#[test]
	fn blank_search_is_no_search() {
		let graph = caesar_graph();
		let st = state(ViewMode::WithIngredients, "   ", &[]);
		assert!(st.is_unfiltered());
		assert_eq!(filter_graph(&graph, &st).nodes.len(), graph.nodes().len());
	}

	#[test]
	fn no_match_yields_empty_graph() {
		let graph = caesar_graph();
		let filtered = filter_graph(&graph, &state(ViewMode::WithIngredients, "zzz", &[]));
		assert!(filtered.is_empty());
		assert!(filtered.links.is_empty());
	}

	#[test]
	fn links_never_dangle() {
		let graph = caesar_graph();
		let states = [
			state(ViewMode::WithIngredients, "may", &[]),
			state(ViewMode::SaucesOnly, "caesar", &[]),
			state(ViewMode::WithIngredients, "", &["Capers"]),
			state(ViewMode::WithIngredients, "", &["Egg yolk", "Oil"]),
		];
		for st in &states {
			let filtered = filter_graph(&graph, st);
			let visible = filtered.node_ids();
			for link in &filtered.links {
				assert!(visible.contains(link.source.as_str()), "{st:?}");
				assert!(visible.contains(link.target.as_str()), "{st:?}");
			}
		}
	}

	#[test]
	fn sauces_only_never_shows_ingredient_links() {
		let graph = caesar_graph();
		for st in [
			state(ViewMode::SaucesOnly, "", &[]),
			state(ViewMode::SaucesOnly, "a", &[]),
			state(ViewMode::SaucesOnly, "", &["Oil"]),
		] {
			let filtered = filter_graph(&graph, &st);
			assert!(filtered.links.iter().all(|l| !l.is_ingredient()));
			assert!(filtered.nodes.iter().all(|n| !n.is_ingredient()));
		}
	}

	#[test]
	fn clearing_filters_restores_full_mode_set() {
		let graph = caesar_graph();
		let mut st = state(ViewMode::WithIngredients, "caesar", &["Oil"]);
		assert!(filter_graph(&graph, &st).nodes.len() < graph.nodes().len());

		st.search.clear();
		st.selected_ingredients.clear();
		let restored = filter_graph(&graph, &st);
		assert_eq!(restored.nodes.len(), graph.nodes().len());
		assert_eq!(restored.links.len(), graph.links().len());

		st.mode = ViewMode::SaucesOnly;
		let restored = filter_graph(&graph, &st);
		assert_eq!(restored.nodes.len(), graph.sauce_count());
	}
}
