//! Interactive selection: the ingredient selection set and the detail subject.

use std::collections::HashSet;

use super::dataset::{SauceKind, SauceNode};
use super::derive::{Node, SauceGraph, normalize_ingredient_id};
use super::filter::{FilteredGraph, ViewState, filter_graph};

impl ViewState {
	/// Apply a click on an ingredient.
	///
	/// Without `additive` the click is exclusive: the set becomes just this
	/// ingredient, or empties if it was the only one selected. With `additive`
	/// membership is toggled. Either way an active search is cleared so the
	/// selection becomes the active filter.
	pub fn toggle_ingredient(&mut self, name: &str, additive: bool) {
		let id = normalize_ingredient_id(name);
		let existing = self
			.selected_ingredients
			.iter()
			.find(|s| normalize_ingredient_id(s) == id)
			.cloned();

		if additive {
			match existing {
				Some(s) => {
					self.selected_ingredients.remove(&s);
				}
				None => {
					self.selected_ingredients.insert(name.to_string());
				}
			}
		} else if existing.is_some() && self.selected_ingredients.len() == 1 {
			self.selected_ingredients.clear();
		} else {
			self.selected_ingredients.clear();
			self.selected_ingredients.insert(name.to_string());
		}

		self.search.clear();
	}

	/// Replace the search text. The ingredient selection is left alone; a
	/// non-blank search simply outranks it while active.
	pub fn set_search(&mut self, search: impl Into<String>) {
		self.search = search.into();
	}

	/// Drop the search and every selected ingredient.
	pub fn clear_filters(&mut self) {
		self.search.clear();
		self.selected_ingredients.clear();
	}
}

/// The detail panel subject.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
	detail: Option<String>,
}

impl Selection {
	pub fn detail(&self) -> Option<&str> {
		self.detail.as_deref()
	}

	pub fn select(&mut self, id: impl Into<String>) {
		self.detail = Some(id.into());
	}

	pub fn clear(&mut self) {
		self.detail = None;
	}

	/// Route a node click: ingredients toggle the selection set, sauces become
	/// the detail subject.
	pub fn click(&mut self, node: &Node, additive: bool, view: &mut ViewState) {
		match node {
			Node::Ingredient(i) => view.toggle_ingredient(&i.name, additive),
			Node::Sauce(s) => self.select(s.id.clone()),
		}
	}

	/// Make the sauce `id` the detail subject from outside the canvas.
	///
	/// If the current filter hides it, search and ingredient selection are
	/// cleared so the subject shows up again. Ids that are not sauces are
	/// ignored.
	pub fn navigate(&mut self, graph: &SauceGraph, id: &str, view: &mut ViewState) {
		if graph.node(id).and_then(Node::as_sauce).is_none() {
			return;
		}
		if !filter_graph(graph, view).contains(id) {
			view.clear_filters();
		}
		self.select(id);
	}

	/// Reset the detail subject when it is no longer visible.
	///
	/// Returns `true` if the subject was dropped.
	pub fn reconcile(&mut self, visible: &FilteredGraph<'_>) -> bool {
		match &self.detail {
			Some(id) if !visible.contains(id) => {
				self.detail = None;
				true
			}
			_ => false,
		}
	}
}

/// One entry of a sauce's ingredient list as shown in the detail panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngredientEntry {
	/// The string names another sauce; `id` links to it.
	Sauce { id: String, name: String },
	/// A plain ingredient node.
	Ingredient { id: String, name: String },
}

impl IngredientEntry {
	/// Id of the node the entry refers to.
	pub fn id(&self) -> &str {
		match self {
			Self::Sauce { id, .. } | Self::Ingredient { id, .. } => id,
		}
	}
}

/// Everything the detail panel renders for a sauce.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailView {
	pub id: String,
	pub name: String,
	pub kind: SauceKind,
	pub country: Option<String>,
	pub description: Option<String>,
	pub wikipedia: Option<String>,
	/// Parent `(id, name)` and the relationship label.
	pub parent: Option<((String, String), Option<String>)>,
	/// Child `(id, name)` pairs.
	pub children: Vec<(String, String)>,
	pub ingredients: Vec<IngredientEntry>,
}

impl DetailView {
	/// Collect detail data for the sauce `id`. Ingredients have no detail view.
	pub fn for_node(graph: &SauceGraph, id: &str) -> Option<Self> {
		let sauce: &SauceNode = graph.node(id)?.as_sauce()?;

		let parent = sauce.parent.as_deref().and_then(|pid| {
			let p = graph.node(pid)?.as_sauce()?;
			Some((
				(p.id.clone(), p.name.clone()),
				sauce.relationship_to_parent.clone(),
			))
		});

		let children = graph
			.children_of(&sauce.id)
			.map(|c| (c.id.clone(), c.name.clone()))
			.collect();

		let mut seen = HashSet::new();
		let ingredients = sauce
			.ingredients
			.iter()
			.filter(|i| !i.trim().is_empty())
			.filter_map(|raw| {
				if let Some(s) = graph.sauces().find(|s| s.name == *raw) {
					return Some(IngredientEntry::Sauce {
						id: s.id.clone(),
						name: s.name.clone(),
					});
				}
				let linked = graph
					.links()
					.iter()
					.filter(|l| l.is_ingredient() && l.target == sauce.id)
					.filter_map(|l| graph.node(&l.source))
					.find(|n| normalize_ingredient_id(n.name()) == normalize_ingredient_id(raw))?;
				Some(IngredientEntry::Ingredient {
					id: linked.id().to_string(),
					name: raw.trim().to_string(),
				})
			})
			// Spellings merged into one node are listed once.
			.filter(|entry| seen.insert(entry.id().to_string()))
			.collect();

		Some(Self {
			id: sauce.id.clone(),
			name: sauce.name.clone(),
			kind: sauce.kind,
			country: sauce.country.clone(),
			description: sauce.description.clone(),
			wikipedia: sauce.wikipedia.clone(),
			parent,
			children,
			ingredients,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sauces::filter::ViewMode;

	fn graph() -> SauceGraph {
		SauceGraph::derive(&[
			SauceNode::new("veloute", "Velouté").with_ingredients(["White stock", "Roux"]),
			SauceNode::new("allemande", "Allemande")
				.with_parent("veloute", Some("thickened with egg yolk"))
				.with_ingredients(["Velouté", "Egg yolk", "Lemon juice"]),
			SauceNode::new("poulette", "Poulette")
				.with_parent("allemande", None)
				.with_ingredients(["Allemande", "Mushrooms"]),
		])
	}

	#[test]
	fn exclusive_click_replaces_then_clears() {
		let mut view = ViewState::new(ViewMode::WithIngredients);
		view.toggle_ingredient("Roux", false);
		view.toggle_ingredient("Egg yolk", false);
		assert_eq!(view.selected_ingredients.len(), 1);
		assert!(view.is_ingredient_selected("egg yolk"));

		view.toggle_ingredient("Egg yolk", false);
		assert!(view.selected_ingredients.is_empty());
	}

	#[test]
	fn exclusive_click_on_member_of_larger_set_narrows_to_it() {
		let mut view = ViewState::new(ViewMode::WithIngredients);
		view.toggle_ingredient("Roux", true);
		view.toggle_ingredient("Egg yolk", true);
		view.toggle_ingredient("Roux", false);
		assert_eq!(
			view.selected_ingredients.iter().collect::<Vec<_>>(),
			vec!["Roux"]
		);
	}

	#[test]
	fn additive_click_toggles_membership() {
		let mut view = ViewState::new(ViewMode::WithIngredients);
		view.toggle_ingredient("Roux", true);
		view.toggle_ingredient("Egg yolk", true);
		assert_eq!(view.selected_ingredients.len(), 2);

		view.toggle_ingredient("ROUX", true);
		assert_eq!(
			view.selected_ingredients.iter().collect::<Vec<_>>(),
			vec!["Egg yolk"]
		);
	}

	#[test]
	fn ingredient_click_clears_search_but_search_keeps_selection() {
		let mut view = ViewState::new(ViewMode::WithIngredients);
		view.set_search("pou");
		view.toggle_ingredient("Roux", false);
		assert!(view.search.is_empty());

		view.set_search("all");
		assert!(view.is_ingredient_selected("Roux"));

		view.clear_filters();
		assert!(view.is_unfiltered());
	}

	#[test]
	fn click_routes_by_node_kind() {
		let graph = graph();
		let mut view = ViewState::new(ViewMode::WithIngredients);
		let mut selection = Selection::default();

		selection.click(graph.node("roux").unwrap(), false, &mut view);
		assert!(view.is_ingredient_selected("Roux"));
		assert_eq!(selection.detail(), None);

		selection.click(graph.node("allemande").unwrap(), false, &mut view);
		assert_eq!(selection.detail(), Some("allemande"));
	}

	#[test]
	fn detail_resets_when_subject_is_filtered_out() {
		let graph = graph();
		let mut view = ViewState::new(ViewMode::SaucesOnly);
		let mut selection = Selection::default();
		selection.select("poulette");

		assert!(!selection.reconcile(&filter_graph(&graph, &view)));
		assert_eq!(selection.detail(), Some("poulette"));

		view.set_search("velout");
		assert!(selection.reconcile(&filter_graph(&graph, &view)));
		assert_eq!(selection.detail(), None);
	}

	#[test]
	fn detail_view_collects_relations() {
		let graph = graph();
		let detail = DetailView::for_node(&graph, "allemande").unwrap();

		assert_eq!(detail.name, "Allemande");
		assert_eq!(
			detail.parent,
			Some((
				("veloute".into(), "Velouté".into()),
				Some("thickened with egg yolk".into())
			))
		);
		assert_eq!(detail.children, vec![("poulette".into(), "Poulette".into())]);
		assert_eq!(
			detail.ingredients,
			vec![
				IngredientEntry::Sauce {
					id: "veloute".into(),
					name: "Velouté".into()
				},
				IngredientEntry::Ingredient {
					id: "egg_yolk".into(),
					name: "Egg yolk".into()
				},
				IngredientEntry::Ingredient {
					id: "lemon_juice".into(),
					name: "Lemon juice".into()
				},
			]
		);
	}

	#[test]
	fn ingredients_have_no_detail_view() {
		let graph = graph();
		assert!(DetailView::for_node(&graph, "roux").is_none());
		assert!(DetailView::for_node(&graph, "missing").is_none());
	}

	#[test]
	fn parent_naming_an_ingredient_is_not_shown() {
		let graph = SauceGraph::derive(&[
			SauceNode::new("brine", "Brine").with_ingredients(["Salt", "Water"]),
			SauceNode::new("pickle", "Pickle").with_parent("salt", None),
		]);
		assert!(graph.node("salt").is_some_and(Node::is_ingredient));

		let detail = DetailView::for_node(&graph, "pickle").unwrap();
		assert_eq!(detail.parent, None);
	}

	#[test]
	fn merged_spellings_are_listed_once() {
		let graph = SauceGraph::derive(&[SauceNode::new("dressing", "Dressing")
			.with_ingredients(["OLIVE OIL", "olive oil", "Vinegar"])]);
		let detail = DetailView::for_node(&graph, "dressing").unwrap();
		assert_eq!(
			detail.ingredients,
			vec![
				IngredientEntry::Ingredient {
					id: "olive_oil".into(),
					name: "OLIVE OIL".into()
				},
				IngredientEntry::Ingredient {
					id: "vinegar".into(),
					name: "Vinegar".into()
				},
			]
		);
	}

	#[test]
	fn navigating_to_hidden_sauce_clears_filters() {
		let graph = graph();
		let mut view = ViewState::new(ViewMode::WithIngredients);
		let mut selection = Selection::default();
		view.set_search("poul");
		selection.select("poulette");

		selection.navigate(&graph, "allemande", &mut view);
		assert_eq!(selection.detail(), Some("allemande"));
		assert!(view.is_unfiltered());
		assert!(filter_graph(&graph, &view).contains("allemande"));
		assert!(!selection.reconcile(&filter_graph(&graph, &view)));
	}

	#[test]
	fn navigating_to_visible_sauce_keeps_filters() {
		let graph = graph();
		let mut view = ViewState::new(ViewMode::WithIngredients);
		let mut selection = Selection::default();
		view.set_search("e");

		selection.navigate(&graph, "veloute", &mut view);
		assert_eq!(selection.detail(), Some("veloute"));
		assert_eq!(view.search, "e");
	}

	#[test]
	fn navigating_to_non_sauce_is_ignored() {
		let graph = graph();
		let mut view = ViewState::new(ViewMode::WithIngredients);
		let mut selection = Selection::default();
		view.set_search("poul");

		selection.navigate(&graph, "roux", &mut view);
		selection.navigate(&graph, "missing", &mut view);
		assert_eq!(selection.detail(), None);
		assert_eq!(view.search, "poul");
	}
}
