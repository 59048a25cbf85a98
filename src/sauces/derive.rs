//! Graph derivation: turns the flat sauce list into nodes and links.
//!
//! Sauces become nodes directly. Every ingredient string that does not name
//! another sauce becomes a synthetic ingredient node, identified only by
//! [`normalize_ingredient_id`]. Ingredient strings that do name a sauce are
//! sauce references and produce neither a node nor an ingredient link; the
//! relation between two sauces is carried by parent links alone.

use std::collections::{HashMap, HashSet};

use log::warn;

use super::dataset::{SauceKind, SauceNode};

/// Prefix applied when an ingredient id would collide with a sauce id.
const INGREDIENT_ID_PREFIX: &str = "ingredient:";

/// Normalize an ingredient name into its node id.
///
/// Trims, lowercases and replaces every whitespace run with a single `_`.
/// Leading and trailing whitespace is dropped rather than turned into `_`,
/// so `" salt"` and `"salt"` name the same ingredient.
/// The mapping is lossy: `"Olive Oil"` and `"olive  oil"` share the id
/// `olive_oil` and are merged into one ingredient node, which keeps the
/// first spelling seen as its display name. Applying it twice is a no-op.
pub fn normalize_ingredient_id(name: &str) -> String {
	name.to_lowercase()
		.split_whitespace()
		.collect::<Vec<_>>()
		.join("_")
}

/// A synthetic node for an ingredient that is not itself a sauce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngredientNode {
	pub id: String,
	pub name: String,
}

/// A node of the derived graph.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
	Sauce(SauceNode),
	Ingredient(IngredientNode),
}

impl Node {
	pub fn id(&self) -> &str {
		match self {
			Self::Sauce(s) => &s.id,
			Self::Ingredient(i) => &i.id,
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Sauce(s) => &s.name,
			Self::Ingredient(i) => &i.name,
		}
	}

	pub fn as_sauce(&self) -> Option<&SauceNode> {
		match self {
			Self::Sauce(s) => Some(s),
			Self::Ingredient(_) => None,
		}
	}

	pub fn is_ingredient(&self) -> bool {
		matches!(self, Self::Ingredient(_))
	}

	/// Sauce classification, `None` for ingredients.
	pub fn sauce_kind(&self) -> Option<SauceKind> {
		self.as_sauce().map(|s| s.kind)
	}
}

/// What a link expresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkKind {
	/// Child sauce derives from parent sauce (source = parent, target = child).
	Parent { relationship: Option<String> },
	/// Ingredient is used by sauce (source = ingredient, target = sauce).
	Ingredient,
}

/// A directed link between two node ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
	pub source: String,
	pub target: String,
	pub kind: LinkKind,
}

impl Link {
	pub fn is_ingredient(&self) -> bool {
		self.kind == LinkKind::Ingredient
	}
}

/// The combined, immutable sauce + ingredient graph.
#[derive(Clone, Debug, Default)]
pub struct SauceGraph {
	nodes: Vec<Node>,
	links: Vec<Link>,
	index: HashMap<String, usize>,
}

impl SauceGraph {
	/// Derive the full graph from the raw sauce list.
	///
	/// Sauces keep dataset order and come first, ingredient nodes follow in
	/// order of first mention. Duplicate sauce ids keep the first record.
	/// Parent references to unknown ids are dropped. No cycle detection.
	pub fn derive(sauces: &[SauceNode]) -> Self {
		let mut graph = Self::default();

		for sauce in sauces {
			if graph.index.contains_key(&sauce.id) {
				warn!("sauce-graph: duplicate sauce id `{}` ignored", sauce.id);
				continue;
			}
			graph.push_node(Node::Sauce(sauce.clone()));
		}

		let kept: Vec<SauceNode> = graph.sauces().cloned().collect();
		let sauce_names: HashSet<&str> = kept.iter().map(|s| s.name.as_str()).collect();
		let sauce_ids: HashSet<&str> = kept.iter().map(|s| s.id.as_str()).collect();
		let mut ingredient_ids: HashMap<String, String> = HashMap::new();
		let mut ingredient_links: Vec<Link> = Vec::new();
		let mut seen_links: HashSet<(String, String)> = HashSet::new();

		for sauce in &kept {
			for ingredient in &sauce.ingredients {
				if ingredient.trim().is_empty() || sauce_names.contains(ingredient.as_str()) {
					continue;
				}

				let normalized = normalize_ingredient_id(ingredient);
				let id = match ingredient_ids.get(&normalized) {
					Some(id) => id.clone(),
					None => {
						let id = if sauce_ids.contains(normalized.as_str()) {
							format!("{INGREDIENT_ID_PREFIX}{normalized}")
						} else {
							normalized.clone()
						};
						graph.push_node(Node::Ingredient(IngredientNode {
							id: id.clone(),
							name: ingredient.trim().to_string(),
						}));
						ingredient_ids.insert(normalized, id.clone());
						id
					}
				};

				if seen_links.insert((id.clone(), sauce.id.clone())) {
					ingredient_links.push(Link {
						source: id,
						target: sauce.id.clone(),
						kind: LinkKind::Ingredient,
					});
				}
			}
		}

		let parent_links: Vec<Link> = kept
			.iter()
			.filter_map(|sauce| {
				let parent = sauce.parent.as_ref()?;
				if !sauce_ids.contains(parent.as_str()) {
					warn!(
						"sauce-graph: `{}` names unknown parent `{}`",
						sauce.id, parent
					);
					return None;
				}
				Some(Link {
					source: parent.clone(),
					target: sauce.id.clone(),
					kind: LinkKind::Parent {
						relationship: sauce.relationship_to_parent.clone(),
					},
				})
			})
			.collect();

		graph.links = parent_links;
		graph.links.extend(ingredient_links);
		graph
	}

	fn push_node(&mut self, node: Node) {
		self.index.insert(node.id().to_string(), self.nodes.len());
		self.nodes.push(node);
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	pub fn sauces(&self) -> impl Iterator<Item = &SauceNode> {
		self.nodes.iter().filter_map(Node::as_sauce)
	}

	pub fn sauce_count(&self) -> usize {
		self.sauces().count()
	}

	pub fn ingredient_count(&self) -> usize {
		self.nodes.len() - self.sauce_count()
	}

	/// Ingredient display names, sorted case-insensitively for pickers.
	pub fn ingredient_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self
			.nodes
			.iter()
			.filter(|n| n.is_ingredient())
			.map(Node::name)
			.collect();
		names.sort_by_key(|n| n.to_lowercase());
		names
	}

	/// Sauces whose parent is `id`.
	pub fn children_of(&self, id: &str) -> impl Iterator<Item = &SauceNode> {
		self.links
			.iter()
			.filter(move |l| !l.is_ingredient() && l.source == id)
			.filter_map(|l| self.node(&l.target).and_then(Node::as_sauce))
	}

	/// Sauces that list the ingredient node `id`.
	pub fn sauces_using(&self, id: &str) -> impl Iterator<Item = &SauceNode> {
		self.links
			.iter()
			.filter(move |l| l.is_ingredient() && l.source == id)
			.filter_map(|l| self.node(&l.target).and_then(Node::as_sauce))
	}
}
