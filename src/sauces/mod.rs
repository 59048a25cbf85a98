//! Sauce domain: dataset, derived graph, view filtering and selection.
//!
//! Everything here is plain data and runs natively; the browser-facing
//! pieces live in [`crate::app`] and [`crate::components`].

pub mod dataset;
pub mod derive;
pub mod display;
pub mod filter;
pub mod image;
pub mod selection;

pub use dataset::{Dataset, DatasetError, SauceKind, SauceNode, load_dataset};
pub use derive::{IngredientNode, Link, LinkKind, Node, SauceGraph, normalize_ingredient_id};
pub use display::{VisibleCounts, to_graph_data};
pub use filter::{FilteredGraph, ViewMode, ViewState, filter_graph};
pub use image::{ImageCache, ImageError, ImageLookup, lookup_image};
pub use selection::{DetailView, IngredientEntry, Selection};
