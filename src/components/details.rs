//! Detail panel for the selected sauce.

use leptos::prelude::*;

use crate::app::AppState;
use crate::sauces::{DetailView, IngredientEntry};

/// A link that makes another sauce the detail subject.
fn sauce_link(state: AppState, id: String, name: String) -> impl IntoView {
	view! {
		<a
			href="#"
			class="sauce-link"
			on:click=move |ev| {
				ev.prevent_default();
				state.navigate_to(&id);
			}
		>
			{name}
		</a>
	}
}

fn ingredient_item(state: AppState, entry: IngredientEntry) -> impl IntoView {
	match entry {
		IngredientEntry::Sauce { id, name } => {
			view! { <li class="ingredient sauce-ref">{sauce_link(state, id, name)}</li> }.into_any()
		}
		IngredientEntry::Ingredient { name, .. } => {
			let filter_name = name.clone();
			view! {
				<li class="ingredient">
					<a
						href="#"
						title="Show sauces using this ingredient"
						on:click=move |ev| {
							ev.prevent_default();
							state.view.update(|v| v.toggle_ingredient(&filter_name, false));
						}
					>
						{name}
					</a>
				</li>
			}
			.into_any()
		}
	}
}

fn render_detail(state: AppState, detail: DetailView) -> impl IntoView {
	let image = detail.wikipedia.clone().map(|url| {
		move || {
			state
				.images
				.with(|c| c.image(&url).map(str::to_string))
				.map(|src| view! { <img class="detail-image" src=src alt="" /> })
		}
	});

	let parent = detail.parent.map(|((id, name), relationship)| {
		view! {
			<p class="parent">
				"Derived from "
				{sauce_link(state, id, name)}
				{relationship.map(|r| format!(" ({r})"))}
			</p>
		}
	});

	let children = (!detail.children.is_empty()).then(|| {
		view! {
			<h3>"Derived sauces"</h3>
			<ul class="children">
				{detail
					.children
					.into_iter()
					.map(|(id, name)| view! { <li>{sauce_link(state, id, name)}</li> })
					.collect_view()}
			</ul>
		}
	});

	let ingredients = (!detail.ingredients.is_empty()).then(|| {
		view! {
			<h3>"Ingredients"</h3>
			<ul class="ingredients">
				{detail
					.ingredients
					.into_iter()
					.map(|entry| ingredient_item(state, entry))
					.collect_view()}
			</ul>
		}
	});

	view! {
		<div class="detail">
			<h2>{detail.name}</h2>
			<p class="kind">
				{detail.kind.label()}
				{detail.country.map(|c| format!(" · {c}"))}
			</p>
			{image}
			{detail.description.map(|d| view! { <p class="description">{d}</p> })}
			{parent}
			{children}
			{ingredients}
			{detail
				.wikipedia
				.map(|url| {
					view! {
						<a class="wikipedia" href=url target="_blank" rel="noopener noreferrer">
							"Read on Wikipedia"
						</a>
					}
				})}
		</div>
	}
}

/// Shows the selected sauce, or a prompt when nothing is selected.
#[component]
pub fn DetailPanel(state: AppState) -> impl IntoView {
	let detail = Memo::new(move |_| {
		state.selection.with(|s| {
			let id = s.detail()?;
			state.graph.with_value(|g| DetailView::for_node(g, id))
		})
	});

	move || match detail.get() {
		Some(detail) => render_detail(state, detail).into_any(),
		None => view! {
			<p class="detail-empty">"Select a sauce to see where it comes from and what goes in it."</p>
		}
		.into_any(),
	}
}
