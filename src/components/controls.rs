//! Filter controls: mode toggle, search box, ingredient picker and chips.

use leptos::prelude::*;

use crate::app::AppState;
use crate::sauces::{ViewMode, ViewState};

/// Overlay controls bound to the shared view state.
#[component]
pub fn Controls(state: AppState) -> impl IntoView {
	let view = state.view;
	let ingredient_names: Vec<String> = state
		.graph
		.with_value(|g| g.ingredient_names().into_iter().map(str::to_string).collect());

	let chips = move || {
		view.with(|v| v.selected_ingredients.iter().cloned().collect::<Vec<_>>())
			.into_iter()
			.map(|name| {
				let remove = name.clone();
				view! {
					<li class="chip">
						<button
							title="Remove"
							on:click=move |_| view.update(|v| {
								v.selected_ingredients.remove(&remove);
							})
						>
							{name}
							" ×"
						</button>
					</li>
				}
			})
			.collect_view()
	};

	view! {
		<div class="controls">
			<label class="mode-toggle">
				<input
					type="checkbox"
					prop:checked=move || view.with(|v| v.mode.shows_ingredients())
					on:change=move |ev| {
						let mode = if event_target_checked(&ev) {
							ViewMode::WithIngredients
						} else {
							ViewMode::SaucesOnly
						};
						view.update(|v| v.mode = mode);
					}
				/>
				" Show ingredients"
			</label>

			<input
				type="search"
				class="search"
				placeholder="Search sauces and ingredients"
				prop:value=move || view.with(|v| v.search.clone())
				on:input=move |ev| view.update(|v| v.set_search(event_target_value(&ev)))
			/>

			<select
				class="ingredient-picker"
				prop:value=move || {
					// Back to the placeholder after every pick.
					view.track();
					String::new()
				}
				on:change=move |ev| {
					let name = event_target_value(&ev);
					if !name.is_empty() {
						view.update(|v| v.toggle_ingredient(&name, true));
					}
				}
			>
				<option value="">"Filter by ingredient…"</option>
				{ingredient_names
					.into_iter()
					.map(|name| {
						let value = name.clone();
						view! { <option value=value>{name}</option> }
					})
					.collect_view()}
			</select>

			<button
				class="clear"
				disabled=move || view.with(ViewState::is_unfiltered)
				on:click=move |_| view.update(ViewState::clear_filters)
			>
				"Clear filters"
			</button>

			<ul class="chips">{chips}</ul>
			<p class="counts">{move || state.counts().to_string()}</p>
		</div>
	}
}
