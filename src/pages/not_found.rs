use leptos::prelude::*;

/// 404 Not Found page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found-page">
			<h1>"404 - Page Not Found"</h1>
			<a href="/">"Back to the graph"</a>
		</div>
	}
}
