use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, HtmlInputElement, MouseEvent, Window};

use crate::components::force_graph::ForceGraphCanvas;
use crate::graph::{
	Bounds, ClickOutcome, Graph, Notice, PetgraphOracle, Session, UploadTicket, UploadTracker,
	parse_graph, solve_path,
};

fn window_bounds(window: &Window) -> Bounds {
	let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	Bounds::new(read(window.inner_width()), read(window.inner_height()))
}

/// Interrupts the user with `notice`.
fn alert(notice: &Notice) {
	match notice {
		Notice::SelectionLimit => warn!("{notice}"),
		Notice::ParseFailed(_) | Notice::OracleFailed(_) => error!("{notice}"),
	}
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(&notice.to_string());
	}
}

/// Parses a finished read, or `None` once a newer upload has begun.
fn finish_upload(
	uploads: &UploadTracker,
	ticket: UploadTicket,
	read: Result<String, String>,
) -> Option<Result<Graph, Notice>> {
	if !uploads.is_current(ticket) {
		return None;
	}
	let text = match read {
		Ok(text) => text,
		Err(e) => return Some(Err(Notice::ParseFailed(format!("could not read file: {e}")))),
	};
	Some(parse_graph(&text).map_err(|e| Notice::ParseFailed(e.to_string())))
}

fn status_line(session: &Session) -> String {
	if session.graph().is_none() {
		return "Upload a graph file to begin".into();
	}
	match session.selection().ids() {
		[] => "Please select two nodes".into(),
		[start] => format!("From {start}: select a destination"),
		[start, end] if session.path().is_empty() => format!("{start} \u{2192} {end}"),
		_ => format!("Path: {}", session.path().vertices().join(" \u{2192} ")),
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let session = RwSignal::new(Session::default());
	let viewport = RwSignal::new(
		web_sys::window()
			.map(|w| window_bounds(&w))
			.unwrap_or_default(),
	);
	let uploads = StoredValue::new(UploadTracker::default());

	if let Some(window) = web_sys::window() {
		let on_resize = Closure::<dyn FnMut()>::new(move || {
			if let Some(win) = web_sys::window() {
				viewport.set(window_bounds(&win));
			}
		});
		if let Err(e) =
			window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
		{
			error!("failed to listen for resize: {e:?}");
		}
		on_resize.forget();
	}

	let on_upload = move |ev: Event| {
		let Some(file) = ev
			.target()
			.and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
			.and_then(|input| input.files())
			.and_then(|files| files.get(0))
		else {
			return;
		};
		let Some(ticket) = uploads.try_update_value(UploadTracker::begin) else {
			return;
		};
		info!("reading {}", file.name());

		spawn_local(async move {
			let read = JsFuture::from(file.text())
				.await
				.map(|value| value.as_string().unwrap_or_default())
				.map_err(|e| format!("{e:?}"));
			let outcome = uploads
				.try_with_value(|u| finish_upload(u, ticket, read))
				.flatten();
			match outcome {
				Some(Ok(graph)) => session.update(|s| s.load(graph)),
				Some(Err(notice)) => alert(&notice),
				None => {}
			}
		});
	};

	let on_node_click = Callback::new(move |id: String| {
		match session.with_untracked(|s| s.probe_click(&id)) {
			Ok(ClickOutcome::Rejected) => alert(&Notice::SelectionLimit),
			Ok(_) => session.update(|s| {
				if let Err(e) = s.click(&id) {
					warn!("ignoring click: {e}");
				}
			}),
			Err(e) => warn!("ignoring click: {e}"),
		}
	});

	let find_path = move |_: MouseEvent| {
		let Some((request, graph)) =
			session.with_untracked(|s| Some((s.path_request()?, s.graph()?.clone())))
		else {
			return;
		};
		spawn_local(async move {
			let oracle = PetgraphOracle::new(&graph);
			match solve_path(&oracle, &graph, &request.start, &request.end) {
				Ok(path) => {
					if session.with_untracked(|s| s.is_fresh(&request)) {
						session.update(|s| {
							s.apply_path(&request, path);
						});
					}
				}
				Err(e) => alert(&Notice::OracleFailed(e.to_string())),
			}
		});
	};

	let can_find = move || session.with(|s| s.path_request().is_some());
	let status = move || session.with(status_line);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas session=session viewport=viewport on_node_click=on_node_click />
				<div class="graph-overlay">
					<h1>"Shortest Path Finder"</h1>
					<input type="file" accept=".csv,.txt" on:change=on_upload />
					<p class="subtitle">{status}</p>
					<button disabled=move || !can_find() on:click=find_path>
						"Find shortest path"
					</button>
				</div>
			</div>
		</ErrorBoundary>
	}
}
