use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::error::CanvasError;
use super::paint;
use super::state::CanvasState;
use crate::graph::{Bounds, DrawCommand, Frame, LayoutConfig, Session, Theme, render};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] session: Signal<Session>,
	#[prop(into)] viewport: Signal<Bounds>,
	#[prop(into)] on_node_click: Callback<String>,
	#[prop(default = 10.0)] node_radius: f64,
	#[prop(default = 20.0)] base_distance: f64,
	#[prop(default = 10.0)] weight_distance_multiplier: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let theme = Theme {
		node_radius,
		..Theme::default()
	};
	let config = LayoutConfig {
		base_distance,
		weight_distance_multiplier,
		..LayoutConfig::default()
	};
	let state = Rc::new(RefCell::new(CanvasState::new(config, node_radius)));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	// Any change to the session or the viewport discards the drawing and
	// restarts the layout.
	Effect::new(move |_| {
		let snapshot = session.get();
		let bounds = viewport.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let ctx = match context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(e) => {
				error!("{e}");
				return;
			}
		};

		let mut s = state_init.borrow_mut();
		let loaded = snapshot
			.graph()
			.map(|g| (snapshot.generation(), g.clone()));
		let handle = s.restart(loaded, bounds);
		canvas.set_width(s.width as u32);
		canvas.set_height(s.height as u32);

		let (Some(handle), Some(graph)) = (handle, snapshot.graph().cloned()) else {
			paint::paint(
				&ctx,
				&[DrawCommand::Clear {
					bounds,
					color: theme.background.clone(),
				}],
			);
			return;
		};

		let (selection, path, theme) = (
			snapshot.selection().clone(),
			snapshot.path().clone(),
			theme.clone(),
		);
		let draw = move |frame: &Frame| {
			paint::paint(&ctx, &render(&graph, frame, &selection, &path, bounds, &theme));
		};
		if let Some(frame) = s.frame() {
			draw(&frame);
		}
		if let Err(e) = s.scheduler.on_tick(handle, draw) {
			warn!("{e}");
		}
		drop(s);

		if animate_init.borrow().is_some() {
			return;
		}
		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			state_anim.borrow_mut().scheduler.step();
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Err(e) = request_frame(cb) {
					error!("{e}");
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Err(e) = request_frame(cb) {
				error!("{e}");
			}
		}
	});

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		let hit = state_click
			.borrow()
			.node_at_position(x, y)
			.map(str::to_string);
		if let Some(id) = hit {
			on_node_click.run(id);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:click=on_click
			style="display: block; cursor: pointer;"
		/>
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CanvasError> {
	canvas
		.get_context("2d")
		.map_err(|e| CanvasError::ContextUnavailable(format!("{e:?}")))?
		.ok_or_else(|| CanvasError::ContextUnavailable("no 2d context".into()))?
		.dyn_into()
		.map_err(|_| CanvasError::ContextUnavailable("not a 2d context".into()))
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Result<i32, CanvasError> {
	web_sys::window()
		.ok_or(CanvasError::WindowNotAvailable)?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.map_err(|e| CanvasError::RequestFailed(format!("{e:?}")))
}
