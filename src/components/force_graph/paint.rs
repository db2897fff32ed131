use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::graph::DrawCommand;

/// Replays a draw list onto the canvas.
pub fn paint(ctx: &CanvasRenderingContext2d, commands: &[DrawCommand]) {
	for command in commands {
		match command {
			DrawCommand::Clear { bounds, color } => {
				ctx.set_fill_style_str(color);
				ctx.fill_rect(0.0, 0.0, bounds.width, bounds.height);
			}
			DrawCommand::Line {
				from,
				to,
				color,
				width,
			} => {
				ctx.set_stroke_style_str(color);
				ctx.set_line_width(*width);
				ctx.begin_path();
				ctx.move_to(from.x, from.y);
				ctx.line_to(to.x, to.y);
				ctx.stroke();
			}
			DrawCommand::Circle {
				center,
				radius,
				color,
				..
			} => {
				ctx.begin_path();
				let _ = ctx.arc(center.x, center.y, *radius, 0.0, 2.0 * PI);
				ctx.set_fill_style_str(color);
				ctx.fill();
			}
			DrawCommand::Text {
				at,
				text,
				color,
				size,
			} => {
				ctx.set_fill_style_str(color);
				ctx.set_font(&format!("{size}px sans-serif"));
				let _ = ctx.fill_text(text, at.x, at.y);
			}
		}
	}
}
