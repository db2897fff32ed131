mod component;
mod error;
mod paint;
mod state;

pub use component::ForceGraphCanvas;
