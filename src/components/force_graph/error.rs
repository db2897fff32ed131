/// Failures talking to the browser canvas.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CanvasError {
	#[error("window is not available")]
	WindowNotAvailable,

	#[error("2d context unavailable: {0}")]
	ContextUnavailable(String),

	#[error("failed to request animation frame: {0}")]
	RequestFailed(String),
}
