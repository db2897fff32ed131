//! Browser-independent core: parsing, layout, selection, path
//! reconstruction and declarative rendering.

mod error;
mod layout;
mod notice;
mod oracle;
mod parser;
mod path;
mod render;
pub mod scale;
mod scheduler;
mod selection;
mod session;
mod types;

pub use error::{FormatError, GraphError, LayoutError, OracleError, ParseError, ReferenceError};
pub use layout::{Frame, LayoutConfig, Segment, Simulation};
pub use notice::Notice;
pub use oracle::{PetgraphOracle, ShortestPathOracle, solve_path, validate_entries};
pub use parser::parse_graph;
pub use path::reconstruct_path;
pub use render::{DrawCommand, Theme, node_at, render};
pub use scheduler::{SimulationHandle, SimulationScheduler};
pub use selection::{ClickOutcome, Selection};
pub use session::{PathRequest, Session, UploadTicket, UploadTracker};
pub use types::{Bounds, Edge, Graph, Node, Path, Point, Predecessor, PredecessorEntry};
