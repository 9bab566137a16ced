mod handles;
mod history;
mod interaction;
mod vertex_path;

pub use handles::{EdgeHandle, HandleId, HandleRegistry, HandleTarget, VertexHandle};
pub use history::{EditHistory, MAX_HISTORY_STATES};
pub use interaction::{DragState, EdgeInteractionModel};
pub use vertex_path::{MIN_CLOSABLE_VERTICES, PathError, PathState, VertexPath};
