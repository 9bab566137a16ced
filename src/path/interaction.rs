//! The drag state machine behind vertex and edge-midpoint handles.
//!
//! One gesture spans many discrete move events between a grab and a
//! release, so the machine holds the interaction state across events
//! instead of blocking. Vertex drags replay `set_at` on every move.
//! Edge-midpoint drags insert a brand-new vertex on the *first* move and
//! then behave like a vertex drag — that single mechanic lets a user pull a
//! new vertex out of the middle of a segment without a separate add-vertex
//! mode. Drags always commit on release; there is no cancel path.
//!
//! Moves that target an index the path no longer has are ignored: in a
//! single-threaded event loop that only happens with a stale handle, and
//! dropping the event is the defined behavior.

use log::debug;

use super::vertex_path::{PathError, VertexPath};
use crate::geo::LatLng;

/// Current gesture, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A vertex handle is held; moves replace the vertex at `vertex`.
    VertexDragging { vertex: usize },
    /// An edge handle is held. `inserted` is the index of the vertex the
    /// first move created, or `None` until that move arrives.
    EdgeDragging {
        edge: usize,
        inserted: Option<usize>,
    },
}

/// Drives path mutations from pointer gestures.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeInteractionModel {
    state: DragState,
}

impl EdgeInteractionModel {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    /// Grab the vertex handle at `vertex`. Returns whether the drag
    /// started; grabs outside Idle or on a nonexistent vertex are ignored.
    pub fn begin_vertex_drag(&mut self, path: &VertexPath, vertex: usize) -> bool {
        if !self.is_idle() || vertex >= path.len() {
            debug!("ignoring vertex drag start on index {vertex}");
            return false;
        }
        self.state = DragState::VertexDragging { vertex };
        true
    }

    /// Grab the midpoint handle of `edge`. Returns whether the drag
    /// started; grabs outside Idle or on a nonexistent edge are ignored.
    pub fn begin_edge_drag(&mut self, path: &VertexPath, edge: usize) -> bool {
        if !self.is_idle() || edge >= path.edge_count() {
            debug!("ignoring edge drag start on index {edge}");
            return false;
        }
        self.state = DragState::EdgeDragging {
            edge,
            inserted: None,
        };
        true
    }

    /// Apply one pointer move to the active gesture.
    ///
    /// Moves without an active gesture and moves whose target index has
    /// gone stale are silent no-ops. Returns whether the path changed.
    ///
    /// # Errors
    /// [`PathError::InvalidInput`] for a non-finite coordinate; the path is
    /// left unchanged and the gesture stays active.
    pub fn drag_move(&mut self, path: &mut VertexPath, p: LatLng) -> Result<bool, PathError> {
        match self.state {
            DragState::Idle => Ok(false),
            DragState::VertexDragging { vertex } => apply_move(path.set_at(vertex, p)),
            DragState::EdgeDragging {
                edge,
                inserted: None,
            } => {
                // The only place an edge handle creates a vertex.
                let inserted = edge + 1;
                let changed = apply_move(path.insert_at(inserted, p))?;
                if changed {
                    self.state = DragState::EdgeDragging {
                        edge,
                        inserted: Some(inserted),
                    };
                }
                Ok(changed)
            }
            DragState::EdgeDragging {
                inserted: Some(index),
                ..
            } => apply_move(path.set_at(index, p)),
        }
    }

    /// End the gesture. Returns whether a gesture was active; the caller
    /// finalizes by recomputing the snapshot once.
    pub fn release(&mut self) -> bool {
        let was_active = !self.is_idle();
        self.state = DragState::Idle;
        was_active
    }

    /// Forget any gesture without touching the path (used by session
    /// reset).
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Stale-index failures become no-ops; invalid coordinates propagate.
fn apply_move(result: Result<(), PathError>) -> Result<bool, PathError> {
    match result {
        Ok(()) => Ok(true),
        Err(PathError::IndexOutOfRange { index, len }) => {
            debug!("dropping drag move for stale index {index} (len {len})");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(f64, f64)]) -> VertexPath {
        let mut path = VertexPath::new();
        for &(lat, lng) in points {
            path.append(LatLng::new(lat, lng)).unwrap();
        }
        path
    }

    #[test]
    fn vertex_drag_replaces_the_vertex_on_every_move() {
        let path = &mut line(&[(0.0, 0.0), (0.0, 0.002)]);
        let mut model = EdgeInteractionModel::new();

        assert!(model.begin_vertex_drag(path, 1));
        model.drag_move(path, LatLng::new(0.001, 0.002)).unwrap();
        model.drag_move(path, LatLng::new(0.002, 0.002)).unwrap();
        assert!(model.release());

        assert_eq!(path.len(), 2);
        assert_eq!(path.points()[1], LatLng::new(0.002, 0.002));
    }

    #[test]
    fn edge_drag_inserts_exactly_one_vertex_on_the_first_move() {
        let path = &mut line(&[(0.0, 0.0), (0.0, 0.002)]);
        let mut model = EdgeInteractionModel::new();

        assert!(model.begin_edge_drag(path, 0));
        assert_eq!(path.len(), 2);

        model.drag_move(path, LatLng::new(0.001, 0.001)).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.points()[1], LatLng::new(0.001, 0.001));

        model.drag_move(path, LatLng::new(0.002, 0.001)).unwrap();
        model.drag_move(path, LatLng::new(0.003, 0.001)).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.points()[1], LatLng::new(0.003, 0.001));

        // Surrounding vertices keep their order and values.
        assert_eq!(path.points()[0], LatLng::new(0.0, 0.0));
        assert_eq!(path.points()[2], LatLng::new(0.0, 0.002));
    }

    #[test]
    fn edge_drag_without_moves_inserts_nothing() {
        let path = &mut line(&[(0.0, 0.0), (0.0, 0.002)]);
        let mut model = EdgeInteractionModel::new();

        assert!(model.begin_edge_drag(path, 0));
        assert!(model.release());
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn stale_grab_indices_are_rejected() {
        let path = &mut line(&[(0.0, 0.0), (0.0, 0.002)]);
        let mut model = EdgeInteractionModel::new();

        assert!(!model.begin_vertex_drag(path, 2));
        assert!(!model.begin_edge_drag(path, 1));
        assert!(model.is_idle());
    }

    #[test]
    fn grabs_are_ignored_while_a_gesture_is_active() {
        let path = &mut line(&[(0.0, 0.0), (0.0, 0.002)]);
        let mut model = EdgeInteractionModel::new();

        assert!(model.begin_vertex_drag(path, 0));
        assert!(!model.begin_vertex_drag(path, 1));
        assert!(!model.begin_edge_drag(path, 0));
        assert_eq!(model.state(), DragState::VertexDragging { vertex: 0 });
    }

    #[test]
    fn moves_without_a_gesture_are_no_ops() {
        let path = &mut line(&[(0.0, 0.0), (0.0, 0.002)]);
        let mut model = EdgeInteractionModel::new();
        let before = path.state();

        assert_eq!(model.drag_move(path, LatLng::new(1.0, 1.0)), Ok(false));
        assert_eq!(path.state(), before);
        assert!(!model.release());
    }

    #[test]
    fn non_finite_move_fails_without_corrupting_the_path_or_gesture() {
        let path = &mut line(&[(0.0, 0.0), (0.0, 0.002)]);
        let mut model = EdgeInteractionModel::new();
        model.begin_vertex_drag(path, 1);
        let before = path.state();

        let err = model
            .drag_move(path, LatLng::new(f64::NAN, 0.0))
            .unwrap_err();
        assert!(matches!(err, PathError::InvalidInput { .. }));
        assert_eq!(path.state(), before);
        assert_eq!(model.state(), DragState::VertexDragging { vertex: 1 });

        // The gesture is still usable afterwards.
        model.drag_move(path, LatLng::new(0.001, 0.002)).unwrap();
        assert_eq!(path.points()[1], LatLng::new(0.001, 0.002));
    }
}
