//! Session orchestration: commands in, consistent snapshots out.
//!
//! A session exclusively owns one path, one history, and one drag state
//! machine for its lifetime. Commands arrive from the pointing surface,
//! mutate the path through the interaction rules, and always end by
//! rebuilding the snapshot — the single structure handed to the rendering
//! collaborator. No partially recomputed state is ever observable.

use serde::Serialize;

use crate::geo::{
    EdgeLabel, LabelPlacer, LatLng, format_area, format_distance, haversine_distance,
};
use crate::path::{
    EdgeHandle, EdgeInteractionModel, EditHistory, HandleRegistry, PathError, VertexHandle,
    VertexPath,
};

/// One renderable segment between consecutive stored vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeSegment {
    pub edge_index: usize,
    /// Index of the segment's start vertex.
    pub from: usize,
    /// Index of the segment's end vertex.
    pub to: usize,
    pub length_meters: f64,
}

/// Complete derived output of the engine after a command.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub points: Vec<LatLng>,
    pub edges: Vec<EdgeSegment>,
    pub vertex_handles: Vec<VertexHandle>,
    pub edge_handles: Vec<EdgeHandle>,
    pub labels: Vec<EdgeLabel>,
    pub distance_meters: f64,
    /// `None` while the path is open; a polygon area once closed.
    pub area_sq_meters: Option<f64>,
    pub is_closed: bool,
    pub distance_text: String,
    pub area_text: Option<String>,
}

/// Hand-off structure for the persistence collaborator. The engine neither
/// generates nor interprets storage identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavePayload {
    pub name: String,
    pub points: Vec<LatLng>,
    pub distance_meters: f64,
    pub area_sq_meters: Option<f64>,
    pub is_closed: bool,
}

/// One interactive drawing/measuring session.
///
/// Multiple open drawings need independent sessions; nothing is shared.
#[derive(Debug)]
pub struct MeasurementSession {
    path: VertexPath,
    history: EditHistory,
    interaction: EdgeInteractionModel,
    handles: HandleRegistry,
    placer: LabelPlacer,
    snapshot: Snapshot,
}

impl MeasurementSession {
    #[must_use]
    pub fn new() -> Self {
        let mut session = Self {
            path: VertexPath::new(),
            history: EditHistory::new(),
            interaction: EdgeInteractionModel::new(),
            handles: HandleRegistry::new(),
            placer: LabelPlacer::new(),
            snapshot: Snapshot::default(),
        };
        session.rebuild();
        session
    }

    /// Session for a display surface with a known zoom level.
    #[must_use]
    pub fn with_zoom(zoom: Option<f64>) -> Self {
        let mut session = Self::new();
        session.placer = LabelPlacer::with_zoom(zoom);
        session.rebuild();
        session
    }

    /// Append a vertex at the end of the path.
    ///
    /// Closing is never implicit: appending a point equal to the first one
    /// does not close the path, only [`close_path`](Self::close_path) does.
    ///
    /// # Errors
    /// [`PathError::InvalidInput`] for a non-finite coordinate; nothing is
    /// recorded or mutated in that case.
    pub fn add_point(&mut self, p: LatLng) -> Result<&Snapshot, PathError> {
        if !p.is_finite() {
            return Err(PathError::InvalidInput {
                lat: p.lat,
                lng: p.lng,
            });
        }
        self.history.record(self.path.state());
        self.path.append(p)?;
        Ok(self.rebuild())
    }

    /// Grab the vertex handle at `index`. One history snapshot is recorded
    /// per gesture, here on entry. Returns whether the drag started.
    pub fn begin_vertex_drag(&mut self, index: usize) -> bool {
        if self.interaction.begin_vertex_drag(&self.path, index) {
            self.history.record(self.path.state());
            true
        } else {
            false
        }
    }

    /// Grab the midpoint handle of `edge`. Mirrors
    /// [`begin_vertex_drag`](Self::begin_vertex_drag).
    pub fn begin_edge_drag(&mut self, edge: usize) -> bool {
        if self.interaction.begin_edge_drag(&self.path, edge) {
            self.history.record(self.path.state());
            true
        } else {
            false
        }
    }

    /// Apply one pointer move to the active gesture. No history is pushed
    /// per move; stale-index moves are no-ops.
    ///
    /// # Errors
    /// [`PathError::InvalidInput`] for a non-finite coordinate; the path
    /// and gesture are unaffected.
    pub fn drag_move(&mut self, p: LatLng) -> Result<&Snapshot, PathError> {
        self.interaction.drag_move(&mut self.path, p)?;
        Ok(self.rebuild())
    }

    /// End the active gesture, committing whatever it did.
    pub fn drag_release(&mut self) -> &Snapshot {
        self.interaction.release();
        self.rebuild()
    }

    /// Close the path into a polygon. A no-op (nothing recorded) when the
    /// path is already closed or has fewer than three vertices.
    pub fn close_path(&mut self) -> &Snapshot {
        if self.path.can_close() {
            self.history.record(self.path.state());
            self.path.close_path();
        }
        self.rebuild()
    }

    /// Restore the most recent recorded state. Silent no-op on an empty
    /// undo stack.
    pub fn undo(&mut self) -> &Snapshot {
        if let Some(previous) = self.history.undo(self.path.state()) {
            self.path.restore(previous);
        }
        self.rebuild()
    }

    /// Mirror of [`undo`](Self::undo).
    pub fn redo(&mut self) -> &Snapshot {
        if let Some(next) = self.history.redo(self.path.state()) {
            self.path.restore(next);
        }
        self.rebuild()
    }

    /// Discard the path, both history stacks, and any active gesture.
    pub fn reset(&mut self) -> &Snapshot {
        self.path.clear();
        self.history.clear();
        self.interaction.reset();
        self.rebuild()
    }

    /// Update the display zoom used for label placement.
    pub fn set_zoom(&mut self, zoom: f64) -> &Snapshot {
        self.placer.set_zoom(zoom);
        self.rebuild()
    }

    /// The snapshot produced by the last command.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Build the hand-off structure for the persistence collaborator.
    #[must_use]
    pub fn save_payload(&self, name: impl Into<String>) -> SavePayload {
        SavePayload {
            name: name.into(),
            points: self.path.points().to_vec(),
            distance_meters: self.snapshot.distance_meters,
            area_sq_meters: self.snapshot.area_sq_meters,
            is_closed: self.snapshot.is_closed,
        }
    }

    /// Recompute the whole snapshot from the current path. Called at the
    /// end of every command so rendering collaborators never see distance,
    /// area, handles, and labels from different path versions.
    fn rebuild(&mut self) -> &Snapshot {
        let points = self.path.points().to_vec();

        let edges = points
            .windows(2)
            .enumerate()
            .map(|(index, pair)| EdgeSegment {
                edge_index: index,
                from: index,
                to: index + 1,
                length_meters: haversine_distance(pair[0], pair[1]),
            })
            .collect();

        let (vertex_handles, edge_handles) = self.handles.rebuild(&self.path);

        let labels = points
            .windows(2)
            .enumerate()
            .map(|(index, pair)| self.placer.place_edge_label(index, pair[0], pair[1]))
            .collect();

        let distance_meters = self.path.total_distance();
        let is_closed = self.path.is_closed();
        let area_sq_meters = is_closed.then(|| self.path.area());

        self.snapshot = Snapshot {
            points,
            edges,
            vertex_handles,
            edge_handles,
            labels,
            distance_meters,
            area_sq_meters,
            is_closed,
            distance_text: format_distance(distance_meters),
            area_text: area_sq_meters.map(format_area),
        };
        &self.snapshot
    }
}

impl Default for MeasurementSession {
    fn default() -> Self {
        Self::new()
    }
}
