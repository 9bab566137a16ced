//! Interactive handle derivation and the stable-ID side table.
//!
//! Handles are derived, never stored with the path: one per vertex, one per
//! edge midpoint. The rendering collaborator needs a stable identity to tie
//! its marker objects back to engine state, so instead of attaching ad-hoc
//! properties to rendering objects the registry issues generated IDs and
//! keeps the ID → target mapping on this side of the boundary. IDs are
//! monotonic and never reused within a session; every structural change
//! rebuilds the table with fresh IDs.

use serde::Serialize;
use std::collections::HashMap;

use super::vertex_path::VertexPath;
use crate::geo::{LatLng, geodesic_midpoint};

/// Identifier for an interactive handle, unique within a session.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd, Serialize)]
pub struct HandleId(pub u64);

impl HandleId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl From<u64> for HandleId {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

/// What a handle manipulates when dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleTarget {
    /// Dragging moves the existing vertex at `index`.
    Vertex { index: usize },
    /// Dragging pulls a new vertex out of edge `index`.
    Edge { index: usize },
}

/// Draggable affordance on a stored vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VertexHandle {
    pub id: HandleId,
    pub vertex_index: usize,
    pub anchor: LatLng,
}

/// Draggable affordance on the geodesic midpoint of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeHandle {
    pub id: HandleId,
    pub edge_index: usize,
    pub anchor: LatLng,
}

/// Issues handle IDs and maps them back to their targets.
#[derive(Debug, Clone, Default)]
pub struct HandleRegistry {
    next_id: u64,
    targets: HashMap<HandleId, HandleTarget>,
}

impl HandleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the side table for the current path and return the derived
    /// handle sets: one vertex handle per stored vertex, one edge handle per
    /// edge, anchored at the true geodesic midpoint.
    pub fn rebuild(&mut self, path: &VertexPath) -> (Vec<VertexHandle>, Vec<EdgeHandle>) {
        self.targets.clear();

        let points = path.points();
        let mut vertex_handles = Vec::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            let id = self.issue(HandleTarget::Vertex { index });
            vertex_handles.push(VertexHandle {
                id,
                vertex_index: index,
                anchor: *point,
            });
        }

        let mut edge_handles = Vec::with_capacity(path.edge_count());
        for (index, pair) in points.windows(2).enumerate() {
            let id = self.issue(HandleTarget::Edge { index });
            edge_handles.push(EdgeHandle {
                id,
                edge_index: index,
                anchor: geodesic_midpoint(pair[0], pair[1]),
            });
        }

        (vertex_handles, edge_handles)
    }

    /// Resolve a handle ID from the current table. Stale IDs from before
    /// the last rebuild resolve to `None`.
    #[must_use]
    pub fn target(&self, id: HandleId) -> Option<HandleTarget> {
        self.targets.get(&id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn issue(&mut self, target: HandleTarget) -> HandleId {
        let id = HandleId::new(self.next_id);
        self.next_id += 1;
        self.targets.insert(id, target);
        id
    }
}
