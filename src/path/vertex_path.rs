//! The ordered vertex sequence under edit, with its derived measurements.
//!
//! A path is an ordered list of coordinates; consecutive vertices define its
//! edges. Closing a path appends a copy of the first vertex and raises an
//! explicit `closed` flag — the flag, not coordinate equality, is the source
//! of truth for "is this a polygon", so floating-point drift from dragging
//! can never silently reopen or close a ring. Any mutation that touches the
//! first or last vertex lowers the flag again.

use serde::{Deserialize, Serialize};

use crate::geo::{LatLng, path_length, spherical_polygon_area};

/// Structural errors for path mutations. A failed mutation leaves the path
/// unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    /// A coordinate component was NaN or infinite.
    #[error("coordinate must be finite, got lat {lat}, lng {lng}")]
    InvalidInput { lat: f64, lng: f64 },

    /// A vertex or edge index no longer exists on the path.
    #[error("index {index} out of range for path of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A deep snapshot of the editable path state, as stored on the undo/redo
/// stacks and restored wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathState {
    pub points: Vec<LatLng>,
    pub closed: bool,
}

/// Minimum number of vertices before a path can be closed into a polygon.
pub const MIN_CLOSABLE_VERTICES: usize = 3;

/// The core mutable vertex sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexPath {
    points: Vec<LatLng>,
    closed: bool,
}

impl VertexPath {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            points: Vec::new(),
            closed: false,
        }
    }

    /// Number of stored vertices. The closing vertex of a closed path is
    /// stored and therefore counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of edges between consecutive stored vertices. The closing
    /// edge of a closed path is counted because its closing vertex is
    /// stored, not implied.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Append a vertex at the end of the path.
    ///
    /// # Errors
    /// [`PathError::InvalidInput`] when the coordinate is not finite.
    pub fn append(&mut self, p: LatLng) -> Result<(), PathError> {
        ensure_finite(p)?;
        self.points.push(p);
        // The last vertex changed, so any closure is broken.
        self.closed = false;
        Ok(())
    }

    /// Insert a vertex before `index` (`index == len` appends).
    ///
    /// # Errors
    /// [`PathError::InvalidInput`] for a non-finite coordinate,
    /// [`PathError::IndexOutOfRange`] for `index > len`.
    pub fn insert_at(&mut self, index: usize, p: LatLng) -> Result<(), PathError> {
        ensure_finite(p)?;
        if index > self.points.len() {
            return Err(PathError::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        self.points.insert(index, p);
        if index == 0 || index == self.points.len() - 1 {
            self.closed = false;
        }
        Ok(())
    }

    /// Replace the vertex at `index`.
    ///
    /// # Errors
    /// [`PathError::InvalidInput`] for a non-finite coordinate,
    /// [`PathError::IndexOutOfRange`] for `index >= len`.
    pub fn set_at(&mut self, index: usize, p: LatLng) -> Result<(), PathError> {
        ensure_finite(p)?;
        if index >= self.points.len() {
            return Err(PathError::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        self.points[index] = p;
        if index == 0 || index == self.points.len() - 1 {
            self.closed = false;
        }
        Ok(())
    }

    /// Whether [`close_path`](Self::close_path) would mutate the path.
    #[must_use]
    pub fn can_close(&self) -> bool {
        !self.closed && self.points.len() >= MIN_CLOSABLE_VERTICES
    }

    /// Close the path by appending a copy of the first vertex.
    ///
    /// Idempotent: already-closed paths and paths with fewer than three
    /// vertices are left untouched. Returns whether the path was mutated.
    pub fn close_path(&mut self) -> bool {
        if !self.can_close() {
            return false;
        }
        let first = self.points[0];
        self.points.push(first);
        self.closed = true;
        true
    }

    /// Reset to the empty path.
    pub fn clear(&mut self) {
        self.points.clear();
        self.closed = false;
    }

    /// Total great-circle length over consecutive stored vertices, meters.
    /// The closing edge is included exactly when the closing vertex is
    /// stored, i.e. when the path is closed.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        path_length(&self.points)
    }

    /// Enclosed spherical area in square meters; 0 unless closed.
    #[must_use]
    pub fn area(&self) -> f64 {
        if self.closed {
            spherical_polygon_area(&self.points)
        } else {
            0.0
        }
    }

    /// Deep copy of the current state, for the history stacks.
    #[must_use]
    pub fn state(&self) -> PathState {
        PathState {
            points: self.points.clone(),
            closed: self.closed,
        }
    }

    /// Replace the whole path with a previously captured state.
    pub fn restore(&mut self, state: PathState) {
        self.points = state.points;
        self.closed = state.closed;
    }
}

fn ensure_finite(p: LatLng) -> Result<(), PathError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(PathError::InvalidInput {
            lat: p.lat,
            lng: p.lng,
        })
    }
}
