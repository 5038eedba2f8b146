//! Uniform receptor grid with the sea-state Markov field.
//!
//! # Layout
//!
//! Receptors sit on the lattice `origin + (col, row) · cell_size`, stored
//! row-major so that `index = row · max_cols + col`.  The lattice covers the
//! operating area's bounding box plus a border on every side; a point maps to
//! the receptor at the lower-left corner of the cell that contains it.
//!
//! # Mutation
//!
//! Agents only read the grid during a tick.  Sea states change once per tick
//! in [`SpatialGrid::update_sea_state`]; zone labels change only during
//! tessellation.

use tracing::debug;

use ps_core::{Point, ReceptorId, SimRng, ZoneId};

use crate::area::OperatingArea;
use crate::markov::TransitionTable;
use crate::noise::{sample_unit_field, NoiseParams};
use crate::{SpatialError, SpatialResult};

/// Absorbs rounding when a lattice coordinate is divided back by the cell
/// size, so a receptor's own location always maps to its own cell.
const LOOKUP_EPS: f64 = 1e-9;

// ── Receptor ──────────────────────────────────────────────────────────────────

/// One fixed sample point of the environmental field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Receptor {
    pub id:        ReceptorId,
    pub location:  Point,
    pub sea_state: u8,
    /// Inside the true operating polygon (not just the grid rectangle).
    pub in_zone:   bool,
    /// Patrol zone this receptor is assigned to, if any.
    pub zone:      Option<ZoneId>,
    /// Uniform sample that drove the latest sea-state transition.
    pub uniform:   f64,
}

// ── SpatialGrid ───────────────────────────────────────────────────────────────

pub struct SpatialGrid {
    receptors:   Vec<Receptor>,
    origin:      Point,
    /// Far corner of the grid rectangle.
    far:         Point,
    cell_size:   f64,
    max_rows:    usize,
    max_cols:    usize,
    transitions: TransitionTable,
    noise:       NoiseParams,
}

impl SpatialGrid {
    /// Lay out receptors over `area`'s bounding box grown by `border`.
    ///
    /// Every receptor starts in `initial_state`, which must have a row in
    /// `transitions`.
    pub fn new(
        area: &OperatingArea,
        cell_size: f64,
        border: f64,
        transitions: TransitionTable,
        initial_state: u8,
        noise: NoiseParams,
    ) -> SpatialResult<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpatialError::InvalidGrid(format!("cell size {cell_size} must be positive")));
        }
        if !(border.is_finite() && border >= 0.0) {
            return Err(SpatialError::InvalidGrid(format!("border {border} must be non-negative")));
        }
        if initial_state as usize >= transitions.states() {
            return Err(SpatialError::UnknownSeaState {
                state:  initial_state,
                states: transitions.states(),
            });
        }

        let bbox = area.bbox();
        let origin = Point::new(bbox.min.x - border, bbox.min.y - border);
        let span_x = bbox.width() + 2.0 * border;
        let span_y = bbox.height() + 2.0 * border;
        let far = Point::new(origin.x + span_x, origin.y + span_y);
        // One extra row/col so the far edge of the rectangle is still in bounds.
        let max_cols = (span_x / cell_size).floor() as usize + 1;
        let max_rows = (span_y / cell_size).floor() as usize + 1;
        if u32::try_from(max_rows * max_cols).is_err() {
            return Err(SpatialError::InvalidGrid(format!(
                "{max_rows} × {max_cols} receptors exceed the id space"
            )));
        }

        let mut receptors = Vec::with_capacity(max_rows * max_cols);
        for row in 0..max_rows {
            for col in 0..max_cols {
                let location = Point::new(
                    origin.x + col as f64 * cell_size,
                    origin.y + row as f64 * cell_size,
                );
                receptors.push(Receptor {
                    id: ReceptorId((row * max_cols + col) as u32),
                    location,
                    sea_state: initial_state,
                    in_zone: area.contains(location),
                    zone: None,
                    uniform: 0.5,
                });
            }
        }

        debug!(max_rows, max_cols, cell_size, "receptor grid initialised");
        Ok(Self { receptors, origin, far, cell_size, max_rows, max_cols, transitions, noise })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn receptors(&self) -> &[Receptor] {
        &self.receptors
    }

    #[inline]
    pub fn receptor(&self, id: ReceptorId) -> Option<&Receptor> {
        self.receptors.get(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.receptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.receptors.is_empty()
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.max_rows, self.max_cols)
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Receptors inside the operating polygon.
    pub fn in_zone(&self) -> impl Iterator<Item = &Receptor> {
        self.receptors.iter().filter(|r| r.in_zone)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Row-major index of the cell holding `p`.
    ///
    /// The last row and column sit on the far edge, so points past that edge
    /// are rejected even though they would floor into an existing cell.
    pub fn index_of(&self, p: Point) -> SpatialResult<usize> {
        let slack = LOOKUP_EPS * self.cell_size;
        if p.x > self.far.x + slack || p.y > self.far.y + slack {
            return Err(SpatialError::OutOfBounds { x: p.x, y: p.y });
        }
        let col = ((p.x - self.origin.x) / self.cell_size + LOOKUP_EPS).floor();
        let row = ((p.y - self.origin.y) / self.cell_size + LOOKUP_EPS).floor();
        let in_range = |v: f64, max: usize| v >= 0.0 && v < max as f64;
        if !(in_range(col, self.max_cols) && in_range(row, self.max_rows)) {
            return Err(SpatialError::OutOfBounds { x: p.x, y: p.y });
        }
        Ok(row as usize * self.max_cols + col as usize)
    }

    /// O(1) receptor lookup.  Fails for points outside the grid rectangle.
    pub fn lookup(&self, p: Point) -> SpatialResult<&Receptor> {
        let idx = self.index_of(p)?;
        Ok(&self.receptors[idx])
    }

    /// Sea state at the receptor covering `p`.
    #[inline]
    pub fn sea_state_at(&self, p: Point) -> SpatialResult<u8> {
        self.lookup(p).map(|r| r.sea_state)
    }

    /// Receptors within Euclidean `radius` of `p`.
    ///
    /// Only the cell range spanning `p ± radius` is scanned; each candidate is
    /// then checked against the exact distance.
    pub fn query_radius(&self, p: Point, radius: f64) -> Vec<&Receptor> {
        let Some((r0, r1)) = self.axis_range(p.y - radius, p.y + radius, self.origin.y, self.max_rows) else {
            return Vec::new();
        };
        let Some((c0, c1)) = self.axis_range(p.x - radius, p.x + radius, self.origin.x, self.max_cols) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for row in r0..=r1 {
            let base = row * self.max_cols;
            for r in &self.receptors[base + c0..=base + c1] {
                if r.location.euclidean(p) <= radius {
                    out.push(r);
                }
            }
        }
        out
    }

    /// Lattice indices whose coordinate may fall in `[lo, hi]`, clamped to
    /// `[0, max)`.  `None` when the interval misses the grid entirely.
    fn axis_range(&self, lo: f64, hi: f64, start: f64, max: usize) -> Option<(usize, usize)> {
        let first = ((lo - start) / self.cell_size).floor().max(0.0);
        let last = ((hi - start) / self.cell_size + LOOKUP_EPS).floor().min(max as f64 - 1.0);
        (first <= last).then(|| (first as usize, last as usize))
    }

    // ── Zone labels ───────────────────────────────────────────────────────

    pub fn set_zone(&mut self, id: ReceptorId, zone: Option<ZoneId>) {
        if let Some(r) = self.receptors.get_mut(id.index()) {
            r.zone = zone;
        }
    }

    pub fn clear_zones(&mut self) {
        self.receptors.iter_mut().for_each(|r| r.zone = None);
    }

    // ── Sea state ─────────────────────────────────────────────────────────

    #[inline]
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Advance every receptor's sea state by one Markov step, driven by a
    /// freshly sampled coherent noise field normalized to `[0, 1]`.
    pub fn update_sea_state(&mut self, rng: &mut SimRng) -> SpatialResult<()> {
        let field = sample_unit_field(self.max_rows, self.max_cols, &self.noise, rng);
        self.update_sea_state_with(&field)
    }

    /// Like [`update_sea_state`](Self::update_sea_state) with caller-supplied
    /// uniforms, one per receptor in row-major order.
    pub fn update_sea_state_with(&mut self, uniforms: &[f64]) -> SpatialResult<()> {
        if uniforms.len() != self.receptors.len() {
            return Err(SpatialError::FieldShape {
                expected: self.receptors.len(),
                got:      uniforms.len(),
            });
        }
        for (r, &u) in self.receptors.iter_mut().zip(uniforms) {
            r.sea_state = self.transitions.next_state(r.sea_state, u)?;
            r.uniform = u;
        }
        Ok(())
    }
}
