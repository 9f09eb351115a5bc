//! The navigation state machine: one owner for the current plane, slice
//! index, coordinate, and resolved regions.
//!
//! Every mutation goes through one of the five transition operations, each
//! of which re-establishes the state invariants before returning: the
//! slice index stays in range, the coordinate's fixed-axis component
//! always equals the displayed slice's position, and the varying
//! components survive plane switches and slice stepping untouched unless a
//! pointer or an explicit go-to supplies new values.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use neuroatlas_core::{
    transform, Coordinate, Plane, Region, RegionTable, ScreenPoint, ScreenSize, Slice,
};
use neuroatlas_data::masks::MaskKey;
use neuroatlas_data::Catalogue;

use crate::entry::{self, EntryError};
use crate::resolver_bridge::{spawn_resolver_worker, ResolveOutcome, ResolverCommand};

/// Readiness of the navigator.
///
/// Navigation is unusable until a non-empty slice catalogue has been
/// supplied; until then every transition is a no-op rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorStatus {
    AwaitingCatalogue,
    Ready,
}

/// The published navigation state, read atomically between transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub plane: Plane,
    pub slice_index: usize,
    pub coordinate: Coordinate,
    pub regions: Vec<Region>,
}

pub struct Navigator {
    catalogue: Option<Arc<Catalogue>>,
    plane: Plane,
    slice_index: usize,
    coordinate: Coordinate,
    regions: Vec<Region>,

    commands: mpsc::Sender<ResolverCommand>,
    outcomes: mpsc::Receiver<ResolveOutcome>,
    resolve_id: u64,
    resolve_pending: bool,
}

impl Navigator {
    pub const DEFAULT_PLANE: Plane = Plane::Axial;

    /// Create a navigator with no catalogue and no lookup table. The
    /// resolver worker starts immediately; until a table arrives it
    /// resolves everything to the background sentinel.
    pub fn new() -> Self {
        let (commands, outcomes) = spawn_resolver_worker();
        Self {
            catalogue: None,
            plane: Self::DEFAULT_PLANE,
            slice_index: 0,
            coordinate: Coordinate::ORIGIN,
            regions: vec![Region::background()],
            commands,
            outcomes,
            resolve_id: 0,
            resolve_pending: false,
        }
    }

    // -- Readiness & collaborators -----------------------------------------

    pub fn status(&self) -> NavigatorStatus {
        if self.catalogue.is_some() {
            NavigatorStatus::Ready
        } else {
            NavigatorStatus::AwaitingCatalogue
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status() == NavigatorStatus::Ready
    }

    /// Supply the slice catalogue. An empty catalogue is ignored and the
    /// navigator stays in `AwaitingCatalogue`.
    ///
    /// The session starts on the default plane (falling back to the first
    /// plane that has slices) at the slice nearest the origin, and kicks
    /// off an initial region resolution.
    pub fn set_catalogue(&mut self, catalogue: Arc<Catalogue>) {
        if catalogue.is_empty() {
            warn!("ignoring empty slice catalogue");
            return;
        }
        let plane = if catalogue.len(Self::DEFAULT_PLANE) > 0 {
            Self::DEFAULT_PLANE
        } else {
            // One of the planes is non-empty or we would have bailed above.
            Plane::ALL
                .into_iter()
                .find(|&p| catalogue.len(p) > 0)
                .unwrap_or(Self::DEFAULT_PLANE)
        };
        let axis = plane.fixed_axis();
        let Some(index) = catalogue.nearest_index(plane, self.coordinate.component(axis)) else {
            return;
        };
        let position = match catalogue.get(plane, index) {
            Some(slice) => slice.position,
            None => return,
        };
        info!(
            plane = plane.label(),
            slices = catalogue.len(plane),
            "slice catalogue ready"
        );
        self.catalogue = Some(catalogue);
        self.plane = plane;
        self.slice_index = index;
        self.coordinate = self.coordinate.with_component(axis, position);
        self.request_resolution();
    }

    /// Supply (or clear) the region lookup table. Navigation works without
    /// one; resolution just degrades to the background sentinel.
    pub fn set_lookup_table(&mut self, table: Option<Arc<RegionTable>>) {
        let _ = self.commands.send(ResolverCommand::SetTable(table));
        if self.is_ready() {
            self.request_resolution();
        }
    }

    // -- Transitions -------------------------------------------------------

    /// Step to the adjacent slice. Clamped: stepping past either end of
    /// the plane's list is a no-op, never an error.
    pub fn step_slice(&mut self, direction: i32) {
        let Some(catalogue) = self.catalogue.clone() else {
            return;
        };
        let target = self
            .slice_index
            .saturating_add_signed(direction as isize);
        self.apply_slice_index(&catalogue, target);
    }

    /// Jump to a slice by index, clamped to the plane's valid range.
    pub fn set_slice_index(&mut self, index: usize) {
        let Some(catalogue) = self.catalogue.clone() else {
            return;
        };
        self.apply_slice_index(&catalogue, index);
    }

    /// Switch the viewing plane, keeping the varying coordinate components
    /// and landing on the slice nearest the coordinate's value along the
    /// new plane's fixed axis (ties to the lower index).
    pub fn switch_plane(&mut self, plane: Plane) {
        let Some(catalogue) = self.catalogue.clone() else {
            return;
        };
        if plane == self.plane {
            return;
        }
        let axis = plane.fixed_axis();
        let Some(index) = catalogue.nearest_index(plane, self.coordinate.component(axis)) else {
            debug!(plane = plane.label(), "cannot switch to plane with no slices");
            return;
        };
        debug!(from = self.plane.label(), to = plane.label(), "switching plane");
        self.plane = plane;
        self.apply_slice_index(&catalogue, index);
    }

    /// Resolve a tap or drag on the displayed slice to a full coordinate.
    ///
    /// The fixed-axis component the transform produces always matches the
    /// displayed slice for a pointer on the current slice; if a degenerate
    /// catalogue ever makes them disagree, the slice index is re-aligned
    /// by nearest-position search.
    pub fn pointer_input(&mut self, point: ScreenPoint, screen: ScreenSize) {
        let Some(catalogue) = self.catalogue.clone() else {
            return;
        };
        let Some(slice) = catalogue.get(self.plane, self.slice_index) else {
            return;
        };
        let before = self.coordinate;
        self.coordinate = transform::pixel_to_coordinate(point, screen, slice);

        let axis = self.plane.fixed_axis();
        if self.coordinate.component(axis) != slice.position {
            if let Some(index) = catalogue.nearest_index(self.plane, self.coordinate.component(axis))
            {
                self.slice_index = index;
                if let Some(slice) = catalogue.get(self.plane, index) {
                    self.coordinate = self.coordinate.with_component(axis, slice.position);
                }
            }
        }
        self.maybe_request_resolution(before);
    }

    /// Navigate directly to a coordinate, e.g. from manual entry.
    ///
    /// Out-of-bounds values are accepted: the nearest available slice is
    /// selected and the fixed-axis component snaps to it, keeping the two
    /// varying components verbatim. Navigation never rejects a coordinate.
    pub fn go_to_coordinate(&mut self, coordinate: Coordinate) {
        let Some(catalogue) = self.catalogue.clone() else {
            return;
        };
        let before = self.coordinate;
        self.coordinate = coordinate;

        let axis = self.plane.fixed_axis();
        if let Some(index) = catalogue.nearest_index(self.plane, coordinate.component(axis)) {
            self.slice_index = index;
            if let Some(slice) = catalogue.get(self.plane, index) {
                self.coordinate = self.coordinate.with_component(axis, slice.position);
            }
        }
        self.maybe_request_resolution(before);
    }

    /// Parse three manual-entry fields and navigate to the result.
    ///
    /// A parse failure identifies the offending field and leaves the
    /// navigation state completely unchanged.
    pub fn enter_coordinate(&mut self, x: &str, y: &str, z: &str) -> Result<(), EntryError> {
        let coordinate = entry::parse_fields(x, y, z)?;
        self.go_to_coordinate(coordinate);
        Ok(())
    }

    // -- Published state ---------------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            plane: self.plane,
            slice_index: self.slice_index,
            coordinate: self.coordinate,
            regions: self.regions.clone(),
        }
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn slice_index(&self) -> usize {
        self.slice_index
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn current_slice(&self) -> Option<&Slice> {
        self.catalogue.as_ref()?.get(self.plane, self.slice_index)
    }

    /// Screen position of the current coordinate on the displayed slice,
    /// for drawing a crosshair marker. Re-derived through the transformer
    /// so it is always consistent with the current plane's axis mapping.
    pub fn crosshair(&self, screen: ScreenSize) -> Option<ScreenPoint> {
        let slice = self.current_slice()?;
        Some(transform::coordinate_to_pixel(self.coordinate, screen, slice))
    }

    /// Cache keys for the mask overlays of the currently resolved regions
    /// on the displayed slice. Empty until resolution has produced a
    /// non-background region.
    pub fn mask_keys(&self) -> Vec<MaskKey> {
        let Some(slice) = self.current_slice() else {
            return Vec::new();
        };
        self.regions
            .iter()
            .filter(|region| !region.is_background())
            .map(|region| MaskKey::for_slice(region.id, slice))
            .collect()
    }

    // -- Region resolution plumbing ----------------------------------------

    /// The current resolution request generation. Transitions that
    /// recompute a coordinate component to the value it already had do not
    /// advance it — no redundant lookups, no flicker.
    pub fn resolve_generation(&self) -> u64 {
        self.resolve_id
    }

    pub fn resolve_pending(&self) -> bool {
        self.resolve_pending
    }

    /// Drain any completed resolutions, applying those that still match
    /// the current coordinate. Stale outcomes (the coordinate moved on
    /// while the lookup ran) are discarded — last-write-wins by coordinate
    /// identity, not completion order. Returns whether the region list
    /// changed.
    pub fn poll_regions(&mut self) -> bool {
        let mut updated = false;
        while let Ok(outcome) = self.outcomes.try_recv() {
            updated |= self.apply_outcome(outcome);
        }
        updated
    }

    /// Block until the newest resolution request has been applied, up to
    /// `timeout`. Returns false on timeout or if the worker went away.
    pub fn wait_for_regions(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.resolve_pending {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return false;
            };
            match self.outcomes.recv_timeout(remaining) {
                Ok(outcome) => {
                    self.apply_outcome(outcome);
                }
                Err(_) => return false,
            }
        }
        true
    }

    fn apply_outcome(&mut self, outcome: ResolveOutcome) -> bool {
        if outcome.coordinate != self.coordinate {
            debug!(
                id = outcome.id,
                coordinate = %outcome.coordinate,
                "discarding stale region resolution"
            );
            return false;
        }
        // An earlier request for the same coordinate (e.g. from before a
        // table swap) may still be in flight; only the newest one settles
        // the pending flag.
        if outcome.id == self.resolve_id {
            self.resolve_pending = false;
        }
        let updated = self.regions != outcome.regions;
        self.regions = outcome.regions;
        updated
    }

    // -- Internals ---------------------------------------------------------

    /// Set the slice index (clamped), snap the coordinate's fixed-axis
    /// component to the slice, and request resolution if the coordinate's
    /// value actually changed. Every index-changing transition funnels
    /// through here so the index and coordinate can never disagree.
    fn apply_slice_index(&mut self, catalogue: &Catalogue, index: usize) {
        let count = catalogue.len(self.plane);
        if count == 0 {
            return;
        }
        self.slice_index = index.min(count - 1);
        let Some(slice) = catalogue.get(self.plane, self.slice_index) else {
            return;
        };
        let before = self.coordinate;
        self.coordinate = self
            .coordinate
            .with_component(self.plane.fixed_axis(), slice.position);
        self.maybe_request_resolution(before);
    }

    /// Request resolution only when the coordinate's value changed —
    /// recomputing a component to the same number is not a change.
    fn maybe_request_resolution(&mut self, before: Coordinate) {
        if self.coordinate != before {
            self.request_resolution();
        }
    }

    fn request_resolution(&mut self) {
        self.resolve_id += 1;
        debug!(id = self.resolve_id, coordinate = %self.coordinate, "requesting region resolution");
        let _ = self.commands.send(ResolverCommand::Resolve {
            id: self.resolve_id,
            coordinate: self.coordinate,
        });
        self.resolve_pending = true;
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
