//! Bounded newest-first history of state vectors.
//!
//! [`HistoryRing`] keeps the last `capacity` snapshots of one property.
//! [`HistoryStore`] holds one ring per property, all with the same
//! capacity (the operators' lag count).
//!
//! Lag `0` is the most recent snapshot. The engine pushes the initial
//! state at construction and every committed state afterwards, so lag 0
//! always equals the current state.

use indexmap::IndexMap;
use rias_core::{EngineError, PropertyKey};

// ── HistoryRing ─────────────────────────────────────────────────

/// Fixed-capacity ring of snapshots for one property.
///
/// The write position grows monotonically; slot index is
/// `pos % capacity`. Pushing into a full ring overwrites the oldest slot
/// in place, reusing its allocation.
#[derive(Clone, Debug)]
pub struct HistoryRing {
    slots: Vec<Vec<f64>>,
    write_pos: u64,
    capacity: usize,
}

impl HistoryRing {
    /// Create an empty ring.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "HistoryRing capacity must be >= 1, got {capacity}");
        Self {
            slots: Vec::with_capacity(capacity),
            write_pos: 0,
            capacity,
        }
    }

    /// Copy `values` in as the newest snapshot, evicting the oldest when
    /// full.
    pub fn push(&mut self, values: &[f64]) {
        let idx = (self.write_pos % self.capacity as u64) as usize;
        if idx < self.slots.len() {
            let slot = &mut self.slots[idx];
            slot.clear();
            slot.extend_from_slice(values);
        } else {
            self.slots.push(values.to_vec());
        }
        self.write_pos += 1;
    }

    /// The snapshot `lag` pushes ago, or `None` if not retained.
    pub fn get(&self, lag: usize) -> Option<&[f64]> {
        if lag >= self.len() {
            return None;
        }
        let pos = self.write_pos - 1 - lag as u64;
        Some(&self.slots[(pos % self.capacity as u64) as usize])
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> Option<&[f64]> {
        self.get(0)
    }

    /// The oldest retained snapshot.
    pub fn oldest(&self) -> Option<&[f64]> {
        self.len().checked_sub(1).and_then(|lag| self.get(lag))
    }

    /// Overwrite the most recent snapshot without changing the depth.
    ///
    /// Returns `false` (and does nothing) on an empty ring.
    pub fn overwrite_latest(&mut self, values: &[f64]) -> bool {
        if self.write_pos == 0 {
            return false;
        }
        let idx = ((self.write_pos - 1) % self.capacity as u64) as usize;
        let slot = &mut self.slots[idx];
        slot.clear();
        slot.extend_from_slice(values);
        true
    }

    /// Number of snapshots retained (at most `capacity`).
    pub fn len(&self) -> usize {
        (self.write_pos as usize).min(self.capacity)
    }

    /// Whether nothing has been pushed since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.write_pos == 0
    }

    /// Maximum number of snapshots retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total pushes since creation or the last clear.
    pub fn write_pos(&self) -> u64 {
        self.write_pos
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.slots.clear();
    }
}

// ── HistoryStore ────────────────────────────────────────────────

/// Per-property history rings sharing one capacity.
///
/// # Examples
///
/// ```
/// use rias_engine::HistoryStore;
///
/// let mut h = HistoryStore::new(2, ["x".into()]);
/// h.push("x", &[1.0]).unwrap();
/// h.push("x", &[2.0]).unwrap();
/// h.push("x", &[3.0]).unwrap();
///
/// assert_eq!(h.len("x").unwrap(), 2);
/// assert_eq!(h.snapshot_at("x", 0).unwrap(), &[3.0]);
/// assert_eq!(h.snapshot_at("x", 1).unwrap(), &[2.0]);
/// assert!(h.snapshot_at("x", 2).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct HistoryStore {
    rings: IndexMap<PropertyKey, HistoryRing>,
    capacity: usize,
}

impl HistoryStore {
    /// Empty rings of `capacity` for each property.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize, properties: impl IntoIterator<Item = PropertyKey>) -> Self {
        let rings = properties
            .into_iter()
            .map(|k| (k, HistoryRing::new(capacity)))
            .collect();
        Self { rings, capacity }
    }

    /// Prepend a snapshot of `property`.
    pub fn push(&mut self, property: &str, values: &[f64]) -> Result<(), EngineError> {
        self.ring_mut(property)?.push(values);
        Ok(())
    }

    /// The snapshot of `property` from `lag` ticks ago.
    ///
    /// # Errors
    ///
    /// [`EngineError::HistoryUnderflow`] if `lag >= len(property)`, and
    /// [`EngineError::UnknownProperty`] for an unknown name.
    pub fn snapshot_at(&self, property: &str, lag: usize) -> Result<&[f64], EngineError> {
        let (key, ring) = self
            .rings
            .get_key_value(property)
            .ok_or_else(|| EngineError::unknown(property))?;
        ring.get(lag).ok_or_else(|| EngineError::HistoryUnderflow {
            property: key.clone(),
            lag,
            depth: ring.len(),
        })
    }

    /// Number of snapshots retained for `property`.
    pub fn len(&self, property: &str) -> Result<usize, EngineError> {
        Ok(self.ring(property)?.len())
    }

    /// Capacity shared by every ring.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of properties tracked.
    pub fn property_count(&self) -> usize {
        self.rings.len()
    }

    /// Clear every ring.
    pub fn clear(&mut self) {
        for ring in self.rings.values_mut() {
            ring.clear();
        }
    }

    /// The ring of `property`.
    pub fn ring(&self, property: &str) -> Result<&HistoryRing, EngineError> {
        self.rings
            .get(property)
            .ok_or_else(|| EngineError::unknown(property))
    }

    fn ring_mut(&mut self, property: &str) -> Result<&mut HistoryRing, EngineError> {
        self.rings
            .get_mut(property)
            .ok_or_else(|| EngineError::unknown(property))
    }

    /// Ring by declaration position.
    pub(crate) fn ring_at(&self, index: usize) -> &HistoryRing {
        &self.rings[index]
    }

    /// Mutable ring by declaration position.
    pub(crate) fn ring_at_mut(&mut self, index: usize) -> &mut HistoryRing {
        &mut self.rings[index]
    }
}
