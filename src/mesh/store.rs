//! Entity storage for the half-edge mesh.
//!
//! The mesh owns four growable arenas, one per entity kind. Appending assigns
//! the next slot number, which doubles as the entity's id. Removal tombstones
//! the slot so every other id stays stable; the holes are squeezed out by
//! [`HalfEdgeMesh::refresh_indices`], which renumbers all four collections to
//! dense `0..n-1` and rewrites every cross-reference. Index-based lookups
//! (neighbor matrices, export tables) are trusted only immediately after that
//! pass.

use super::halfedge::HalfEdgeMesh;
use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};

/// A growable slot arena with tombstoned removal.
///
/// Slots are assigned sequentially and never reused until a compaction pass;
/// `len()` counts live entities, not slots.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    live: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Number of live entities.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots, including tombstones.
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Append an entity, returning its slot number.
    pub(crate) fn push(&mut self, value: T) -> usize {
        let slot = self.slots.len();
        self.slots.push(Some(value));
        self.live += 1;
        slot
    }

    #[inline]
    pub(crate) fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots.get_mut(slot).and_then(|s| s.as_mut())
    }

    #[inline]
    pub(crate) fn contains(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    /// Tombstone a slot, returning the entity it held.
    pub(crate) fn remove(&mut self, slot: usize) -> Option<T> {
        let taken = self.slots.get_mut(slot).and_then(|s| s.take());
        if taken.is_some() {
            self.live -= 1;
        }
        taken
    }

    /// Iterate over live entities with their slot numbers.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (i, v)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|v| (i, v)))
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.live = 0;
    }

    /// Squeeze out tombstones, keeping storage order.
    ///
    /// Returns the old-slot to new-slot map for live entities.
    pub(crate) fn compact(&mut self) -> Vec<Option<usize>> {
        let mut map = vec![None; self.slots.len()];
        let mut compacted = Vec::with_capacity(self.live);
        for (old, slot) in self.slots.drain(..).enumerate() {
            if let Some(value) = slot {
                map[old] = Some(compacted.len());
                compacted.push(Some(value));
            }
        }
        self.slots = compacted;
        map
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Renumber every collection to dense `0..n-1` in storage order.
    ///
    /// Compacts tombstoned slots out of all four arenas, rewrites every
    /// cross-reference (`twin`, `next`, `prev`, `face`, `edge`, `target`,
    /// representative half-edges) and stores the new position in each
    /// entity's `index` field.
    ///
    /// Required after any removal before index-based lookups are trusted.
    /// Any ids obtained before this call are invalidated by it.
    ///
    /// # Panics
    /// Panics if a live entity still references a removed one; that is a
    /// connectivity bug and must not be papered over.
    pub fn refresh_indices(&mut self) {
        let vmap = self.vertices.compact();
        let hmap = self.halfedges.compact();
        let emap = self.edges.compact();
        let fmap = self.faces.compact();

        let rv = |id: VertexId<I>| -> VertexId<I> {
            if id.is_valid() {
                VertexId::new(vmap[id.index()].expect("dangling vertex reference"))
            } else {
                id
            }
        };
        let rh = |id: HalfEdgeId<I>| -> HalfEdgeId<I> {
            if id.is_valid() {
                HalfEdgeId::new(hmap[id.index()].expect("dangling half-edge reference"))
            } else {
                id
            }
        };
        let re = |id: EdgeId<I>| -> EdgeId<I> {
            if id.is_valid() {
                EdgeId::new(emap[id.index()].expect("dangling edge reference"))
            } else {
                id
            }
        };
        let rf = |id: FaceId<I>| -> FaceId<I> {
            if id.is_valid() {
                FaceId::new(fmap[id.index()].expect("dangling face reference"))
            } else {
                id
            }
        };

        for (slot, v) in self.vertices.iter_mut() {
            v.index = slot;
            v.halfedge = rh(v.halfedge);
        }
        for (slot, h) in self.halfedges.iter_mut() {
            h.index = slot;
            h.target = rv(h.target);
            h.twin = rh(h.twin);
            h.next = rh(h.next);
            h.prev = rh(h.prev);
            h.face = rf(h.face);
            h.edge = re(h.edge);
        }
        for (slot, e) in self.edges.iter_mut() {
            e.index = slot;
            e.halfedge = rh(e.halfedge);
        }
        for (slot, f) in self.faces.iter_mut() {
            f.index = slot;
            f.halfedge = rh(f.halfedge);
        }
    }

    /// Remove every entity from the mesh.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.halfedges.clear();
        self.edges.clear();
        self.faces.clear();
    }
}
