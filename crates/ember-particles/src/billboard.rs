//! Billboard sink: a slab of camera-facing textured quads.
//!
//! The particle system is the single writer during its update; the renderer
//! reads the collection (or a packed instance buffer) between updates.
//! Handles are generation-checked so a stale handle can never touch a slot
//! that has been reused.

use bytemuck::{Pod, Zeroable};
use ember_core::{Color, Vec3};
use std::sync::Arc;

/// Opaque handle into a `BillboardCollection`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BillboardHandle {
    index: u32,
    generation: u32,
}

/// One camera-facing textured quad. Fields are last-write-wins within a
/// frame; the renderer consumes whatever state the update left behind.
#[derive(Clone, Debug)]
pub struct Billboard {
    pub image: Option<Arc<str>>,
    pub show: bool,
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub scale: f32,
    /// Width/height are meters in world space rather than pixels
    pub size_in_meters: bool,
}

impl Billboard {
    pub fn new(image: Option<Arc<str>>) -> Self {
        Self {
            image,
            show: false,
            position: Vec3::ZERO,
            width: 1.0,
            height: 1.0,
            color: Color::WHITE,
            scale: 1.0,
            size_in_meters: false,
        }
    }
}

/// GPU instance data for one visible billboard — matches the renderer's
/// WGSL instance struct. 48 bytes, three vec4 rows.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct BillboardInstance {
    /// xyz = world position, w = uniform scale
    pub pos_scale: [f32; 4],
    /// rgba
    pub color: [f32; 4],
    /// x = width, y = height, z = 1.0 when sized in meters, w unused
    pub extent: [f32; 4],
}

impl BillboardInstance {
    pub fn from_billboard(b: &Billboard) -> Self {
        Self {
            pos_scale: [b.position.x, b.position.y, b.position.z, b.scale],
            color: b.color.to_array(),
            extent: [
                b.width,
                b.height,
                if b.size_in_meters { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// Generation-indexed slab of billboards with O(1) add and remove.
#[derive(Default)]
pub struct BillboardCollection {
    slots: Vec<Option<Billboard>>,
    generations: Vec<u32>,
    free: Vec<u32>,
    len: usize,
}

impl BillboardCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a billboard, reusing a free slot when one exists.
    pub fn add(&mut self, billboard: Billboard) -> BillboardHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(billboard);
            return BillboardHandle {
                index,
                generation: self.generations[index as usize],
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Some(billboard));
        self.generations.push(0);
        BillboardHandle {
            index,
            generation: 0,
        }
    }

    /// Remove an entry. Returns false if the handle is stale.
    pub fn remove(&mut self, handle: BillboardHandle) -> bool {
        let i = handle.index as usize;
        if i >= self.slots.len()
            || self.generations[i] != handle.generation
            || self.slots[i].is_none()
        {
            return false;
        }
        self.slots[i] = None;
        self.generations[i] = self.generations[i].wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        true
    }

    pub fn get(&self, handle: BillboardHandle) -> Option<&Billboard> {
        let i = handle.index as usize;
        if i < self.slots.len() && self.generations[i] == handle.generation {
            self.slots[i].as_ref()
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, handle: BillboardHandle) -> Option<&mut Billboard> {
        let i = handle.index as usize;
        if i < self.slots.len() && self.generations[i] == handle.generation {
            self.slots[i].as_mut()
        } else {
            None
        }
    }

    /// Iterate live entries
    pub fn iter(&self) -> impl Iterator<Item = &Billboard> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    /// Pack visible entries into `out` for GPU upload. The buffer is
    /// cleared first so it can be reused across frames.
    pub fn pack_instances(&self, out: &mut Vec<BillboardInstance>) {
        out.clear();
        for b in self.iter() {
            if b.show {
                out.push(BillboardInstance::from_billboard(b));
            }
        }
    }
}
