use bytemuck::NoUninit;
use glam::Vec3;

use crate::model::world::BlockTexCoords;

/// Positions of the 24 corners of a cube, 4 per face
pub type CubeVertices = [Vec3; 24];

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, NoUninit)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

/// Opaque reference to a drawable owned by a [`Renderer`].
///
/// The generation makes a handle to a freed slot harmless once the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawHandle {
    index: u32,
    generation: u32,
}

/// Receives textured cubes from the world and draws them.
///
/// Called synchronously from the simulation thread; implementations must not call back into the scene.
pub trait Renderer {
    fn register(&mut self, vertices: &CubeVertices, tex_coords: &BlockTexCoords) -> DrawHandle;

    fn unregister(&mut self, handle: DrawHandle);

    /// Issue all registered draws
    fn flush(&mut self);
}

/// Vertices of the cube centered at `center` with size 2*`n`
pub fn cube_vertices(center: Vec3, n: f32) -> CubeVertices {
    let Vec3 { x, y, z } = center;
    [
        // top
        Vec3::new(x - n, y + n, z - n), Vec3::new(x - n, y + n, z + n), Vec3::new(x + n, y + n, z + n), Vec3::new(x + n, y + n, z - n),
        // bottom
        Vec3::new(x - n, y - n, z - n), Vec3::new(x + n, y - n, z - n), Vec3::new(x + n, y - n, z + n), Vec3::new(x - n, y - n, z + n),
        // left
        Vec3::new(x - n, y - n, z - n), Vec3::new(x - n, y - n, z + n), Vec3::new(x - n, y + n, z + n), Vec3::new(x - n, y + n, z - n),
        // right
        Vec3::new(x + n, y - n, z + n), Vec3::new(x + n, y - n, z - n), Vec3::new(x + n, y + n, z - n), Vec3::new(x + n, y + n, z + n),
        // front
        Vec3::new(x - n, y - n, z + n), Vec3::new(x + n, y - n, z + n), Vec3::new(x + n, y + n, z + n), Vec3::new(x - n, y + n, z + n),
        // back
        Vec3::new(x + n, y - n, z - n), Vec3::new(x - n, y - n, z - n), Vec3::new(x - n, y + n, z - n), Vec3::new(x + n, y + n, z - n),
    ]
}

struct Slot {
    generation: u32,
    quads: Option<Box<[Vertex; 24]>>,
}

/// Collection of cube vertex lists for batched drawing.
///
/// Cubes live in an arena of slots; freed slots are recycled through a free list, so
/// registering and unregistering are both O(1).
#[derive(Default)]
pub struct Batch {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,

    /// interleaved vertices assembled by the last `flush`
    staging: Vec<Vertex>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered cubes
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn contains(&self, handle: DrawHandle) -> bool {
        self.slots
            .get(handle.index as usize)
            .is_some_and(|slot| slot.generation == handle.generation && slot.quads.is_some())
    }

    /// Vertices of the last flush, 4 per quad
    pub fn vertices(&self) -> &[Vertex] {
        &self.staging
    }

    /// Raw bytes of the last flush, ready for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.staging)
    }
}

impl Renderer for Batch {
    fn register(&mut self, vertices: &CubeVertices, tex_coords: &BlockTexCoords) -> DrawHandle {
        let mut quads = Box::new([Vertex { pos: [0.0; 3], uv: [0.0; 2] }; 24]);
        for (i, v) in quads.iter_mut().enumerate() {
            *v = Vertex { pos: vertices[i].to_array(), uv: tex_coords[i] };
        }

        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.quads = Some(quads);
                DrawHandle { index, generation: slot.generation }
            }
            None => {
                self.slots.push(Slot { generation: 0, quads: Some(quads) });
                DrawHandle { index: (self.slots.len() - 1) as u32, generation: 0 }
            }
        }
    }

    fn unregister(&mut self, handle: DrawHandle) {
        let Some(slot) = self.slots.get_mut(handle.index as usize) else {
            tracing::warn!("unregister of unknown draw handle {:?}", handle);
            return;
        };
        if slot.generation != handle.generation || slot.quads.is_none() {
            tracing::warn!("unregister of stale draw handle {:?}", handle);
            return;
        }
        slot.quads = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
    }

    fn flush(&mut self) {
        self.staging.clear();
        self.staging.reserve(self.live * 24);
        for quads in self.slots.iter().filter_map(|s| s.quads.as_deref()) {
            self.staging.extend_from_slice(quads);
        }
        tracing::trace!("flushed {} cubes ({} bytes)", self.live, self.vertex_bytes().len());
    }
}
