use std::collections::HashMap;

use crate::scene::{Figure, FigureId};

use super::render_target::{Attribute, BufferKind, RenderTarget, VEC3_F32_LAYOUT};

/// GPU-resident geometry of one figure.
#[derive(Debug)]
pub struct GeometryBuffers<B> {
    pub positions: B,
    pub colors: B,
    pub indices: B,
    /// Element count for the draw call.
    pub index_count: u32,
}

/// Uploads figure geometry once and keeps it for the figure's lifetime.
///
/// Geometry never changes after a figure is created, so the cache is keyed by
/// [`FigureId`] alone.
#[derive(Debug)]
pub struct GeometryCache<B> {
    entries: HashMap<FigureId, GeometryBuffers<B>>,
    uploads: u64,
}

impl<B> GeometryCache<B> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            uploads: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: FigureId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Total uploads performed since creation.
    pub fn upload_count(&self) -> u64 {
        self.uploads
    }

    /// Returns the buffers for `figure`, uploading them on first use.
    pub fn upload<T>(&mut self, target: &mut T, figure: &Figure) -> &GeometryBuffers<B>
    where
        T: RenderTarget<Buffer = B>,
    {
        let uploads = &mut self.uploads;
        self.entries.entry(figure.id()).or_insert_with(|| {
            *uploads += 1;
            log::debug!(
                "uploading {} {}: {} vertices, {} indices",
                figure.kind(),
                figure.id(),
                figure.vertices().len(),
                figure.indices().len()
            );
            GeometryBuffers {
                positions: target.create_buffer(
                    BufferKind::Vertex,
                    bytemuck::cast_slice(figure.vertices()),
                ),
                colors: target.create_buffer(
                    BufferKind::Vertex,
                    bytemuck::cast_slice(figure.colors()),
                ),
                indices: target.create_buffer(BufferKind::Index, figure.indices()),
                index_count: figure.geometry().index_count(),
            }
        })
    }

    /// Binds the figure's streams and index buffer; returns the draw count.
    pub fn bind<T>(&mut self, target: &mut T, figure: &Figure) -> u32
    where
        T: RenderTarget<Buffer = B>,
    {
        let buffers = self.upload(target, figure);
        target.bind_attribute(Attribute::Position, &buffers.positions, VEC3_F32_LAYOUT);
        target.bind_attribute(Attribute::Color, &buffers.colors, VEC3_F32_LAYOUT);
        target.bind_index_buffer(&buffers.indices);
        buffers.index_count
    }

    /// Destroys buffers of figures no longer in `live`.
    pub fn evict<T>(&mut self, target: &mut T, live: &[FigureId])
    where
        T: RenderTarget<Buffer = B>,
    {
        let stale: Vec<FigureId> = self
            .entries
            .keys()
            .filter(|id| !live.contains(id))
            .copied()
            .collect();

        for id in stale {
            if let Some(buffers) = self.entries.remove(&id) {
                log::debug!("releasing geometry of {}", id);
                target.destroy_buffer(buffers.positions);
                target.destroy_buffer(buffers.colors);
                target.destroy_buffer(buffers.indices);
            }
        }
    }

    /// Destroys every cached buffer.
    pub fn clear<T>(&mut self, target: &mut T)
    where
        T: RenderTarget<Buffer = B>,
    {
        self.evict(target, &[]);
    }
}

impl<B> Default for GeometryCache<B> {
    fn default() -> Self {
        Self::new()
    }
}
