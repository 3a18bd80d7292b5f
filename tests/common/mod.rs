use scene_viewer::core::{Attribute, AttributeLayout, BufferKind, RenderTarget, Uniform};

/// One recorded render target call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(BufferKind, u32),
    Destroy(u32),
    Clear([f32; 4]),
    DepthTest,
    Uniform(Uniform, [f32; 16]),
    Attribute(Attribute, u32),
    Index(u32),
    Draw(u32),
}

/// Render target that records every call instead of touching a GPU.
#[derive(Debug, Default)]
pub struct MockTarget {
    pub calls: Vec<Call>,
    next: u32,
    live: Vec<u32>,
}

#[allow(dead_code)]
impl MockTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_buffers(&self) -> usize {
        self.live.len()
    }

    pub fn draws(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Draw(count) => Some(*count),
                _ => None,
            })
            .collect()
    }

    pub fn uniforms(&self, uniform: Uniform) -> Vec<[f32; 16]> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Uniform(u, m) if *u == uniform => Some(*m),
                _ => None,
            })
            .collect()
    }

    pub fn creates(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Create(..)))
            .count()
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl RenderTarget for MockTarget {
    type Buffer = u32;

    fn create_buffer(&mut self, kind: BufferKind, _contents: &[u8]) -> u32 {
        let id = self.next;
        self.next += 1;
        self.live.push(id);
        self.calls.push(Call::Create(kind, id));
        id
    }

    fn destroy_buffer(&mut self, buffer: u32) {
        self.live.retain(|&id| id != buffer);
        self.calls.push(Call::Destroy(buffer));
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.calls.push(Call::Clear(color));
    }

    fn enable_depth_test(&mut self) {
        self.calls.push(Call::DepthTest);
    }

    fn set_uniform(&mut self, uniform: Uniform, matrix: &[f32; 16]) {
        self.calls.push(Call::Uniform(uniform, *matrix));
    }

    fn bind_attribute(&mut self, attribute: Attribute, buffer: &u32, _layout: AttributeLayout) {
        self.calls.push(Call::Attribute(attribute, *buffer));
    }

    fn bind_index_buffer(&mut self, buffer: &u32) {
        self.calls.push(Call::Index(*buffer));
    }

    fn draw_indexed(&mut self, count: u32) {
        self.calls.push(Call::Draw(count));
    }
}
