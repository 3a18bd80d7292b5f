/// Named matrix uniforms of the scene shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniform {
    /// `u_Mvp`: projection * view.
    Mvp,
    /// `u_Transform`: per-object translate * scale.
    Transform,
    /// `u_DefaultTranslate`: per-object placement snapshot.
    DefaultTranslate,
    /// `u_Rotate`: per-object rotation.
    Rotate,
}

impl Uniform {
    pub const fn name(self) -> &'static str {
        match self {
            Uniform::Mvp => "u_Mvp",
            Uniform::Transform => "u_Transform",
            Uniform::DefaultTranslate => "u_DefaultTranslate",
            Uniform::Rotate => "u_Rotate",
        }
    }
}

/// Vertex attribute streams of the scene shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// `a_Position`, shader location 0.
    Position,
    /// `a_Color`, shader location 1.
    Color,
}

impl Attribute {
    pub const fn name(self) -> &'static str {
        match self {
            Attribute::Position => "a_Position",
            Attribute::Color => "a_Color",
        }
    }

    pub const fn location(self) -> u32 {
        match self {
            Attribute::Position => 0,
            Attribute::Color => 1,
        }
    }
}

/// How one attribute is read from its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    /// Components per vertex.
    pub components: u32,
    /// Bytes per component.
    pub component_size: u32,
    pub stride: u64,
    pub offset: u64,
}

/// Three tightly packed f32 per vertex, one buffer per attribute.
pub const VEC3_F32_LAYOUT: AttributeLayout = AttributeLayout {
    components: 3,
    component_size: 4,
    stride: 12,
    offset: 0,
};

/// Buffer binding target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Per-vertex attribute data.
    Vertex,
    /// 8-bit triangle-list indices.
    Index,
}

/// GPU collaborator driven by the render loop.
///
/// Calls arrive in tick order: clear, depth test, camera uniform, then per
/// figure: attribute and index bindings, the three object uniforms and one
/// draw. Matrices are column-major.
pub trait RenderTarget {
    /// Handle to a GPU buffer owned by the target.
    type Buffer;

    /// Allocates a buffer and uploads `contents`.
    fn create_buffer(&mut self, kind: BufferKind, contents: &[u8]) -> Self::Buffer;

    /// Releases a buffer created by this target.
    fn destroy_buffer(&mut self, buffer: Self::Buffer);

    /// Clears color and depth.
    fn clear(&mut self, color: [f32; 4]);

    fn enable_depth_test(&mut self);

    fn set_uniform(&mut self, uniform: Uniform, matrix: &[f32; 16]);

    fn bind_attribute(&mut self, attribute: Attribute, buffer: &Self::Buffer, layout: AttributeLayout);

    fn bind_index_buffer(&mut self, buffer: &Self::Buffer);

    /// Draws `count` triangle-list elements from the bound 8-bit indices.
    fn draw_indexed(&mut self, count: u32);
}
