/// Camera uniform buffer data for GPU (`u_Mvp`)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub mvp: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_cols_array(matrix: &[f32; 16]) -> Self {
        Self {
            mvp: glam::Mat4::from_cols_array(matrix).to_cols_array_2d(),
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            mvp: glam::Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

/// Per-draw object matrices for GPU, one dynamic-offset slot per draw call
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub transform: [[f32; 4]; 4],         // u_Transform
    pub default_translate: [[f32; 4]; 4], // u_DefaultTranslate
    pub rotate: [[f32; 4]; 4],            // u_Rotate
}

impl Default for ObjectUniform {
    fn default() -> Self {
        let identity = glam::Mat4::IDENTITY.to_cols_array_2d();
        Self {
            transform: identity,
            default_translate: identity,
            rotate: identity,
        }
    }
}

/// Byte distance between consecutive object slots, rounded up to the device's
/// uniform offset alignment.
pub fn object_slot_stride(min_alignment: u32) -> u64 {
    let size = std::mem::size_of::<ObjectUniform>() as u64;
    let align = min_alignment.max(1) as u64;
    size.div_ceil(align) * align
}
