pub mod transform;

pub use transform::{
    camera_matrix, default_translate, placement_matrix, projection_matrix, rotation_matrix,
    view_matrix,
};
