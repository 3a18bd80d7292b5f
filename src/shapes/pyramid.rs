use crate::scene::Geometry;

/// Square pyramid: four sides and a two-triangle base.
pub fn pyramid() -> Geometry {
    let apex = [0.0, 0.5, 0.0];
    let base_y = -0.5;
    let half = 0.5;

    let vertices = vec![
        apex,
        [-half, base_y, half],  // front-left
        [half, base_y, half],   // front-right
        [half, base_y, -half],  // back-right
        [-half, base_y, -half], // back-left
    ];

    let colors = vec![
        [1.0, 0.85, 0.2],
        [0.9, 0.2, 0.2],
        [0.2, 0.8, 0.3],
        [0.2, 0.4, 0.9],
        [0.8, 0.3, 0.8],
    ];

    let indices = vec![
        0, 1, 2, // front
        0, 2, 3, // right
        0, 3, 4, // back
        0, 4, 1, // left
        1, 4, 3, // base
        1, 3, 2,
    ];

    Geometry {
        vertices,
        colors,
        indices,
    }
}
