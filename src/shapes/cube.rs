use crate::scene::Geometry;

const HALF: f32 = 0.5;

/// Unit cube centred on the origin, one color per corner.
//    v6----- v5
//   /|      /|
//  v1------v0|
//  | |     | |
//  | |v7---|-|v4
//  |/      |/
//  v2------v3
pub fn cube() -> Geometry {
    let vertices = vec![
        [HALF, HALF, HALF],    // v0
        [-HALF, HALF, HALF],   // v1
        [-HALF, -HALF, HALF],  // v2
        [HALF, -HALF, HALF],   // v3
        [HALF, -HALF, -HALF],  // v4
        [HALF, HALF, -HALF],   // v5
        [-HALF, HALF, -HALF],  // v6
        [-HALF, -HALF, -HALF], // v7
    ];

    let colors = vec![
        [1.0, 1.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 1.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 0.0],
    ];

    let indices = vec![
        0, 1, 2, 0, 2, 3, // front
        0, 3, 4, 0, 4, 5, // right
        0, 5, 6, 0, 6, 1, // top
        1, 6, 7, 1, 7, 2, // left
        7, 4, 3, 7, 3, 2, // bottom
        4, 7, 6, 4, 6, 5, // back
    ];

    Geometry {
        vertices,
        colors,
        indices,
    }
}
