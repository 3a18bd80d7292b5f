use std::f32::consts::TAU;

use crate::scene::Geometry;

use super::palette::hue_ramp;

/// Number of rim vertices. Rim plus apex and base centre must stay within
/// the 8-bit index range.
pub const CONE_SEGMENTS: usize = 32;

const APEX: u8 = 0;
const BASE_CENTER: u8 = 1;
const RIM_START: usize = 2;

/// Cone with its apex on +Y and a closed base.
pub fn cone() -> Geometry {
    let radius = 0.5;
    let base_y = -0.5;

    let rim = (0..CONE_SEGMENTS).map(|i| {
        let theta = i as f32 / CONE_SEGMENTS as f32 * TAU;
        [radius * theta.cos(), base_y, radius * theta.sin()]
    });

    let vertices: Vec<[f32; 3]> = [[0.0, 0.5, 0.0], [0.0, base_y, 0.0]]
        .into_iter()
        .chain(rim)
        .collect();

    let colors: Vec<[f32; 3]> = [[1.0, 1.0, 1.0], [0.3, 0.3, 0.3]]
        .into_iter()
        .chain(hue_ramp(CONE_SEGMENTS, 0.7, 0.9))
        .collect();

    let indices = (0..CONE_SEGMENTS)
        .flat_map(|i| {
            let current = (RIM_START + i) as u8;
            let next = (RIM_START + (i + 1) % CONE_SEGMENTS) as u8;
            // side faces outward, base faces down
            [APEX, next, current, BASE_CENTER, current, next]
        })
        .collect();

    Geometry {
        vertices,
        colors,
        indices,
    }
}
