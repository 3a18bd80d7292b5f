/// `steps` evenly spaced hues around the color wheel, starting at red.
pub fn hue_ramp(steps: usize, saturation: f32, value: f32) -> impl Iterator<Item = [f32; 3]> {
    (0..steps).map(move |i| hsv(i as f32 / steps as f32, saturation, value))
}

/// HSV to RGB with `hue` in turns, so 1.0 wraps back to red.
fn hsv(hue: f32, saturation: f32, value: f32) -> [f32; 3] {
    let channel = |n: f32| {
        let k = (n + hue.rem_euclid(1.0) * 6.0) % 6.0;
        value - value * saturation * k.min(4.0 - k).clamp(0.0, 1.0)
    };
    [channel(5.0), channel(3.0), channel(1.0)]
}
