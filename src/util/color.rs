//! sRGB color helpers.

/// Split a `0xRRGGBB` integer into sRGB channels in `[0, 1]`.
#[must_use]
pub fn srgb_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Decode one sRGB channel to linear light.
#[must_use]
pub fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Decode an sRGB triplet to linear light.
#[must_use]
pub fn srgb_to_linear(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(srgb_channel_to_linear)
}

/// Linear-light color of a `0xRRGGBB` integer scaled by `intensity`.
#[must_use]
pub fn linear_from_hex(hex: u32, intensity: f32) -> [f32; 3] {
    srgb_to_linear(srgb_from_hex(hex)).map(|c| c * intensity)
}
