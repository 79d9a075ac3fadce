// Heat value -> color. Cold is blue, hot is red, sweeping the hue wheel
// from 240° down to 0° at full saturation and half lightness.

/// HSL to 8-bit RGB. `hue` in degrees (wrapped), `saturation`/`lightness` in [0, 1].
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [u8; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    [to_u8(r + m), to_u8(g + m), to_u8(b + m)]
}

#[inline]
fn to_u8(c: f32) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Hue for a heat value: 240° (blue) at 0, 0° (red) at 1.
#[inline]
pub fn heat_hue(value: f32) -> f32 {
    (1.0 - value.clamp(0.0, 1.0)) * 240.0
}

/// RGBA bytes for a heat value. Alpha tracks the value, so untouched cells
/// are fully transparent.
pub fn heat_rgba(value: f32) -> [u8; 4] {
    let v = value.clamp(0.0, 1.0);
    let [r, g, b] = hsl_to_rgb(heat_hue(v), 1.0, 0.5);
    [r, g, b, to_u8(v)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), [255, 0, 0]);
        assert_eq!(hsl_to_rgb(60.0, 1.0, 0.5), [255, 255, 0]);
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), [0, 255, 0]);
        assert_eq!(hsl_to_rgb(180.0, 1.0, 0.5), [0, 255, 255]);
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), [0, 0, 255]);
        assert_eq!(hsl_to_rgb(300.0, 1.0, 0.5), [255, 0, 255]);
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), [255, 0, 0]);
    }

    #[test]
    fn grey_and_extremes_of_lightness() {
        assert_eq!(hsl_to_rgb(123.0, 0.0, 0.5), [128, 128, 128]);
        assert_eq!(hsl_to_rgb(10.0, 1.0, 0.0), [0, 0, 0]);
        assert_eq!(hsl_to_rgb(10.0, 1.0, 1.0), [255, 255, 255]);
    }

    #[test]
    fn cold_is_transparent_blue() {
        assert_eq!(heat_rgba(0.0), [0, 0, 255, 0]);
    }

    #[test]
    fn hot_is_opaque_red() {
        assert_eq!(heat_hue(1.0), 0.0);
        assert_eq!(heat_rgba(1.0), [255, 0, 0, 255]);
    }

    #[test]
    fn midpoint_is_green() {
        // v = 0.5 -> hue 120°
        assert_eq!(heat_rgba(0.5), [0, 255, 0, 128]);
    }

    #[test]
    fn alpha_is_monotonic() {
        let mut last = 0;
        for i in 0..=100 {
            let a = heat_rgba(i as f32 / 100.0)[3];
            assert!(a >= last);
            last = a;
        }
        assert_eq!(last, 255);
    }
}
