//! Color helpers shared by the ornament palettes and the tiny-light shimmer

use super::Vec3;

/// HSL to RGB conversion, all channels in [0, 1]. Hue wraps.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Vec3::splat(l);
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Vec3::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Parse `#rrggbb` (leading `#` optional) into a 0..1 RGB triple
pub fn parse_hex_color(hex: &str) -> Option<Vec3> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };

    Some(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primaries() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((red.x - 1.0).abs() < 0.001);
        assert!(red.y.abs() < 0.001);
        assert!(red.z.abs() < 0.001);

        let green = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5);
        assert!((green.y - 1.0).abs() < 0.001);
        assert!(green.x.abs() < 0.001);
    }

    #[test]
    fn test_hsl_warm_gold_is_warm() {
        let gold = hsl_to_rgb(0.1, 0.8, 0.6);
        assert!(gold.x > gold.y && gold.y > gold.z);
    }

    #[test]
    fn test_hsl_grey_without_saturation() {
        assert_eq!(hsl_to_rgb(0.7, 0.0, 0.25), Vec3::splat(0.25));
    }

    #[test]
    fn test_parse_hex() {
        let gold = parse_hex_color("#FFD700").unwrap();
        assert!((gold.x - 1.0).abs() < 0.001);
        assert!((gold.y - 215.0 / 255.0).abs() < 0.001);
        assert_eq!(gold.z, 0.0);

        assert!(parse_hex_color("0d4a3a").is_some());
        assert!(parse_hex_color("#FFD70").is_none());
        assert!(parse_hex_color("#GGGGGG").is_none());
    }
}
