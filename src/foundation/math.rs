/// Teleport `v` back into `[0, extent)` when it left the range.
///
/// Falling off the low edge lands just below `extent`; reaching or passing `extent` lands on 0.
/// A non-positive extent has an empty range, so the coordinate is pinned to 0.
pub(crate) fn wrap_coord(v: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    if v < 0.0 {
        extent.next_down()
    } else if v >= extent {
        0.0
    } else {
        v
    }
}

/// Fade-in/fade-out envelope over a particle's life: `max(0, sin(life * pi) * amplitude)`.
pub(crate) fn life_envelope(life: f64, amplitude: f64) -> f64 {
    ((life * std::f64::consts::PI).sin() * amplitude).max(0.0)
}

/// Composite premultiplied RGBA8 `src` over `dst`, pixel by pixel. Extra bytes in the longer
/// buffer are left alone.
pub(crate) fn over_premul_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        match s[3] {
            0 => {}
            255 => d.copy_from_slice(s),
            sa => {
                let inv = 255 - u16::from(sa);
                for (dc, sc) in d.iter_mut().zip(s) {
                    *dc = sc.saturating_add(mul_div255(u16::from(*dc), inv));
                }
            }
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// Inverse of premultiplication for one channel, rounding to nearest.
pub(crate) fn unpremultiply_u8(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
