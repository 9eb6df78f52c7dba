/// A rendered frame as RGBA8 pixels.
///
/// Frames read back from a [`crate::Surface`] are premultiplied. The `premultiplied` flag makes this
/// explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel bytes.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    /// Straight-alpha pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        let mut out = [px[0], px[1], px[2], px[3]];
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        Some(out)
    }

    /// Pack pixels as `0RGB` words, the layout native window buffers expect.
    pub fn to_0rgb_u32(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.data.chunks_exact(4).map(|px| {
            let mut p = [px[0], px[1], px[2], px[3]];
            if self.premultiplied {
                unpremultiply_rgba8_in_place(&mut p);
            }
            (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2])
        }));
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
