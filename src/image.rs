use bytemuck::{Pod, Zeroable};

use crate::vec3::{Vec3, EPS};

/// An unclamped, pre-quantization `height x width` buffer of floating point RGB pixels. Values
/// may exceed `1.0` until `postprocess` runs. Each pixel also carries a miss flag: a ray that
/// hit nothing is recorded as a miss so the post-processing curves below can leave it at the
/// raw background color instead of running it through the tone-mapping/gamma formulas meant for
/// actual radiance samples.
#[derive(Debug, Clone)]
pub struct FloatImage {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
    misses: Vec<bool>,
}

impl FloatImage {
    pub fn new(width: u32, height: u32) -> FloatImage {
        let len = (width as usize) * (height as usize);
        FloatImage {
            width,
            height,
            pixels: vec![Vec3::zero(); len],
            misses: vec![false; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, value: Vec3) {
        let i = self.index(x, y);
        self.pixels[i] = value;
        self.misses[i] = false;
    }

    /// Replaces an entire row in one shot; used by the scanline-parallel render driver, whose
    /// workers each own a disjoint row range and never need to synchronize with each other. Each
    /// entry is the pixel's color alongside whether the primary ray missed every object.
    pub fn set_row(&mut self, y: u32, row: &[(Vec3, bool)]) {
        let start = self.index(0, y);
        for (offset, &(color, is_miss)) in row.iter().enumerate() {
            self.pixels[start + offset] = color;
            self.misses[start + offset] = is_miss;
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Largest channel value among pixels that actually hit something. Miss pixels hold the raw
    /// background color, which has nothing to do with the scene's radiance and would otherwise
    /// skew the tone-mapping curve.
    fn max_hit_component(&self) -> f64 {
        self.pixels
            .iter()
            .zip(&self.misses)
            .filter(|(_, &is_miss)| !is_miss)
            .fold(0.0_f64, |acc, (p, _)| acc.max(p.max_component()))
    }

    /// Extended Reinhard tone mapping: `p <- p * (1 + p/L^2) / (1 + p)` where `L` is the maximum
    /// hit-pixel component across the image. Miss pixels are left untouched (they already hold
    /// `background` verbatim). If every hit pixel is (near) black, the whole image collapses to
    /// `background` instead, since the curve has nothing meaningful to scale against.
    pub fn tone_map(&mut self, background: Vec3) {
        let scale = self.max_hit_component();
        if scale < EPS {
            self.pixels.fill(background);
            self.misses.fill(true);
            return;
        }
        let scale2 = scale * scale;
        for (p, &is_miss) in self.pixels.iter_mut().zip(&self.misses) {
            if is_miss {
                continue;
            }
            *p = Vec3::new(
                tone_map_channel(p.x, scale2),
                tone_map_channel(p.y, scale2),
                tone_map_channel(p.z, scale2),
            );
        }
    }

    /// Raises every hit pixel's channels to `1/gamma`, leaving miss pixels at the raw background
    /// color. Skipped entirely if every hit pixel is (near) black, since `0 ^ (1/gamma) == 0`
    /// anyway and this avoids a `powf` call on every pixel of a render with nothing bright in it.
    pub fn gamma_correct(&mut self, gamma: f64) {
        if self.max_hit_component() <= EPS {
            return;
        }
        let inv_gamma = 1.0 / gamma;
        for (p, &is_miss) in self.pixels.iter_mut().zip(&self.misses) {
            if is_miss {
                continue;
            }
            *p = Vec3::new(
                p.x.powf(inv_gamma),
                p.y.powf(inv_gamma),
                p.z.powf(inv_gamma),
            );
        }
    }

    pub fn postprocess(&mut self, background: Vec3, gamma: f64) {
        self.tone_map(background);
        self.gamma_correct(gamma);
    }

    /// Clamps to `[0, 1]`, scales by `255`, clamps to `[0, 255]`, rounds to the nearest `u8`.
    pub fn quantize(&self) -> ByteImage {
        let pixels = self
            .pixels
            .iter()
            .map(|p| Pixel {
                r: quantize_channel(p.x),
                g: quantize_channel(p.y),
                b: quantize_channel(p.z),
            })
            .collect();

        ByteImage {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

fn tone_map_channel(p: f64, scale2: f64) -> f64 {
    p * (1.0 + p / scale2) / (1.0 + p)
}

fn quantize_channel(p: f64) -> u8 {
    (p.clamp(0.0, 1.0) * 255.0).round().clamp(0.0, 255.0) as u8
}

#[derive(Copy, Clone, Pod, Zeroable)]
#[repr(C)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The final, quantized `height x width x 3` raster, ready to hand to an image encoder.
#[derive(Debug, Clone)]
pub struct ByteImage {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl ByteImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let p = self.pixels[(y as usize) * (self.width as usize) + (x as usize)];
        (p.r, p.g, p.b)
    }

    /// Row-major RGB bytes, suitable for `image::save_buffer` with `ColorType::Rgb8`.
    pub fn as_rgb_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
