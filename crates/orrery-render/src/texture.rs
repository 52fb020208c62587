//! Texture loading and upload
//!
//! Body textures decode on a background thread and arrive over a
//! channel; the renderer polls each frame and swaps the body's bind
//! group when its texture shows up. Until then every body renders with
//! a 1×1 fallback of its base color, so a missing or broken file never
//! removes a body from the scene.

use image::RgbaImage;
use orrery_sim::{Body, Moon};
use rand::prelude::*;
use std::path::PathBuf;
use std::sync::mpsc;

const TEXTURE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Which scene object a texture belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Body(Body),
    Moon(Moon),
}

impl TextureKey {
    /// File stem looked up in the texture directory
    pub fn file_stem(&self) -> String {
        match self {
            TextureKey::Body(body) => body.name().to_lowercase(),
            TextureKey::Moon(moon) => moon.name().to_lowercase(),
        }
    }

    fn all() -> Vec<TextureKey> {
        let mut keys: Vec<TextureKey> = Body::all().iter().map(|b| TextureKey::Body(*b)).collect();
        keys.extend(Moon::all().iter().map(|m| TextureKey::Moon(*m)));
        keys
    }
}

/// A decoded texture ready for upload
pub struct LoadedTexture {
    pub key: TextureKey,
    pub image: RgbaImage,
}

/// Receives decoded textures from the loader thread
pub struct TextureStore {
    rx: Option<mpsc::Receiver<LoadedTexture>>,
}

impl TextureStore {
    /// Start the background loader. With no texture directory there is
    /// nothing to load and `poll` never yields.
    pub fn start(texture_dir: Option<PathBuf>) -> Self {
        let Some(dir) = texture_dir else {
            return Self { rx: None };
        };

        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            for key in TextureKey::all() {
                let stem = key.file_stem();
                let Some(path) = TEXTURE_EXTENSIONS
                    .iter()
                    .map(|ext| dir.join(format!("{stem}.{ext}")))
                    .find(|p| p.exists())
                else {
                    tracing::debug!("no texture for {stem}, keeping base color");
                    continue;
                };

                match image::open(&path) {
                    Ok(img) => {
                        tracing::info!("loaded texture {}", path.display());
                        if tx
                            .send(LoadedTexture {
                                key,
                                image: img.to_rgba8(),
                            })
                            .is_err()
                        {
                            // Renderer gone; stop decoding
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("failed to decode {}: {}", path.display(), e);
                    }
                }
            }
        });

        Self { rx: Some(rx) }
    }

    /// Drain every texture that has finished decoding
    pub fn poll(&mut self) -> Vec<LoadedTexture> {
        let Some(rx) = &self.rx else {
            return Vec::new();
        };

        let mut loaded = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(texture) => loaded.push(texture),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.rx = None;
                    break;
                }
            }
        }
        loaded
    }
}

/// Upload an RGBA image and return its view
pub fn upload_rgba(device: &wgpu::Device, queue: &wgpu::Queue, image: &RgbaImage) -> wgpu::TextureView {
    let (width, height) = image.dimensions();
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Scene Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// A 1×1 texture of a flat color, the fallback for untextured bodies
pub fn solid_color_view(device: &wgpu::Device, queue: &wgpu::Queue, color: [f32; 3]) -> wgpu::TextureView {
    let pixel = [
        (color[0].clamp(0.0, 1.0) * 255.0) as u8,
        (color[1].clamp(0.0, 1.0) * 255.0) as u8,
        (color[2].clamp(0.0, 1.0) * 255.0) as u8,
        255,
    ];
    let image = RgbaImage::from_raw(1, 1, pixel.to_vec()).unwrap_or_else(|| RgbaImage::new(1, 1));
    upload_rgba(device, queue, &image)
}

/// Procedural radial band strip for a ring system: a 256×1 texture
/// sampled by the ring's radial UV, with seeded alpha banding.
pub fn ring_band_image(tint: [f32; 3], seed: u64) -> RgbaImage {
    const WIDTH: u32 = 256;
    let mut rng = StdRng::seed_from_u64(seed);

    // A few smooth band envelopes summed over the radial span
    let bands: Vec<(f32, f32, f32)> = (0..6)
        .map(|_| {
            (
                rng.gen::<f32>(),             // center
                0.03 + rng.gen::<f32>() * 0.1, // width
                0.4 + rng.gen::<f32>() * 0.6,  // strength
            )
        })
        .collect();

    let mut data = Vec::with_capacity((WIDTH * 4) as usize);
    for x in 0..WIDTH {
        let u = x as f32 / (WIDTH - 1) as f32;

        let mut alpha: f32 = 0.12;
        for (center, width, strength) in &bands {
            let d = (u - center) / width;
            alpha += strength * (-d * d).exp() * 0.5;
        }
        // Fade both edges of the annulus
        alpha *= (u * 8.0).min(1.0) * ((1.0 - u) * 8.0).min(1.0);
        let alpha = alpha.clamp(0.0, 0.85);

        let shade = 0.75 + 0.25 * alpha;
        data.push((tint[0] * shade * 255.0) as u8);
        data.push((tint[1] * shade * 255.0) as u8);
        data.push((tint[2] * shade * 255.0) as u8);
        data.push((alpha * 255.0) as u8);
    }

    RgbaImage::from_raw(WIDTH, 1, data).unwrap_or_else(|| RgbaImage::new(WIDTH, 1))
}

pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Scene Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_without_dir_is_idle() {
        let mut store = TextureStore::start(None);
        assert!(store.poll().is_empty());
        assert!(store.poll().is_empty());
    }

    #[test]
    fn test_store_with_empty_dir_drains() {
        let dir = std::env::temp_dir().join("orrery-test-textures-empty");
        let _ = std::fs::create_dir_all(&dir);

        let mut store = TextureStore::start(Some(dir));
        // Loader finds nothing; eventually the channel disconnects
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            let loaded = store.poll();
            assert!(loaded.is_empty());
            if store.rx.is_none() || std::time::Instant::now() > deadline {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
    }

    #[test]
    fn test_key_file_stems() {
        assert_eq!(TextureKey::Body(Body::Earth).file_stem(), "earth");
        assert_eq!(TextureKey::Moon(Moon::Io).file_stem(), "io");
        // One key per body and moon
        assert_eq!(TextureKey::all().len(), Body::all().len() + Moon::all().len());
    }

    #[test]
    fn test_ring_band_image_shape() {
        let image = ring_band_image([0.8, 0.7, 0.5], 42);
        assert_eq!(image.dimensions(), (256, 1));

        // Edges fade out
        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(image.get_pixel(255, 0)[3], 0);

        // Some interior band is visible
        let max_alpha = (0..256).map(|x| image.get_pixel(x, 0)[3]).max().unwrap();
        assert!(max_alpha > 40);
    }

    #[test]
    fn test_ring_band_deterministic() {
        let a = ring_band_image([0.8, 0.7, 0.5], 7);
        let b = ring_band_image([0.8, 0.7, 0.5], 7);
        assert_eq!(a.as_raw(), b.as_raw());
    }
}
