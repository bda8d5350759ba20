use anyhow::Context as _;

use crate::data_structures::texture;

pub fn diffuse_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("Model texture_bind_group_layout"),
    })
}

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().context("No browser window available")?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| anyhow::anyhow!("Could not read the page origin"))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

/// Reads an asset relative to `./assets` (or `<origin>/assets` in the browser).
pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.bytes().await?.to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("Could not read {}", path.display()))?
    };

    Ok(data)
}

pub async fn load_image(file_name: &str) -> anyhow::Result<image::DynamicImage> {
    let data = load_binary(file_name).await?;
    image::load_from_memory(&data).with_context(|| format!("Could not decode {file_name}"))
}

pub async fn load_texture(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(file_name).await?;
    texture::Texture::from_bytes(device, queue, &data, file_name)
}

/// Like [`load_image`] but never fails: a missing or broken file is replaced
/// by a 1x1 image of `fallback`.
pub async fn load_image_or(file_name: &str, fallback: [u8; 4]) -> image::DynamicImage {
    match load_image(file_name).await {
        Ok(img) => img,
        Err(e) => {
            log::warn!("Using a plain colour for {file_name}: {e:#}");
            plain_image(fallback)
        }
    }
}

/// Like [`load_texture`] but never fails, see [`load_image_or`].
pub async fn load_texture_or(
    file_name: &str,
    fallback: [u8; 4],
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> texture::Texture {
    let img = load_image_or(file_name, fallback).await;
    texture::Texture::from_image(device, queue, &img, Some(file_name))
}

/// Loads six images (+X, -X, +Y, -Y, +Z, -Z) into a cube map.
///
/// Faces that cannot be loaded are filled with `fallback`.
pub async fn load_cube_texture(
    file_names: [&str; 6],
    fallback: [u8; 4],
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> texture::Texture {
    let loaded =
        futures::future::join_all(file_names.iter().map(|name| load_image_or(name, fallback)))
            .await;
    let mut faces = loaded.into_iter();
    let faces: [image::DynamicImage; 6] =
        std::array::from_fn(|_| faces.next().unwrap_or_else(|| plain_image(fallback)));
    texture::Texture::create_cube(device, queue, &faces, "cube map")
}

/// A single pixel of `rgba`.
pub fn plain_image(rgba: [u8; 4]) -> image::DynamicImage {
    image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(1, 1, image::Rgba(rgba)))
}
