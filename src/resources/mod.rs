use crate::{
    data_structures::{geometry::MeshData, model},
    resources::texture::{diffuse_layout, load_texture_or},
};

/**
 * This module contains all logic for loading textures from external files and
 * turning generated geometry into GPU models.
 */
pub mod mesh;
pub mod texture;

/// Builds a single-mesh model from generated geometry and one texture file.
///
/// A texture that can't be loaded is replaced by `fallback`, so this never fails.
pub async fn load_textured_model(
    name: &str,
    data: &MeshData,
    texture_file: &str,
    fallback: [u8; 4],
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> model::Model {
    let layout = diffuse_layout(device);
    let diffuse_texture = load_texture_or(texture_file, fallback, device, queue).await;
    let material = model::Material::new(device, texture_file, diffuse_texture, &layout);
    let mesh = mesh::mesh_from_data(device, name, data, 0);

    model::Model {
        meshes: vec![mesh],
        materials: vec![material],
    }
}
