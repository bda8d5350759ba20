use wgpu::util::DeviceExt;

use crate::data_structures::{geometry::MeshData, model};

/**
 * Uploads generated geometry into vertex and index buffers.
 *
 * `material` is the index into the materials of the model the mesh ends up in.
 */
pub fn mesh_from_data(
    device: &wgpu::Device,
    name: &str,
    data: &MeshData,
    material: usize,
) -> model::Mesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Vertex Buffer", name)),
        contents: bytemuck::cast_slice(&data.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Index Buffer", name)),
        contents: bytemuck::cast_slice(&data.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    model::Mesh {
        name: name.to_string(),
        vertex_buffer,
        index_buffer,
        num_elements: data.indices.len() as u32,
        material,
    }
}
