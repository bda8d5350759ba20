use flow_orrery::data_structures::geometry::{ring, sphere};

use crate::common::test_utils::assert_close;

mod common;

#[test]
fn sphere_has_a_vertex_per_grid_point() {
    let mesh = sphere(16.0, 30, 30);
    assert_eq!(mesh.vertices.len(), 31 * 31);
}

#[test]
fn sphere_poles_emit_one_triangle_per_segment() {
    let mesh = sphere(1.0, 30, 30);
    // two triangles per quad, minus one for each quad touching a pole
    assert_eq!(mesh.triangle_count(), 2 * 30 * 30 - 2 * 30);
}

#[test]
fn sphere_vertices_lie_on_the_surface_with_outward_normals() {
    let radius = 5.8;
    let mesh = sphere(radius, 12, 8);
    for vertex in &mesh.vertices {
        let [x, y, z] = vertex.position;
        let [nx, ny, nz] = vertex.normal;
        assert_close((x * x + y * y + z * z).sqrt(), radius);
        assert_close((nx * nx + ny * ny + nz * nz).sqrt(), 1.0);
        assert_close(nx * radius, x);
        assert_close(ny * radius, y);
        assert_close(nz * radius, z);
    }
}

#[test]
fn sphere_texture_starts_at_the_north_pole() {
    let mesh = sphere(2.0, 4, 4);
    let first = mesh.vertices[0];
    let last = mesh.vertices[mesh.vertices.len() - 1];
    assert_close(first.position[1], 2.0);
    assert_close(first.tex_coords[1], 0.0);
    assert_close(last.position[1], -2.0);
    assert_close(last.tex_coords[1], 1.0);
}

#[test]
fn sphere_indices_stay_in_bounds() {
    let mesh = sphere(1.0, 7, 5);
    let count = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&index| index < count));
    assert_eq!(mesh.indices.len() % 3, 0);
}

#[test]
fn sphere_clamps_degenerate_segment_counts() {
    let mesh = sphere(1.0, 0, 0);
    assert_eq!(mesh.vertices.len(), 4 * 3);
    assert_eq!(mesh.triangle_count(), 2 * 3 * 2 - 2 * 3);
}

#[test]
fn ring_has_an_inner_and_an_outer_row() {
    let mesh = ring(10.0, 20.0, 32);
    assert_eq!(mesh.vertices.len(), 2 * 33);
    assert_eq!(mesh.triangle_count(), 2 * 32);
}

#[test]
fn ring_lies_flat_between_its_radii() {
    let mesh = ring(7.0, 12.0, 32);
    let (inner, outer) = mesh.vertices.split_at(33);
    for vertex in inner {
        let [x, y, z] = vertex.position;
        assert_close((x * x + y * y).sqrt(), 7.0);
        assert_close(z, 0.0);
        assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
    }
    for vertex in outer {
        let [x, y, _] = vertex.position;
        assert_close((x * x + y * y).sqrt(), 12.0);
    }
}

#[test]
fn ring_maps_the_outer_edge_onto_the_texture_border() {
    let mesh = ring(10.0, 20.0, 4);
    // first outer vertex sits at (20, 0)
    let vertex = mesh.vertices[5];
    assert_close(vertex.position[0], 20.0);
    assert_close(vertex.tex_coords[0], 1.0);
    assert_close(vertex.tex_coords[1], 0.5);
    // a quarter turn later it sits at (0, 20), the top of the texture
    let vertex = mesh.vertices[6];
    assert_close(vertex.tex_coords[0], 0.5);
    assert_close(vertex.tex_coords[1], 0.0);
}

#[test]
fn ring_swaps_radii_given_in_the_wrong_order() {
    assert_eq!(ring(20.0, 10.0, 16), ring(10.0, 20.0, 16));
}

#[test]
fn ring_clamps_degenerate_segment_counts() {
    let mesh = ring(1.0, 2.0, 1);
    assert_eq!(mesh.vertices.len(), 2 * 4);
    assert_eq!(mesh.triangle_count(), 6);
}
