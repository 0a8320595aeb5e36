// Procedural logo geometry and motion.

use intro_core::constants::*;
use intro_core::logo::{logo_scale, logo_transform, LogoGeometry, SphereMesh};

#[test]
fn icosahedron_has_the_canonical_counts() {
    let mesh = SphereMesh::icosahedron(1.0);
    assert_eq!(mesh.vertices.len(), 12);
    assert_eq!(mesh.triangles.len(), 20);
    assert_eq!(mesh.edges().len(), 30);
    assert_eq!(mesh.indices().len(), 60);
}

#[test]
fn every_vertex_sits_on_the_requested_sphere() {
    for radius in [LOGO_CORE_RADIUS, LOGO_CAGE_RADIUS] {
        let mesh = SphereMesh::icosahedron(radius).subdivided(radius);
        for v in &mesh.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - radius).abs() < 1e-4, "vertex at radius {r}, wanted {radius}");
        }
    }
}

#[test]
fn one_subdivision_quadruples_the_faces_and_shares_midpoints() {
    let base = SphereMesh::icosahedron(1.0);
    let fine = base.subdivided(1.0);
    assert_eq!(fine.triangles.len(), 80);
    // Shared midpoints: V = 12 + one new vertex per original edge (30)
    assert_eq!(fine.vertices.len(), 42);
    // Euler characteristic of a sphere: V - E + F = 2
    let e = fine.edges().len();
    assert_eq!(42 - e as i64 + 80, 2);
}

#[test]
fn edge_list_has_no_duplicates_in_either_direction() {
    let mesh = SphereMesh::icosahedron(1.0).subdivided(1.0);
    let edges = mesh.edges();
    for (i, [a, b]) in edges.iter().enumerate() {
        assert!(a < b, "edge not stored in canonical order");
        for [c, d] in &edges[i + 1..] {
            assert!(!(a == c && b == d), "duplicate edge {a}-{b}");
        }
    }
}

#[test]
fn all_triangle_indices_are_in_range() {
    let mesh = SphereMesh::icosahedron(1.0).subdivided(1.0);
    let n = mesh.vertices.len() as u32;
    for idx in mesh.indices() {
        assert!(idx < n);
    }
}

#[test]
fn geometry_builds_core_and_cage_at_their_radii() {
    let geometry = LogoGeometry::new();
    let r0 = geometry.core.vertices[0];
    let core_r = (r0[0] * r0[0] + r0[1] * r0[1] + r0[2] * r0[2]).sqrt();
    assert!((core_r - LOGO_CORE_RADIUS).abs() < 1e-4);
    // The cage is the subdivided shell with its own edge list
    assert_eq!(geometry.cage.triangles.len(), 80);
    assert_eq!(geometry.cage_edges.len(), geometry.cage.edges().len());
}

#[test]
fn transform_spins_steadily_and_breathes_within_bounds() {
    for i in 0..600 {
        let t = i as f32 * 0.02;
        let s = logo_scale(t);
        assert!(s >= 1.0 - LOGO_BREATH_AMPLITUDE - 1e-6);
        assert!(s <= 1.0 + LOGO_BREATH_AMPLITUDE + 1e-6);
        let m = logo_transform(t);
        // Rotation plus uniform scale: columns keep the breathing length
        let len = m.x_axis.truncate().length();
        assert!((len - s).abs() < 1e-4);
        assert_eq!(m.w_axis.truncate(), glam::Vec3::ZERO);
    }
}
