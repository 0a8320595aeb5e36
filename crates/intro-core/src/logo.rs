//! Procedural logo: a solid icosahedron core plus a subdivided wireframe
//! cage at a larger radius, both driven by one spin/breathing transform.

use crate::constants::*;
use glam::{Mat4, Quat, Vec3};
use std::collections::HashMap;

/// Transform shared by the core and the cage: constant two-axis spin with a
/// small sinusoidal breathing scale.
pub fn logo_transform(elapsed: f32) -> Mat4 {
    let rotation = Quat::from_euler(
        glam::EulerRot::XYZ,
        elapsed * LOGO_SPIN_X,
        elapsed * LOGO_SPIN_Y,
        0.0,
    );
    let scale = 1.0 + (elapsed * LOGO_BREATH_FREQUENCY).sin() * LOGO_BREATH_AMPLITUDE;
    Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, Vec3::ZERO)
}

pub fn logo_scale(elapsed: f32) -> f32 {
    1.0 + (elapsed * LOGO_BREATH_FREQUENCY).sin() * LOGO_BREATH_AMPLITUDE
}

/// Triangle mesh on a sphere.
pub struct SphereMesh {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

impl SphereMesh {
    /// The 12-vertex, 20-face icosahedron scaled to `radius`.
    pub fn icosahedron(radius: f32) -> Self {
        let t = (1.0 + 5.0f32.sqrt()) / 2.0;
        let raw: [[f32; 3]; 12] = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ];
        let vertices = raw
            .iter()
            .map(|v| {
                let p = Vec3::from_array(*v).normalize() * radius;
                p.to_array()
            })
            .collect();
        let triangles = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];
        Self { vertices, triangles }
    }

    /// Split every triangle into four, projecting new vertices back onto the
    /// sphere. Midpoints are cached so shared edges stay shared.
    pub fn subdivided(&self, radius: f32) -> Self {
        let mut vertices = self.vertices.clone();
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut triangles = Vec::with_capacity(self.triangles.len() * 4);

        let mut midpoint = |a: u32, b: u32, vertices: &mut Vec<[f32; 3]>| -> u32 {
            let key = if a < b { (a, b) } else { (b, a) };
            if let Some(&idx) = midpoints.get(&key) {
                return idx;
            }
            let pa = Vec3::from_array(vertices[a as usize]);
            let pb = Vec3::from_array(vertices[b as usize]);
            let m = ((pa + pb) * 0.5).normalize() * radius;
            let idx = vertices.len() as u32;
            vertices.push(m.to_array());
            midpoints.insert(key, idx);
            idx
        };

        for &[a, b, c] in &self.triangles {
            let ab = midpoint(a, b, &mut vertices);
            let bc = midpoint(b, c, &mut vertices);
            let ca = midpoint(c, a, &mut vertices);
            triangles.push([a, ab, ca]);
            triangles.push([b, bc, ab]);
            triangles.push([c, ca, bc]);
            triangles.push([ab, bc, ca]);
        }
        Self { vertices, triangles }
    }

    /// Unique undirected edges, for the wireframe cage's line list.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut seen: HashMap<(u32, u32), ()> = HashMap::new();
        let mut edges = Vec::new();
        for &[a, b, c] in &self.triangles {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let key = if u < v { (u, v) } else { (v, u) };
                if seen.insert(key, ()).is_none() {
                    edges.push([key.0, key.1]);
                }
            }
        }
        edges
    }

    /// Flattened triangle indices for an index buffer.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flat_map(|t| t.iter().copied()).collect()
    }
}

/// The solid core and the wireframe cage, generated once per run.
pub struct LogoGeometry {
    pub core: SphereMesh,
    pub cage: SphereMesh,
    pub cage_edges: Vec<[u32; 2]>,
}

impl LogoGeometry {
    pub fn new() -> Self {
        let core = SphereMesh::icosahedron(LOGO_CORE_RADIUS);
        let cage = SphereMesh::icosahedron(LOGO_CAGE_RADIUS).subdivided(LOGO_CAGE_RADIUS);
        let cage_edges = cage.edges();
        Self { core, cage, cage_edges }
    }
}

impl Default for LogoGeometry {
    fn default() -> Self {
        Self::new()
    }
}
