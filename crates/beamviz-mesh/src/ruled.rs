//! Ruled surface between consecutive cross-sections.

use beamviz_math::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::QuadMesh;

/// Stitch cross-sections into a quad mesh.
///
/// `sections[i][j]` is point `j` of slice `i`. For each pair of consecutive
/// slices and each point `j`, a quad connects
/// `(i, j) -> (i, j+1) -> (i+1, j+1) -> (i+1, j)` with `j+1` wrapping to 0.
///
/// With `closed == false` the wrapping quad (`j = P - 1`) is left out so
/// the surface is an open ribbon rather than a tube.
///
/// # Returns
///
/// A mesh whose vertex buffer is the flattened input and which has
/// `P * (N - 1)` faces when closed and `(P - 1) * (N - 1)` when open.
/// Fewer than two slices give no faces.
///
/// # Errors
///
/// Returns an error if the slices have different point counts.
pub fn ruled_surface(sections: &[Vec<Point3>], closed: bool) -> Result<QuadMesh> {
    let points_per_poly = sections.first().map_or(0, Vec::len);
    for (i, section) in sections.iter().enumerate().skip(1) {
        if section.len() != points_per_poly {
            return Err(MeshError::MismatchedPointCounts {
                slice: i,
                expected: points_per_poly,
                found: section.len(),
            });
        }
    }

    let mut mesh = QuadMesh::new();
    for section in sections {
        mesh.push_points(section);
    }
    mesh.faces = strip_faces(sections.len(), points_per_poly, closed);

    log::debug!(
        "ruled surface: {} slices x {} points -> {} faces",
        sections.len(),
        points_per_poly,
        mesh.num_faces()
    );
    Ok(mesh)
}

/// Same as [`ruled_surface`] for a flat `[x0, y0, z0, x1, ...]` buffer.
///
/// The buffer holds `num_slices * points_per_poly` points of dimension `dim`,
/// slice by slice.
pub fn ruled_surface_from_flat(
    coords: &[f64],
    dim: usize,
    points_per_poly: usize,
    closed: bool,
) -> Result<QuadMesh> {
    if dim != 3 {
        return Err(MeshError::NotThreeDimensional(dim));
    }
    let slice_len = dim * points_per_poly;
    if slice_len == 0 || coords.len() % slice_len != 0 {
        return Err(MeshError::FlatLengthMismatch {
            len: coords.len(),
            dim,
            points_per_poly,
        });
    }
    let sections: Vec<Vec<Point3>> = coords
        .chunks_exact(slice_len)
        .map(|slice| {
            slice
                .chunks_exact(3)
                .map(|p| Point3::new(p[0], p[1], p[2]))
                .collect()
        })
        .collect();
    ruled_surface(&sections, closed)
}

/// Quad indices for a strip of `num_slices` rings of `points_per_poly` points.
pub fn strip_faces(num_slices: usize, points_per_poly: usize, closed: bool) -> Vec<[u32; 4]> {
    if num_slices < 2 || points_per_poly == 0 {
        return Vec::new();
    }
    let ring_faces = if closed {
        points_per_poly
    } else {
        points_per_poly - 1
    };
    let mut faces = Vec::with_capacity(ring_faces * (num_slices - 1));

    for slice in 0..num_slices - 1 {
        let base = slice * points_per_poly;
        let next_base = base + points_per_poly;
        for j in 0..ring_faces {
            let next_j = (j + 1) % points_per_poly;
            faces.push([
                (base + j) as u32,
                (base + next_j) as u32,
                (next_base + next_j) as u32,
                (next_base + j) as u32,
            ]);
        }
    }
    faces
}
