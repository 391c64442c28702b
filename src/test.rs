//! Shared fixtures for unit tests.

use geo::{coord, Coord, LineString, Polygon};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell::CellId;
use crate::index::{CellIndex, CellIndexBuilder};

pub(crate) fn random_points(n: usize, seed: u64) -> Vec<Coord<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| coord! { x: rng.gen_range(0.0..1.0), y: rng.gen_range(0.0..1.0) })
        .collect()
}

/// Short random walks kept inside the unit square.
pub(crate) fn random_polylines(n: usize, num_vertices: usize, seed: u64) -> Vec<Vec<Coord<f64>>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let mut vertex = coord! { x: rng.gen_range(0.0..1.0), y: rng.gen_range(0.0..1.0) };
            let mut vertices = vec![vertex];
            for _ in 1..num_vertices {
                vertex = coord! {
                    x: (vertex.x + rng.gen_range(-0.05f64..0.05)).clamp(0.0, 1.0),
                    y: (vertex.y + rng.gen_range(-0.05f64..0.05)).clamp(0.0, 1.0),
                };
                vertices.push(vertex);
            }
            vertices
        })
        .collect()
}

pub(crate) fn random_cells(n: usize, seed: u64) -> Vec<CellId> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let point = coord! { x: rng.gen_range(0.0..1.0), y: rng.gen_range(0.0..1.0) };
            CellId::from_point(point).parent_at(rng.gen_range(4..12))
        })
        .collect()
}

/// An axis-aligned square polygon.
pub(crate) fn square(min_x: f64, min_y: f64, size: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (min_x, min_y),
            (min_x + size, min_y),
            (min_x + size, min_y + size),
            (min_x, min_y + size),
        ]),
        vec![],
    )
}

/// An index mixing every kind of item: scattered points, polylines, cells and two polygons.
pub(crate) fn mixed_index(seed: u64) -> CellIndex {
    let mut builder = CellIndexBuilder::new();
    builder.add_points(&random_points(400, seed));
    for polyline in random_polylines(20, 8, seed + 1) {
        builder.add_polyline(&polyline);
    }
    builder.add_cells(&random_cells(50, seed + 2));
    builder.add_polygon(square(0.2, 0.2, 0.15));
    builder.add_polygon(square(0.6, 0.55, 0.3));
    builder.finish().unwrap()
}

/// Four points one unit apart on the line `y = 0.5`, with a unit of 0.125 so that every
/// distance between them is exact.
pub(crate) fn collinear_index() -> CellIndex {
    let mut builder = CellIndexBuilder::new();
    builder.add_points(&[
        coord! { x: 0.0, y: 0.5 },
        coord! { x: 0.125, y: 0.5 },
        coord! { x: 0.25, y: 0.5 },
        coord! { x: 0.375, y: 0.5 },
    ]);
    builder.finish().unwrap()
}

#[test]
fn random_polylines_stay_in_unit_square() {
    let polylines = random_polylines(20, 8, 3);
    assert_eq!(polylines.len(), 20);
    for vertices in polylines {
        assert_eq!(vertices.len(), 8);
        for vertex in vertices {
            assert!((0.0..=1.0).contains(&vertex.x) && (0.0..=1.0).contains(&vertex.y));
        }
    }
}
