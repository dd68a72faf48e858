//! Array arrangements: rectangular grids, triangular formations and loops.
//!
//! Every arrangement returns one [`Placement`] per cell in row-major (or
//! loop) order. Cells are square and the scale of a cell is its side divided
//! by the canvas size, so content drawn in a cell's own `0..100` canvas fills
//! the cell exactly.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use oddity_core::{geometry::Point, polygon::Polygon};

use super::{Placement, StackDirection, recenter};

/// Loop children are drawn a little smaller than the largest
/// non-overlapping scale
const LOOP_DRAW_FACTOR: f64 = 0.85;

/// Places a `rows` x `cols` grid of square cells centred on the canvas.
///
/// # Examples
///
/// ```
/// # use oddity::placement::rect_grid;
/// let cells = rect_grid(2, 4);
/// assert_eq!(cells.len(), 8);
/// assert_eq!(cells[0].scale(), 0.25);
/// assert_eq!(cells[0].center().x(), 12.5);
/// ```
pub fn rect_grid(rows: usize, cols: usize) -> Vec<Placement> {
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    let cell = (100.0 / cols as f64).min(100.0 / rows as f64);
    let origin_x = 50.0 - cols as f64 * cell / 2.0;
    let origin_y = 50.0 - rows as f64 * cell / 2.0;
    (0..rows * cols)
        .map(|i| {
            let (r, c) = (i / cols, i % cols);
            let center = Point::new(
                origin_x + (c as f64 + 0.5) * cell,
                origin_y + (r as f64 + 0.5) * cell,
            );
            Placement::new(center, cell / 100.0)
        })
        .collect()
}

/// Mesh links between horizontally and vertically adjacent grid cells.
///
/// With `full_grid` every adjacent pair is linked; otherwise only pairs whose
/// cells are both occupied.
pub fn rect_mesh(rows: usize, cols: usize, occupied: &[bool], full_grid: bool) -> Vec<(usize, usize)> {
    let n = rows * cols;
    let linked = |i: usize, j: usize| full_grid || (occupied.get(i) == Some(&true) && occupied.get(j) == Some(&true));
    let mut links = Vec::new();
    for i in 0..n {
        let c = i % cols;
        if c + 1 < cols && linked(i, i + 1) {
            links.push((i, i + 1));
        }
        if i + cols < n && linked(i, i + cols) {
            links.push((i, i + cols));
        }
    }
    links
}

/// Row lengths of a triangular formation: 1, 2, 3, ... with any remainder
/// in a final shorter row.
///
/// # Examples
///
/// ```
/// # use oddity::placement::triangular_rows;
/// assert_eq!(triangular_rows(6), vec![1, 2, 3]);
/// assert_eq!(triangular_rows(8), vec![1, 2, 3, 2]);
/// ```
pub fn triangular_rows(count: usize) -> Vec<usize> {
    let mut rows = Vec::new();
    let mut remaining = count;
    let mut length = 1;
    while remaining >= length {
        rows.push(length);
        remaining -= length;
        length += 1;
    }
    if remaining > 0 {
        rows.push(remaining);
    }
    rows
}

/// Places `count` cells in a triangular formation pointing `direction`.
///
/// `Up` and `Right` keep the apex row on top, `Down` flips the formation
/// vertically and `Left` mirrors it horizontally.
pub fn triangular(count: usize, direction: StackDirection) -> Vec<Placement> {
    let rows = triangular_rows(count);
    let Some(&max_cols) = rows.iter().max() else {
        return Vec::new();
    };
    let cell = (100.0 / max_cols as f64).min(100.0 / rows.len() as f64);

    let mut centers: Vec<Point> = rows
        .iter()
        .enumerate()
        .flat_map(|(ri, &len)| {
            let start_x = 50.0 - len as f64 * cell / 2.0 + cell / 2.0;
            (0..len).map(move |c| Point::new(start_x + c as f64 * cell, ri as f64 * cell))
        })
        .collect();
    recenter(&mut centers);

    centers
        .into_iter()
        .map(|p| {
            let center = match direction {
                StackDirection::Down => Point::new(p.x(), 100.0 - p.y()),
                StackDirection::Left => Point::new(100.0 - p.x(), p.y()),
                StackDirection::Up | StackDirection::Right => p,
            };
            Placement::new(center, cell / 100.0)
        })
        .collect()
}

/// Mesh links of a triangular formation: along each row and from each cell
/// up to its neighbours in the previous row.
pub fn triangular_mesh(rows: &[usize], occupied: &[bool], full_grid: bool) -> Vec<(usize, usize)> {
    let n: usize = rows.iter().sum();
    let linked = |i: usize, j: usize| full_grid || (occupied.get(i) == Some(&true) && occupied.get(j) == Some(&true));
    let mut links = Vec::new();
    let mut start = 0;
    let mut previous_len = 0;
    for (r, &len) in rows.iter().enumerate() {
        for c in 0..len {
            let i = start + c;
            let mut candidates = Vec::with_capacity(3);
            if c + 1 < len {
                candidates.push(i + 1);
            }
            if r > 0 && c > 0 && c - 1 < previous_len {
                candidates.push(start - previous_len + c - 1);
            }
            if r > 0 && c < previous_len {
                candidates.push(start - previous_len + c);
            }
            links.extend(
                candidates
                    .into_iter()
                    .filter(|&j| j < n && linked(i, j))
                    .map(|j| (i, j)),
            );
        }
        start += len;
        previous_len = len;
    }
    links
}

/// Where children sit along a polygon loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPositions {
    /// One child per vertex
    Vertices,
    /// `per_edge` evenly spaced children along every edge
    Edges { per_edge: usize },
}

/// Children arranged around a closed path.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopArrangement {
    placements: Vec<Placement>,
    radius: f64,
    path_scale: f64,
}

impl LoopArrangement {
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Radius of the circle the loop is fitted to
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Factor the path shape is scaled by about the canvas centre
    pub fn path_scale(&self) -> f64 {
        self.path_scale
    }
}

/// Largest scale at which `n` children on a loop do not overlap
fn loop_scale(n: usize, per_edge: usize) -> f64 {
    if n < 2 {
        return 0.5;
    }
    if per_edge > 1 {
        let sides = (n / per_edge).max(1);
        let s = (PI / sides as f64).sin();
        return s / ((per_edge + 1) as f64 + s);
    }
    let s = (PI / n as f64).sin();
    s / (1.0 + s)
}

/// Places `count` children evenly around a circle, starting at the top.
///
/// # Examples
///
/// ```
/// # use oddity::placement::circle_loop;
/// let ring = circle_loop(6);
/// assert_eq!(ring.placements().len(), 6);
/// assert!((ring.placements()[0].center().y() - (50.0 - ring.radius())).abs() < 1e-9);
/// ```
pub fn circle_loop(count: usize) -> LoopArrangement {
    let scale_max = loop_scale(count, 1);
    let radius = 50.0 * (1.0 - scale_max);
    let placements = (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64 - FRAC_PI_2;
            Placement::new(
                Point::canvas_center().polar(radius, angle),
                LOOP_DRAW_FACTOR * scale_max,
            )
        })
        .collect();
    LoopArrangement {
        placements,
        radius,
        path_scale: 1.0,
    }
}

/// Places children at the vertices or along the edges of `vertices`, with
/// the polygon scaled about the canvas centre so its farthest vertex lies on
/// the loop radius.
pub fn polygon_loop(vertices: &Polygon, positions: LoopPositions) -> LoopArrangement {
    let center = Point::canvas_center();
    let sides = vertices.len();
    let (count, per_edge) = match positions {
        LoopPositions::Vertices => (sides, 1),
        LoopPositions::Edges { per_edge } => (sides * per_edge, per_edge),
    };
    let scale_max = loop_scale(count, per_edge);
    let radius = 50.0 * (1.0 - scale_max);
    let max_radius = vertices.max_radius(center);
    if max_radius <= 0.0 {
        return LoopArrangement {
            placements: Vec::new(),
            radius,
            path_scale: 1.0,
        };
    }
    let path_scale = radius / max_radius;
    let scaled = vertices.scaled_about(center, path_scale);

    let centers: Vec<Point> = match positions {
        LoopPositions::Vertices => scaled.vertices().to_vec(),
        LoopPositions::Edges { per_edge } => scaled
            .edges()
            .flat_map(|edge| {
                (1..=per_edge).map(move |k| {
                    edge.start()
                        .lerp(edge.end(), k as f64 / (per_edge + 1) as f64)
                })
            })
            .collect(),
    };
    let placements = centers
        .into_iter()
        .map(|p| Placement::new(p, LOOP_DRAW_FACTOR * scale_max))
        .collect();
    LoopArrangement {
        placements,
        radius,
        path_scale,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_rect_grid_square_cells() {
        let cells = rect_grid(3, 2);
        let cell = 100.0 / 3.0;
        assert!(approx_eq!(f64, cells[0].scale(), cell / 100.0, epsilon = 1e-12));
        // Narrow grid is centred horizontally
        assert!(approx_eq!(f64, cells[0].center().x(), 50.0 - cell / 2.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, cells[5].center().y(), 100.0 - cell / 2.0, epsilon = 1e-9));
        assert!(rect_grid(0, 3).is_empty());
    }

    #[test]
    fn test_rect_mesh_full_grid() {
        let links = rect_mesh(2, 2, &[true; 4], true);
        assert_eq!(links, vec![(0, 1), (0, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_rect_mesh_skips_empty_cells() {
        let occupied = [true, false, true, true];
        assert_eq!(rect_mesh(2, 2, &occupied, false), vec![(0, 2), (2, 3)]);
        assert_eq!(rect_mesh(2, 2, &occupied, true).len(), 4);
    }

    #[test]
    fn test_triangular_rows() {
        assert_eq!(triangular_rows(1), vec![1]);
        assert_eq!(triangular_rows(3), vec![1, 2]);
        assert_eq!(triangular_rows(5), vec![1, 2, 2]);
        assert_eq!(triangular_rows(10), vec![1, 2, 3, 4]);
        assert!(triangular_rows(0).is_empty());
    }

    #[test]
    fn test_triangular_formation() {
        let cells = triangular(6, StackDirection::Up);
        let cell = 100.0 / 3.0;
        assert_eq!(cells.len(), 6);
        assert!(approx_eq!(f64, cells[0].scale(), cell / 100.0, epsilon = 1e-12));
        // Apex centred above the base row
        assert!(approx_eq!(f64, cells[0].center().x(), 50.0, epsilon = 1e-9));
        assert!(cells[0].center().y() < cells[5].center().y());

        let down = triangular(6, StackDirection::Down);
        assert!(down[0].center().y() > down[5].center().y());
    }

    #[test]
    fn test_triangular_left_mirrors_rows() {
        let up = triangular(3, StackDirection::Up);
        let left = triangular(3, StackDirection::Left);
        assert!(approx_eq!(f64, left[1].center().x(), up[2].center().x(), epsilon = 1e-9));
    }

    #[test]
    fn test_triangular_mesh() {
        // Rows [1, 2]: 0 links to 1 and 2 (as their up neighbour), 1 links to 2
        let links = triangular_mesh(&[1, 2], &[true; 3], true);
        assert_eq!(links, vec![(1, 2), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_triangular_mesh_skips_empty() {
        let links = triangular_mesh(&[1, 2], &[true, false, true], false);
        assert_eq!(links, vec![(2, 0)]);
    }

    #[test]
    fn test_circle_loop_scale() {
        let ring = circle_loop(6);
        let s = (PI / 6.0).sin();
        let scale_max = s / (1.0 + s);
        assert!(approx_eq!(f64, ring.radius(), 50.0 * (1.0 - scale_max), epsilon = 1e-9));
        assert!(approx_eq!(
            f64,
            ring.placements()[0].scale(),
            0.85 * scale_max,
            epsilon = 1e-12
        ));
        // Neighbours do not overlap at the maximum scale
        let chord = ring.placements()[0]
            .center()
            .distance(ring.placements()[1].center());
        assert!(chord >= 100.0 * scale_max - 1e-9);
    }

    #[test]
    fn test_single_child_loop() {
        let ring = circle_loop(1);
        assert!(approx_eq!(f64, ring.radius(), 25.0, epsilon = 1e-12));
    }

    #[test]
    fn test_polygon_loop_vertices() {
        let square = Polygon::new(vec![
            Point::new(17.0, 17.0),
            Point::new(83.0, 17.0),
            Point::new(83.0, 83.0),
            Point::new(17.0, 83.0),
        ]);
        let ring = polygon_loop(&square, LoopPositions::Vertices);
        assert_eq!(ring.placements().len(), 4);
        for p in ring.placements() {
            assert!(approx_eq!(
                f64,
                p.center().distance(Point::new(50.0, 50.0)),
                ring.radius(),
                epsilon = 1e-9
            ));
        }
    }

    #[test]
    fn test_polygon_loop_edges() {
        let triangle = Polygon::new(vec![
            Point::new(50.0, 10.0),
            Point::new(90.0, 80.0),
            Point::new(10.0, 80.0),
        ]);
        let ring = polygon_loop(&triangle, LoopPositions::Edges { per_edge: 2 });
        assert_eq!(ring.placements().len(), 6);
        let s = (PI / 3.0).sin();
        assert!(approx_eq!(
            f64,
            ring.placements()[0].scale(),
            0.85 * s / (3.0 + s),
            epsilon = 1e-12
        ));
    }
}
