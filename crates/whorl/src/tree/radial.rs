use super::{RadialTreeLayout, TreeRows};
use crate::{NodeSizes, Point, Rect};
use std::collections::HashMap;
use std::f32::consts::{PI, TAU};
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// Minimum angular separation kept between row neighbours when a parent is
/// pulled toward its children
const MIN_SEPARATION: f32 = PI / 10.0;

/// Horizontal extent and radius of one row, measured on the compact layout
#[derive(Debug, Clone, Copy)]
struct RowDims {
    min_x: f32,
    max_x: f32,
    min_cen_x: f32,
    max_cen_x: f32,
    radius: f32,
}

/// Re-project compact Cartesian positions into concentric rings around the
/// root
///
/// Angles are assigned per row from the horizontal order of the compact
/// layout, with one gradient pair shared by all rows so that outer rings
/// stay proportionate to inner ones, then parents are pulled toward the
/// angular centroid of their children. The root keeps its compact position
/// and becomes the common center.
pub(crate) fn project_radial<N, S>(
    tree: &TreeRows<N>,
    sizes: &S,
    compact: &HashMap<N, Point>,
    config: &RadialTreeLayout,
) -> HashMap<N, Point>
where
    N: Copy + Ord + Hash + fmt::Debug,
    S: NodeSizes<N>,
{
    let root_bounds = bounds_of(tree.nodes[0].vertex, compact, sizes);
    let center = root_bounds.center();

    let dims = calc_row_dims(tree, sizes, compact, config, center.y);

    // One gradient pair across all rows keeps the angular sector of every
    // depth proportionate, outer rings cannot catch up with inner ones
    let mut max_left_grad = 0.0f32;
    let mut max_right_grad = 0.0f32;
    for row in &dims {
        if row.radius <= 0.0 {
            continue;
        }
        max_left_grad =
            max_left_grad.max((center.x - row.min_x - config.node_distance) / row.radius);
        max_right_grad =
            max_right_grad.max((row.max_x - center.x - config.node_distance) / row.radius);
    }
    debug!("Angular gradients: left {max_left_grad}, right {max_right_grad}");

    // Map every vertex's horizontal position within its row's virtual
    // extent linearly onto [0, 2π)
    let mut theta = vec![0.0f32; tree.nodes.len()];
    for (row_index, row) in tree.rows.iter().enumerate() {
        let row_dims = dims[row_index];
        let x_left = center.x - config.node_distance - max_left_grad * row_dims.radius;
        let x_right = center.x + config.node_distance + max_right_grad * row_dims.radius;
        let full_width = x_right - x_left;
        trace!("Row {row_index}: radius {}, span {x_left}..{x_right}", row_dims.radius);

        for &index in row {
            let cen_x = bounds_of(tree.nodes[index].vertex, compact, sizes).center_x();
            let proportion = if full_width > f32::EPSILON {
                (cen_x - x_left) / full_width
            } else if row_dims.max_cen_x > row_dims.min_cen_x {
                (cen_x - row_dims.min_cen_x) / (row_dims.max_cen_x - row_dims.min_cen_x)
            } else {
                0.5
            };
            theta[index] = TAU * proportion;
        }
    }

    reconcile_angles(tree, &mut theta);

    // Land every vertex center exactly on its row circle; the root stays
    // where the compact pass put it
    let mut positions = HashMap::with_capacity(tree.nodes.len());
    positions.insert(
        tree.nodes[0].vertex,
        Point::new(root_bounds.x, root_bounds.y),
    );
    for (row_index, row) in tree.rows.iter().enumerate() {
        let radius = dims[row_index].radius;
        for &index in row {
            let vertex = tree.nodes[index].vertex;
            let size = sizes.size(vertex);
            let angle = theta[index];
            positions.insert(
                vertex,
                Point::new(
                    center.x - size.x / 2.0 + radius * angle.cos(),
                    center.y - size.y / 2.0 + radius * angle.sin(),
                ),
            );
        }
    }

    positions
}

/// Measure each row's horizontal extent and its distance from the root
///
/// Rows only exist down to the tree's actual depth, an entirely-leaf row
/// ends the computation naturally.
fn calc_row_dims<N, S>(
    tree: &TreeRows<N>,
    sizes: &S,
    compact: &HashMap<N, Point>,
    config: &RadialTreeLayout,
    center_y: f32,
) -> Vec<RowDims>
where
    N: Copy + Ord + Hash + fmt::Debug,
    S: NodeSizes<N>,
{
    tree.rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let mut min_x = f32::INFINITY;
            let mut max_x = f32::NEG_INFINITY;
            let mut min_cen_x = f32::INFINITY;
            let mut max_cen_x = f32::NEG_INFINITY;
            let mut min_y = f32::INFINITY;
            let mut max_y = f32::NEG_INFINITY;

            for &index in row {
                let bounds = bounds_of(tree.nodes[index].vertex, compact, sizes);
                min_x = min_x.min(bounds.x);
                max_x = max_x.max(bounds.right());
                min_cen_x = min_cen_x.min(bounds.center_x());
                max_cen_x = max_cen_x.max(bounds.center_x());
                min_y = min_y.min(bounds.y);
                max_y = max_y.max(bounds.bottom());
            }

            let radius = if config.auto_radius {
                (row_index as f32 + 1.0) * config.level_distance
            } else {
                (min_y + max_y) / 2.0 - center_y
            };

            RowDims {
                min_x,
                max_x,
                min_cen_x,
                max_cen_x,
                radius,
            }
        })
        .collect()
}

/// Pull each parent toward the average angle of its children
///
/// Rows are swept from the outermost inward so children carry their final
/// angles when their parent is adjusted. The clamp against the angular
/// neighbours in the same row keeps at least [`MIN_SEPARATION`] between
/// them and never inverts the original order. A single sweep, siblings
/// whose constraints bind are left approximately centered.
fn reconcile_angles<N>(tree: &TreeRows<N>, theta: &mut [f32])
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    for row_index in (0..tree.rows.len().saturating_sub(1)).rev() {
        let row = &tree.rows[row_index];
        for (position, &index) in row.iter().enumerate() {
            let children = &tree.nodes[index].children;
            if children.is_empty() {
                continue;
            }

            let mean =
                children.iter().map(|&child| theta[child]).sum::<f32>() / children.len() as f32;

            if mean > theta[index] {
                theta[index] = if position + 1 < row.len() {
                    mean.min(theta[row[position + 1]] - MIN_SEPARATION)
                } else {
                    mean
                };
            } else if mean < theta[index] {
                theta[index] = if position > 0 {
                    mean.max(theta[row[position - 1]] + MIN_SEPARATION)
                } else {
                    mean
                };
            }
        }
    }
}

fn bounds_of<N, S>(vertex: N, positions: &HashMap<N, Point>, sizes: &S) -> Rect
where
    N: Copy + Ord + Hash + fmt::Debug,
    S: NodeSizes<N>,
{
    Rect::new(positions[&vertex], sizes.size(vertex))
}
