use super::*;
use crate::detector::EllipseParams;
use crate::edges::{EdgeMap, EDGE_SENTINEL};
use std::collections::BTreeMap;

fn ring_edge_map(size: usize, cx: f32, cy: f32, radius: f32) -> EdgeMap {
    let mut map = EdgeMap::empty(size, size);
    let mut marked: BTreeMap<usize, (f32, f32)> = BTreeMap::new();
    let mut theta = 0.0f32;
    while theta < 360.0 {
        let rad = theta.to_radians();
        let x = (cx + radius * rad.cos()).round() as i32;
        let y = (cy + radius * rad.sin()).round() as i32;
        if x > 0 && y > 0 && (x as usize) < size - 1 && (y as usize) < size - 1 {
            let offset = map.idx(x as usize, y as usize);
            marked.insert(offset, (rad.cos(), rad.sin()));
        }
        theta += 0.25;
    }
    for (offset, (gx, gy)) in marked {
        map.edge[offset] = EDGE_SENTINEL;
        map.grad_x[offset] = gx;
        map.grad_y[offset] = gy;
    }
    map
}

fn diagonal_edge_map(size: usize) -> EdgeMap {
    let mut map = EdgeMap::empty(size, size);
    for i in 1..size - 1 {
        let offset = map.idx(i, i);
        map.edge[offset] = EDGE_SENTINEL;
        map.grad_x[offset] = 1.0;
        map.grad_y[offset] = -1.0;
    }
    map
}

#[test]
fn circle_ring_splits_into_four_quadrant_arcs() {
    let map = ring_edge_map(64, 32.0, 32.0, 20.0);
    let params = EllipseParams::default();
    let segmentation = segment_arcs(&map, &params);
    assert_eq!(
        segmentation.positive.len(),
        2,
        "expected NE and SW arcs in the positive pool"
    );
    assert_eq!(
        segmentation.negative.len(),
        2,
        "expected NW and SE arcs in the negative pool"
    );

    let classified = classify_arcs(segmentation);
    assert_eq!(
        classified.quadrant_counts(),
        [1, 1, 1, 1],
        "one arc per quadrant"
    );
}

#[test]
fn arc_points_are_sorted_by_x_then_y() {
    let map = ring_edge_map(64, 32.0, 32.0, 20.0);
    let segmentation = segment_arcs(&map, &EllipseParams::default());
    for arc in segmentation.positive.iter().chain(&segmentation.negative) {
        for pair in arc.points.windows(2) {
            assert!(
                pair[0] <= pair[1],
                "points out of order: {:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn straight_diagonal_is_rejected_and_counted() {
    let map = diagonal_edge_map(40);
    let segmentation = segment_arcs(&map, &EllipseParams::default());
    assert!(segmentation.positive.is_empty());
    assert!(segmentation.negative.is_empty());
    assert_eq!(segmentation.stats.total_segments, 1);
    assert!(
        segmentation.stats.straight_rejected >= 1,
        "diagonal must be counted as straight, stats={:?}",
        segmentation.stats
    );
}

#[test]
fn short_runs_are_rejected_and_counted() {
    let mut map = EdgeMap::empty(20, 20);
    for x in 5..10 {
        let offset = map.idx(x, 10 + (x % 2));
        map.edge[offset] = EDGE_SENTINEL;
        map.grad_x[offset] = 1.0;
        map.grad_y[offset] = -1.0;
    }
    let segmentation = segment_arcs(&map, &EllipseParams::default());
    assert_eq!(segmentation.stats.total_segments, 1);
    assert_eq!(segmentation.stats.short_rejected, 1);
}

#[test]
fn empty_map_yields_no_arcs() {
    let map = EdgeMap::empty(32, 32);
    let segmentation = segment_arcs(&map, &EllipseParams::default());
    assert_eq!(segmentation.stats.total_segments, 0);
    assert!(segmentation.positive.is_empty() && segmentation.negative.is_empty());
}
