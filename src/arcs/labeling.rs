//! Single-pass connected-component labeling over edge pixels.
//!
//! Pixels connect when they are 8-adjacent and share the gradient-sign
//! product; only the four already-visited neighbors (NW, N, NE, W) are
//! examined during the row-major scan. Label collisions are recorded in an
//! equivalence map that is path-compressed after the scan, so every label
//! resolves to the smallest label of its component.
use super::arc::oriented_gradient_sign;
use crate::edges::EdgeMap;
use std::collections::{BTreeMap, HashMap};

/// Connected pixel groups in ascending root-label order (scan order of the
/// component's first pixel). `total` counts every component, including the
/// ones the caller will filter out.
pub(super) struct RawRegions {
    pub groups: Vec<Vec<[i32; 2]>>,
    pub total: usize,
}

pub(super) fn connected_regions(map: &EdgeMap) -> RawRegions {
    let w = map.width;
    let h = map.height;
    if w < 3 || h < 3 {
        return RawRegions {
            groups: Vec::new(),
            total: 0,
        };
    }

    // 0 = unlabeled
    let mut labels = vec![0u32; w * h];
    let mut equivalence: HashMap<u32, u32> = HashMap::new();
    let mut next_label = 0u32;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let offset = y * w + x;
            if !map.is_edge(offset) {
                continue;
            }
            let sign = oriented_gradient_sign(map.grad_x[offset], map.grad_y[offset]);
            if sign == 0 {
                continue;
            }

            let mut current = u32::MAX;
            // NW, N, NE, W — the already-visited 8-neighbors
            let neighbors = [offset - w - 1, offset - w, offset - w + 1, offset - 1];
            for neighbor_offset in neighbors {
                if !map.is_edge(neighbor_offset) {
                    continue;
                }
                let neighbor_sign = oriented_gradient_sign(
                    map.grad_x[neighbor_offset],
                    map.grad_y[neighbor_offset],
                );
                if neighbor_sign != sign {
                    continue;
                }
                // zero-gradient pixels never matched `sign`, so the neighbor
                // carries a label
                let neighbor_label = labels[neighbor_offset];
                if neighbor_label < current {
                    if current != u32::MAX {
                        equivalence.insert(current, neighbor_label);
                    }
                    current = neighbor_label;
                } else if current < neighbor_label {
                    equivalence.insert(neighbor_label, current);
                }
            }

            if current == u32::MAX {
                next_label += 1;
                current = next_label;
            }
            labels[offset] = current;
        }
    }

    // Compress equivalence chains so every label points at its root.
    // Entries always map a label to a strictly smaller one, so chains
    // terminate.
    for label in (1..=next_label).rev() {
        if let Some(&first) = equivalence.get(&label) {
            let mut root = first;
            while let Some(&next) = equivalence.get(&root) {
                root = next;
            }
            equivalence.insert(label, root);
        }
    }

    let mut grouped: BTreeMap<u32, Vec<[i32; 2]>> = BTreeMap::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let label = labels[y * w + x];
            if label == 0 {
                continue;
            }
            let root = equivalence.get(&label).copied().unwrap_or(label);
            grouped
                .entry(root)
                .or_default()
                .push([x as i32, y as i32]);
        }
    }

    let total = grouped.len();
    RawRegions {
        groups: grouped.into_values().collect(),
        total,
    }
}
