use crate::Point;

use fnv::FnvHashSet;

/// Returns `true` iff every point in `occupied` can reach every other through a chain of
/// face-adjacent (4-connected) points, where adjacent points are `step` apart.
///
/// The traversal starts from the lexicographically least point. An empty set is not unified.
pub fn is_unified(occupied: &FnvHashSet<Point>, step: i32) -> bool {
    let root = match occupied.iter().min() {
        Some(root) => *root,
        None => return false,
    };

    reachable_from(occupied, root, step).len() == occupied.len()
}

/// Splits `occupied` into its 4-connected components. Each component is sorted, and components
/// are ordered by their least point.
pub fn connected_components(occupied: &FnvHashSet<Point>, step: i32) -> Vec<Vec<Point>> {
    let mut remaining: Vec<Point> = occupied.iter().copied().collect();
    remaining.sort();

    let mut seen = FnvHashSet::default();
    let mut components = Vec::new();
    for p in remaining {
        if seen.contains(&p) {
            continue;
        }
        let mut component: Vec<Point> = reachable_from(occupied, p, step).into_iter().collect();
        component.sort();
        seen.extend(component.iter().copied());
        components.push(component);
    }

    components
}

/// Depth-first flood fill over face-adjacent points of `occupied`, starting from `root`.
pub fn reachable_from(occupied: &FnvHashSet<Point>, root: Point, step: i32) -> FnvHashSet<Point> {
    let mut visited = FnvHashSet::default();
    if !occupied.contains(&root) {
        return visited;
    }

    let mut stack = vec![root];
    visited.insert(root);
    while let Some(p) = stack.pop() {
        for offset in FACE_ADJACENT_OFFSETS.iter() {
            let q = match offset.checked_mul(step).and_then(|d| p.checked_add(&d)) {
                Some(q) => q,
                None => continue,
            };
            if occupied.contains(&q) && visited.insert(q) {
                stack.push(q);
            }
        }
    }

    visited
}

const FACE_ADJACENT_OFFSETS: [Point; 4] = [
    Point { x: 1, y: 0 },
    Point { x: 0, y: 1 },
    Point { x: -1, y: 0 },
    Point { x: 0, y: -1 },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn set(points: &[(i32, i32)]) -> FnvHashSet<Point> {
        points.iter().map(|p| Point::from(*p)).collect()
    }

    #[test]
    fn test_empty_is_not_unified() {
        assert!(!is_unified(&FnvHashSet::default(), 1));
    }

    #[test]
    fn test_single_voxel_is_unified() {
        assert!(is_unified(&set(&[(7, -3)]), 1));
    }

    #[test]
    fn test_separated_voxels_are_not_unified() {
        assert!(!is_unified(&set(&[(0, 0), (2, 0)]), 1));
        // Diagonal contact does not count.
        assert!(!is_unified(&set(&[(0, 0), (1, 1)]), 1));
    }

    #[test]
    fn test_ring_is_unified() {
        let ring = set(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1)]);

        assert!(is_unified(&ring, 1));
    }

    #[test]
    fn test_step_scales_adjacency() {
        let world = set(&[(0, 0), (40, 0), (40, 40)]);

        assert!(is_unified(&world, 40));
        assert!(!is_unified(&world, 1));
    }

    #[test]
    fn test_points_at_the_i32_bounds() {
        let edges = set(&[(i32::MAX, 0), (i32::MAX, 1), (i32::MIN, 0)]);

        assert!(!is_unified(&edges, 1));
        assert_eq!(connected_components(&edges, 1).len(), 2);
    }

    #[test]
    fn test_connected_components() {
        let points = set(&[(5, 5), (0, 0), (0, 1), (6, 5), (3, 0)]);

        assert_eq!(
            connected_components(&points, 1),
            vec![
                vec![Point::new(0, 0), Point::new(0, 1)],
                vec![Point::new(3, 0)],
                vec![Point::new(5, 5), Point::new(6, 5)],
            ]
        );
    }

    #[test]
    fn test_reachable_from_unoccupied_root_is_empty() {
        assert!(reachable_from(&set(&[(0, 0)]), Point::new(1, 1), 1).is_empty());
    }
}
