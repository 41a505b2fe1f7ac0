use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::iter::FromIterator;

pub fn assert_elements_eq<T: Clone + Debug + Eq + Hash>(v1: &Vec<T>, v2: &Vec<T>) {
    let set1: HashSet<T> = HashSet::from_iter(v1.iter().cloned());
    let set2: HashSet<T> = HashSet::from_iter(v2.iter().cloned());
    assert_eq!(set1, set2);
}

/// Solid 3x3 block with its least corner at the origin.
pub fn square_cells() -> Vec<(i32, i32)> {
    (0..3).flat_map(|y| (0..3).map(move |x| (x, y))).collect()
}

/// Plus sign with arms of length 2, centered on the square's center.
pub fn cross_cells() -> Vec<(i32, i32)> {
    vec![
        (1, -1),
        (1, 0),
        (1, 1),
        (1, 2),
        (1, 3),
        (-1, 1),
        (0, 1),
        (2, 1),
        (3, 1),
    ]
}
