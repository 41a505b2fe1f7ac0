use electrovoxel::prelude::*;
use electrovoxel::{Direction::*, MoveKind};

const CELL_SIZE: i32 = 40;

fn shape(cells: &[(i32, i32)]) -> Shape {
    Shape::from_cells(
        cells.iter().map(|c| Point::from(*c)),
        ShapeConfig::with_cell_size(CELL_SIZE),
    )
    .unwrap()
}

fn square() -> Shape {
    shape(&[
        (0, 0),
        (1, 0),
        (2, 0),
        (0, 1),
        (1, 1),
        (2, 1),
        (0, 2),
        (1, 2),
        (2, 2),
    ])
}

fn cross() -> Shape {
    shape(&[
        (1, -1),
        (1, 0),
        (1, 1),
        (1, 2),
        (1, 3),
        (-1, 1),
        (0, 1),
        (2, 1),
        (3, 1),
    ])
}

#[test]
fn square_pivots_into_cross() {
    let mut current = square();
    let target = cross();

    // Each corner rotates out around its edge neighbor.
    let plan = [
        ((0, 0), Up, (1, -1)),
        ((0, 2), Left, (-1, 1)),
        ((2, 0), Right, (3, 1)),
        ((2, 2), Down, (1, 3)),
    ];

    let mut last = current.similarity_to(&target).unwrap();
    assert!((last - 100.0 * 80.0 / 216.0).abs() < 1e-9);

    for (from, direction, to) in plan.iter() {
        let from = Point::from(*from).to_world(CELL_SIZE);
        let verdict = current.try_pivot(&from, *direction).unwrap();
        assert!(verdict.is_legal(), "{:?} from {} refused", direction, from);

        current.refresh_neighbors();
        assert!(current.contains(&Point::from(*to).to_world(CELL_SIZE)));
        assert!(current.is_unified());

        let now = current.similarity_to(&target).unwrap();
        assert!(now < last, "similarity went from {} to {}", last, now);
        last = now;
    }

    assert_eq!(last, 0.0);
    assert!(current.matches(&target).unwrap());
    assert_eq!(current.canonicalize(), target.canonicalize());
}

#[test]
fn moves_decoded_from_action_indices() {
    let mut current = square();
    let corner = Point::new(0, 0);

    // Pivot up.
    let m = Move::from_action_index(3).unwrap();
    assert_eq!(m.kind, MoveKind::Pivot);

    let verdict = current.apply_move(&corner, m).unwrap();
    assert_eq!(verdict.displacement(), Some(Point::new(1, -1)));
    assert_eq!(
        current.apply_move(&corner, m),
        Err(ShapeError::StateNotRefreshed)
    );
}

#[test]
fn transverse_slides_along_anchor_and_hinge() {
    // An L: the voxel at the origin has its anchor to the right and a hinge above that.
    let mut current = shape(&[(0, 0), (1, 0), (1, -1)]);
    let origin = Point::zero();

    assert_eq!(
        current.try_transverse(&origin, Left).unwrap(),
        Verdict::Illegal(Illegal::NoAnchor)
    );

    let verdict = current.try_transverse(&origin, Up).unwrap();
    assert_eq!(verdict.displacement(), Some(Point::new(0, -1)));
    assert_eq!(verdict.anchor().map(|a| a.point()), Some(Point::new(1, 0)));

    current.refresh_neighbors();
    assert!(current.contains(&Point::new(0, -CELL_SIZE)));
    assert!(current.is_unified());
    assert_eq!(current.to_string(), "##\n.#\n");
}

#[test]
fn similarity_needs_equal_voxel_counts() {
    let mut smaller = square();
    smaller.remove(&Point::new(CELL_SIZE, CELL_SIZE)).unwrap();

    assert_eq!(
        smaller.similarity_to(&cross()),
        Err(ShapeError::ShapeMismatch {
            left_rows: 8,
            left_columns: 24,
            right_rows: 9,
            right_columns: 24,
        })
    );
}
