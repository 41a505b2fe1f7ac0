use crate::{
    bounding_extent, canonical, connectivity, moves, neighborhood, CanonicalStateMatrix,
    Direction, Extent, Illegal, Move, NeighborState, Point, ShapeConfig, ShapeError, Verdict,
    Voxel,
};

use fnv::{FnvBuildHasher, FnvHashSet};
use indexmap::IndexMap;
use std::fmt;
use tracing::{debug, trace};

/// A configuration of voxels, keyed by world position so that no two voxels can share a cell.
///
/// Neighbor states are cached on the voxels and go stale on every structural change (a committed
/// move, an insertion, or a removal). Legality queries on a stale shape fail with
/// `ShapeError::StateNotRefreshed` until `refresh_neighbors` is called. Queries over the whole
/// shape (`is_unified`, `canonicalize`) always read positions directly and never go stale.
#[derive(Clone, Debug)]
pub struct Shape {
    config: ShapeConfig,
    voxels: IndexMap<Point, Voxel, FnvBuildHasher>,
    stale: bool,
}

impl Shape {
    /// An empty shape.
    pub fn new(config: ShapeConfig) -> Result<Self, ShapeError> {
        config.validate()?;

        Ok(Self {
            config,
            voxels: IndexMap::default(),
            stale: false,
        })
    }

    /// Builds a refreshed shape from voxels at world positions.
    pub fn from_voxels<I>(voxels: I, config: ShapeConfig) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = Voxel>,
    {
        let mut shape = Self::new(config)?;
        for voxel in voxels {
            shape.insert(voxel)?;
        }
        shape.refresh_neighbors();

        Ok(shape)
    }

    /// Builds a refreshed shape with one default voxel per world position.
    pub fn from_positions<I>(positions: I, config: ShapeConfig) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = Point>,
    {
        Self::from_voxels(positions.into_iter().map(Voxel::new), config)
    }

    /// Like `from_positions`, but takes cell coordinates and scales them by the cell size.
    pub fn from_cells<I>(cells: I, config: ShapeConfig) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = Point>,
    {
        let cell_size = config.cell_size;
        let positions = cells
            .into_iter()
            .map(|c| {
                c.checked_to_world(cell_size)
                    .ok_or(ShapeError::OutOfRange { position: c })
            })
            .collect::<Result<Vec<Point>, ShapeError>>()?;

        Self::from_positions(positions, config)
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// `true` iff some structural change happened since the last `refresh_neighbors`.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn contains(&self, position: &Point) -> bool {
        self.voxels.contains_key(position)
    }

    pub fn get(&self, position: &Point) -> Option<&Voxel> {
        self.voxels.get(position)
    }

    /// Only metadata can be changed through the returned reference.
    pub fn get_mut(&mut self, position: &Point) -> Option<&mut Voxel> {
        self.voxels.get_mut(position)
    }

    pub fn voxels(&self) -> impl Iterator<Item = &Voxel> {
        self.voxels.values()
    }

    /// World positions of all voxels.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.voxels.keys().copied()
    }

    /// Cell coordinates of all voxels.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        let cell_size = self.config.cell_size;

        self.positions().map(move |p| p.to_cell(cell_size))
    }

    /// Adds `voxel`, whose position must be a multiple of the cell size within `MAX_COORDINATE`
    /// and not already taken.
    pub fn insert(&mut self, voxel: Voxel) -> Result<(), ShapeError> {
        let position = voxel.position();
        self.config.validate_position(position)?;
        if self.voxels.contains_key(&position) {
            return Err(ShapeError::DuplicatePosition { position });
        }
        self.voxels.insert(position, voxel);
        self.stale = true;

        Ok(())
    }

    pub fn remove(&mut self, position: &Point) -> Result<Voxel, ShapeError> {
        let voxel = self
            .voxels
            .shift_remove(position)
            .ok_or(ShapeError::VoxelNotFound {
                position: *position,
            })?;
        self.stale = true;

        Ok(voxel)
    }

    /// Adds a default voxel at `cell` if it is empty, otherwise removes the voxel there. Returns
    /// whether `cell` is occupied afterwards.
    pub fn toggle_cell(&mut self, cell: Point) -> Result<bool, ShapeError> {
        let position = cell
            .checked_to_world(self.config.cell_size)
            .ok_or(ShapeError::OutOfRange { position: cell })?;
        if self.voxels.shift_remove(&position).is_some() {
            self.stale = true;

            return Ok(false);
        }
        self.insert(Voxel::new(position))?;

        Ok(true)
    }

    /// Recomputes every voxel's neighbor state from the current positions.
    pub fn refresh_neighbors(&mut self) {
        let positions: Vec<Point> = self.voxels.keys().copied().collect();
        let config = self.config;
        for voxel in self.voxels.values_mut() {
            let state = neighborhood::detect(voxel.position(), positions.iter().copied(), &config);
            voxel.set_neighbors(state);
        }
        self.stale = false;

        trace!(voxels = positions.len(), "refreshed neighbor states");
    }

    /// The refreshed neighbor state of the voxel at `position`.
    pub fn neighbors(&self, position: &Point) -> Result<NeighborState, ShapeError> {
        self.fresh_voxel(position).map(|v| *v.neighbors())
    }

    fn fresh_voxel(&self, position: &Point) -> Result<&Voxel, ShapeError> {
        if self.stale {
            return Err(ShapeError::StateNotRefreshed);
        }

        self.voxels.get(position).ok_or(ShapeError::VoxelNotFound {
            position: *position,
        })
    }

    /// Decides whether the voxel at `position` can make move `m`, without committing it.
    ///
    /// On top of the neighborhood rules, a move into an occupied cell is refused with
    /// `Illegal::Occupied`, and one leaving the supported coordinate range with
    /// `Illegal::OutOfBounds`.
    pub fn check_move(&self, position: &Point, m: Move) -> Result<Verdict, ShapeError> {
        self.plan_move(position, m).map(|(verdict, _)| verdict)
    }

    /// The verdict for `m`, along with the world destination when it is legal.
    fn plan_move(
        &self,
        position: &Point,
        m: Move,
    ) -> Result<(Verdict, Option<Point>), ShapeError> {
        let voxel = self.fresh_voxel(position)?;
        let verdict = moves::check(voxel.neighbors(), m);
        let displacement = match verdict {
            Verdict::Legal { displacement, .. } => displacement,
            Verdict::Illegal(_) => return Ok((verdict, None)),
        };

        let destination = displacement
            .checked_to_world(self.config.cell_size)
            .and_then(|d| position.checked_add(&d))
            .filter(|p| self.config.validate_position(*p).is_ok());
        match destination {
            None => Ok((Illegal::OutOfBounds.into(), None)),
            Some(d) if self.voxels.contains_key(&d) => Ok((Illegal::Occupied(d).into(), None)),
            Some(d) => Ok((verdict, Some(d))),
        }
    }

    /// Every move the voxel at `position` can make, in action index order.
    pub fn legal_moves(&self, position: &Point) -> Result<Vec<Move>, ShapeError> {
        let mut legal = Vec::new();
        for m in Move::ALL.iter() {
            if self.check_move(position, *m)?.is_legal() {
                legal.push(*m);
            }
        }

        Ok(legal)
    }

    /// Commits move `m` for the voxel at `position` if it is legal. The shape is stale afterwards.
    pub fn apply_move(&mut self, position: &Point, m: Move) -> Result<Verdict, ShapeError> {
        let (verdict, destination) = self.plan_move(position, m)?;
        let destination = match destination {
            Some(destination) => destination,
            None => {
                debug!(position = %position, action = %m, verdict = ?verdict, "move refused");
                return Ok(verdict);
            }
        };

        if let Some(mut voxel) = self.voxels.shift_remove(position) {
            voxel.set_position(destination);
            self.voxels.insert(destination, voxel);
        }
        self.stale = true;

        debug!(from = %position, to = %destination, action = %m, "move committed");

        Ok(verdict)
    }

    pub fn try_pivot(
        &mut self,
        position: &Point,
        direction: Direction,
    ) -> Result<Verdict, ShapeError> {
        self.apply_move(position, Move::pivot(direction))
    }

    pub fn try_transverse(
        &mut self,
        position: &Point,
        direction: Direction,
    ) -> Result<Verdict, ShapeError> {
        self.apply_move(position, Move::transverse(direction))
    }

    fn occupied(&self) -> FnvHashSet<Point> {
        self.voxels.keys().copied().collect()
    }

    /// `true` iff all voxels form a single 4-connected component. Empty shapes are not unified.
    pub fn is_unified(&self) -> bool {
        connectivity::is_unified(&self.occupied(), self.config.cell_size)
    }

    /// The 4-connected components, as world positions.
    pub fn components(&self) -> Vec<Vec<Point>> {
        connectivity::connected_components(&self.occupied(), self.config.cell_size)
    }

    /// Order-independent fingerprint of the current configuration, computed from positions.
    pub fn canonicalize(&self) -> CanonicalStateMatrix {
        let positions: Vec<Point> = self.positions().collect();
        let states = positions
            .iter()
            .map(|p| neighborhood::detect(*p, positions.iter().copied(), &self.config));
        let matrix = CanonicalStateMatrix::from_states(states);

        trace!(rows = matrix.num_rows(), "canonicalized shape");

        matrix
    }

    /// Percentage of canonical matrix cells that differ from `target`. Fails with
    /// `ShapeError::ShapeMismatch` if the shapes have different voxel counts.
    pub fn similarity_to(&self, target: &Shape) -> Result<f64, ShapeError> {
        canonical::similarity(&self.canonicalize(), &target.canonicalize())
    }

    /// `true` iff `self` and `target` have identical canonical fingerprints.
    pub fn matches(&self, target: &Shape) -> Result<bool, ShapeError> {
        Ok(self.similarity_to(target)? == 0.0)
    }

    /// Bounding extent in cell coordinates, or `None` for an empty shape.
    pub fn extent(&self) -> Option<Extent> {
        bounding_extent(self.cells())
    }
}

/// Draws the bounding extent one row per line, `#` for a voxel and `.` for an empty cell.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let extent = match self.extent() {
            Some(extent) => extent,
            None => return Ok(()),
        };
        let cells: FnvHashSet<Point> = self.cells().collect();
        for row in extent.rows() {
            for cell in row {
                let c = if cells.contains(&cell) { '#' } else { '.' };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
