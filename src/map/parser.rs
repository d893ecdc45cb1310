//! Parsing of whitespace-separated tile maps into a [`TileGrid`].

use bevy_ecs::{entity::Entity, resource::Resource};
use glam::{IVec2, Vec2};
use tracing::{debug, trace};

/// Index into the tile set.
pub type TileId = u16;

/// A row-major grid of tile ids plus the entities built from them.
///
/// Coordinates are `IVec2 { x: col, y: row }` with row 0 at the top of the text.
/// Row `r` sits at world `y = -r * cell_size + offset.y`, so the map extends downwards.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    cell_size: f32,
    offset: Vec2,
    cells: Vec<Option<TileId>>,
    instances: Vec<Option<Entity>>,
}

impl TileGrid {
    /// Parses a map.
    ///
    /// Each non-trailing line is a row. Width comes from the first row; shorter rows are padded
    /// with empty cells and extra tokens are dropped. Tokens that are not integers in
    /// `[0, tile_type_count)` become empty cells. Never fails.
    pub fn load(map_text: &str, tile_type_count: usize) -> Self {
        let lines: Vec<&str> = map_text.lines().collect();
        let end = lines.iter().rposition(|line| !line.trim().is_empty()).map_or(0, |last| last + 1);
        let lines = &lines[..end];

        let rows = lines.len();
        let cols = lines.first().map_or(0, |first| first.split_whitespace().count());

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in lines.iter().enumerate() {
            let mut tokens = line.split_whitespace();
            for col in 0..cols {
                let cell = tokens.next().and_then(|token| Self::parse_token(token, tile_type_count));
                if cell.is_none() {
                    trace!(row, col, "Empty cell");
                }
                cells.push(cell);
            }
            let extra = tokens.count();
            if extra > 0 {
                debug!(row, extra, "Ignoring tokens beyond the map width");
            }
        }

        debug!(rows, cols, "Parsed tile map");
        Self {
            rows,
            cols,
            cell_size: 1.0,
            offset: Vec2::ZERO,
            instances: vec![None; cells.len()],
            cells,
        }
    }

    /// Parses one token into a tile id, or `None` for an empty cell.
    pub fn parse_token(token: &str, tile_type_count: usize) -> Option<TileId> {
        let value: usize = token.parse().ok()?;
        if value >= tile_type_count {
            return None;
        }
        TileId::try_from(value).ok()
    }

    /// Sets the world size of a cell and the world position of cell (0, 0).
    pub fn with_layout(mut self, cell_size: f32, offset: Vec2) -> Self {
        self.cell_size = cell_size;
        self.offset = offset;
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    fn index(&self, coord: IVec2) -> Option<usize> {
        let (col, row) = (usize::try_from(coord.x).ok()?, usize::try_from(coord.y).ok()?);
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// The tile id at `coord`. Out of range or empty cells give `None`.
    pub fn get(&self, coord: IVec2) -> Option<TileId> {
        self.index(coord).and_then(|index| self.cells[index])
    }

    pub fn instance(&self, coord: IVec2) -> Option<Entity> {
        self.index(coord).and_then(|index| self.instances[index])
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (IVec2, TileId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|kind| (self.coord_of(index), kind)))
    }

    /// Built instances in row-major order.
    pub fn instances(&self) -> impl Iterator<Item = (IVec2, Entity)> + '_ {
        self.instances
            .iter()
            .enumerate()
            .filter_map(|(index, entity)| entity.map(|entity| (self.coord_of(index), entity)))
    }

    pub fn is_built(&self) -> bool {
        self.instances.iter().any(Option::is_some)
    }

    pub(crate) fn record_instance(&mut self, coord: IVec2, entity: Entity) {
        if let Some(index) = self.index(coord) {
            self.instances[index] = Some(entity);
        }
    }

    fn coord_of(&self, index: usize) -> IVec2 {
        IVec2::new((index % self.cols) as i32, (index / self.cols) as i32)
    }

    /// World position of a cell center.
    pub fn world_position(&self, coord: IVec2) -> Vec2 {
        Vec2::new(
            coord.x as f32 * self.cell_size + self.offset.x,
            -(coord.y as f32) * self.cell_size + self.offset.y,
        )
    }

    /// The cell containing a world position, rounding half to even.
    ///
    /// The result may lie outside the grid.
    pub fn tile_coord(&self, position: Vec2) -> IVec2 {
        let col = ((position.x - self.offset.x) / self.cell_size).round_ties_even();
        let row = ((position.y - self.offset.y) / -self.cell_size).round_ties_even();
        IVec2::new(col as i32, row as i32)
    }
}
