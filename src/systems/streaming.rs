//! Shows only the tiles within a window around the player.
//!
//! The window is centered on the player's tile and spans `view_width / 2` columns and
//! `view_height / 2` rows to each side (integer halves, so odd sizes round down).
//! Only cells in the union of the previous and current window are touched each frame.

use bevy_ecs::{
    query::With,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use glam::IVec2;
use tracing::trace;

use crate::{
    map::{builder::Tile, parser::TileGrid},
    systems::components::{PlayerControlled, Position, Visibility},
};

/// Whether a tile at `coord` is inside the window centered on `center`.
pub fn is_within_view(coord: IVec2, center: IVec2, view_width: u32, view_height: u32) -> bool {
    let delta_col = (i64::from(coord.x) - i64::from(center.x)).abs();
    let delta_row = (i64::from(coord.y) - i64::from(center.y)).abs();
    delta_col <= i64::from(view_width / 2) && delta_row <= i64::from(view_height / 2)
}

/// An inclusive rectangle of tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileWindow {
    pub min: IVec2,
    pub max: IVec2,
}

impl TileWindow {
    pub fn around(center: IVec2, view_width: u32, view_height: u32) -> Self {
        let half = IVec2::new((view_width / 2) as i32, (view_height / 2) as i32);
        Self {
            min: center.saturating_sub(half),
            max: center.saturating_add(half),
        }
    }

    pub fn contains(&self, coord: IVec2) -> bool {
        coord.cmpge(self.min).all() && coord.cmple(self.max).all()
    }

    /// Coordinates of the window clipped to a `cols x rows` grid.
    pub fn cells(&self, cols: usize, rows: usize) -> impl Iterator<Item = IVec2> {
        let min = self.min.max(IVec2::ZERO);
        let max = self.max.min(IVec2::new(cols as i32 - 1, rows as i32 - 1));
        (min.y..=max.y).flat_map(move |row| (min.x..=max.x).map(move |col| IVec2::new(col, row)))
    }
}

/// Streaming window size plus the window applied last frame.
#[derive(Resource, Debug, Clone)]
pub struct TileStreamer {
    pub view_width: u32,
    pub view_height: u32,
    active: Option<TileWindow>,
}

impl TileStreamer {
    pub fn new(view_width: u32, view_height: u32) -> Self {
        Self {
            view_width,
            view_height,
            active: None,
        }
    }

    pub fn active_window(&self) -> Option<TileWindow> {
        self.active
    }
}

pub fn tile_visibility_system(
    grid: Res<TileGrid>,
    mut streamer: ResMut<TileStreamer>,
    player_query: Query<&Position, With<PlayerControlled>>,
    mut tile_query: Query<&mut Visibility, With<Tile>>,
) {
    let Ok(player) = player_query.single() else {
        trace!("No tracked entity, skipping tile visibility");
        return;
    };

    let center = grid.tile_coord(player.0);
    let window = TileWindow::around(center, streamer.view_width, streamer.view_height);
    if streamer.active == Some(window) {
        return;
    }

    let mut set_visible = |coord: IVec2, visible: bool| {
        let Some(entity) = grid.instance(coord) else {
            return;
        };
        if let Ok(mut visibility) = tile_query.get_mut(entity) {
            if visibility.0 != visible {
                visibility.0 = visible;
            }
        }
    };

    match streamer.active {
        None => {
            for (coord, _) in grid.instances() {
                set_visible(coord, window.contains(coord));
            }
        }
        Some(previous) => {
            for coord in previous.cells(grid.cols(), grid.rows()) {
                set_visible(coord, window.contains(coord));
            }
            for coord in window.cells(grid.cols(), grid.rows()) {
                set_visible(coord, true);
            }
        }
    }

    trace!(row = center.y, col = center.x, "Tile window moved");
    streamer.active = Some(window);
}
