use glam::Vec2;
use strum_macros::{AsRefStr, EnumIter};

/// The four cardinal directions, in world space (Y up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction. Constant time.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector for this direction.
    pub const fn as_vec2(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::Y,
            Direction::Down => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }

    /// The cardinal direction exactly matching `vector`, if any.
    ///
    /// Chase headings are arbitrary unit vectors and map to `None`.
    pub fn from_vec2(vector: Vec2) -> Option<Direction> {
        use strum::IntoEnumIterator;
        Direction::iter().find(|direction| direction.as_vec2() == vector)
    }
}

impl From<Direction> for Vec2 {
    fn from(direction: Direction) -> Self {
        direction.as_vec2()
    }
}
