//! The ECS systems and the components and resources they share.

pub mod audio;
pub mod collision;
pub mod components;
pub mod hud;
pub mod input;
pub mod inventory;
pub mod movement;
pub mod session;
pub mod streaming;
pub mod wander;

pub use self::audio::*;
pub use self::collision::*;
pub use self::components::*;
pub use self::hud::*;
pub use self::input::*;
pub use self::inventory::*;
pub use self::movement::*;
pub use self::session::*;
pub use self::streaming::*;
pub use self::wander::*;
