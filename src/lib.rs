mod antiquity;
mod bot;
mod cleaning;
mod common;
mod config;
mod curve;
pub mod events;
mod fossil;
mod geometry;
mod logging;
pub mod mines;
pub mod prelude;
mod results;
mod score;
mod session;
mod timer;

pub use antiquity::*;
pub use bot::*;
pub use cleaning::*;
pub use common::*;
pub use config::*;
pub use curve::*;
pub use events::{Emitter, Subscription, SubscriptionId};
pub use fossil::*;
pub use geometry::*;
pub use logging::init_logging;
pub use mines::{
    random_point_in_rect, smallest_region, subdivide, Mine, MineEvent, MineManager, MineStatus,
};
pub use results::*;
pub use score::*;
pub use session::*;
pub use timer::*;
