pub mod config;
pub mod math;
pub mod positions;
pub mod utils;

pub use self::config::Settings;
pub use math::{get_amount0, get_amount1, get_sqrt_ratio_at_tick, MathError};
pub use positions::{PositionEvent, PositionHandler};
