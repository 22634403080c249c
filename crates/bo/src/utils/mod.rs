mod log_scale;
mod misc;
mod sampling;

pub use log_scale::*;
pub use misc::*;
pub use sampling::*;
