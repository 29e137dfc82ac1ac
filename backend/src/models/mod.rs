pub mod reading;
pub mod time;

pub use reading::*;
pub use time::*;
