mod command;
mod reading;

pub use command::*;
pub use reading::*;
