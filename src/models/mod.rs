pub mod record;
pub mod transform_log;

pub use record::*;
pub use transform_log::*;
