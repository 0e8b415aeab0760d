pub mod histogram;
pub mod profile;

pub use histogram::*;
pub use profile::*;
