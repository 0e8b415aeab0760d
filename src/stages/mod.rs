pub mod stage0_clean;
pub mod stage1_standardize;
pub mod stage2_join;
pub mod stage3_normalize;
pub mod stage4_render;

pub use stage0_clean::*;
pub use stage1_standardize::*;
pub use stage2_join::*;
pub use stage3_normalize::*;
pub use stage4_render::*;
