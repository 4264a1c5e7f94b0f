//! Market-health metric aggregate: value objects, resampling, the pure
//! statistic calculators and the presenter.

pub mod calculators;
pub mod presenter;
pub mod resampler;
pub mod value_objects;

pub use resampler::*;
pub use value_objects::*;
