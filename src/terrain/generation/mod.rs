// ============================================
// Generation Module - Генерация высот terrain
// ============================================

mod interpolate;
mod noise;
mod params;
mod parallel;
mod sampler;

pub use interpolate::{bicubic, bilinear, cubic, lerp};
pub use noise::{hash2d, hash3d, noise2d, LatticeNoise};
pub use params::SamplerParams;
pub use parallel::ParallelHeightfield;
pub use sampler::{InterpolatedInputs, Neighborhood, TileHeights, TileSampleContext, WorldHeightSampler};
