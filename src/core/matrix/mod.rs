pub mod blocks;
pub mod pixel_grid;
pub mod quality;

// 재수출
pub use blocks::{partition, reassemble, BlockLayout};
pub use pixel_grid::PixelGrid;
pub use quality::{mean_squared_error, psnr};
