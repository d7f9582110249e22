pub mod config;
pub mod grid_compressor;


// 재수출
pub use config::{max_cutoff, retained_coefficients, CompressionConfig, CompressionParams};
pub use grid_compressor::{
    compress, quantize_block, reconstruct_block, truncate_coefficients, CompressionReport,
    GridCompressor,
};
