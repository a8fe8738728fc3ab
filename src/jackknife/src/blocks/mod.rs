mod jackknife_block;
pub use jackknife_block::{JackknifeBlock, Pseudovalue};

mod jackknife_blocks;
pub use jackknife_blocks::{JackknifeBlocks, BlockEstimates};
