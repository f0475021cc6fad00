pub mod orchestration;
pub mod prober;
pub mod repackager;

pub use orchestration::IngestionOrchestrator;
pub use prober::{FfprobeProber, MediaProber, VideoGeometry};
pub use repackager::{processed_path, ContainerRepackager, FfmpegRepackager};
