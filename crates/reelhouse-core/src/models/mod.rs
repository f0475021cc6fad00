pub mod media;
pub mod video;

pub use media::{OrientationBucket, UploadKind, UploadedAsset};
pub use video::VideoRecord;
