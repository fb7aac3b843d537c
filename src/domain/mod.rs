mod compute_device;
mod metadata;
mod model_variant;
mod transcript;

pub use compute_device::ComputeDevice;
pub use metadata::{Metadata, MetadataValue};
pub use model_variant::ModelVariant;
pub use transcript::Transcript;
