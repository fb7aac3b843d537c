mod local_file_processor;
mod mock_file_processor;

pub use local_file_processor::LocalFileProcessor;
pub use mock_file_processor::MockFileProcessor;
