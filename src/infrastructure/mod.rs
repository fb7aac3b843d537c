pub mod audio;
pub mod fs;
pub mod observability;
