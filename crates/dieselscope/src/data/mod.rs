pub mod storage;

pub use storage::{DataDirectory, StorageError, load_config_file};
