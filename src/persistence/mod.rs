pub mod files;
pub mod settings;
pub mod store;

pub use files::{atomic_write, ensure_taskly_dir, init_local_taskly, log_file, settings_file};
pub use settings::{load_settings, save_settings, Settings};
pub use store::{load_json, save_json, FileStore, KeyValueStore};

#[cfg(test)]
pub use store::MemoryStore;
