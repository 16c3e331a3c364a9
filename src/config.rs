pub mod operations;
pub mod types;

// Re-export types
pub use types::{EnginePreference, Settings};

// Re-export operations
pub use operations::{load_settings, save_settings};
