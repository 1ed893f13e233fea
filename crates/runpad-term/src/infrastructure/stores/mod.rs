pub mod preferences_file;

pub use preferences_file::FilePreferenceStore;
