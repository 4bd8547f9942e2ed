pub mod directory;

pub use directory::DirectorySnapshot;
