pub mod env;
pub mod file;
pub mod memory;
pub mod secret_manager;

pub use env::EnvSecrets;
pub use file::FileSecrets;
pub use memory::MemorySecrets;
pub use secret_manager::{MetadataServerToken, SecretManagerSecrets};
