// Submodules
pub mod core;
pub mod data_source;
pub mod encrypt;
pub mod error;
pub mod general;

pub use core::Config;
pub use data_source::DataSource;
pub use encrypt::{EncryptColumn, EncryptTable, EncryptorConfig, EncryptorKind};
pub use error::Error;
pub use general::{Dialect, General};
