use crate::error::VaultError;

pub type Result<T> = std::result::Result<T, VaultError>;
