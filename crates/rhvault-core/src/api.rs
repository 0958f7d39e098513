//! Builder style entry points that work on image files.

pub mod hide;
mod password;
pub mod unveil;
pub mod unveil_raw;

pub use password::Password;
