pub mod data;
pub mod sessions;
pub mod system;
pub mod views;
