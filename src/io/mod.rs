pub mod config_io;
pub mod lock;
pub mod persistence;
pub mod store;
pub mod theme;
