//! Connection management module

pub mod builder;
pub mod cache;
pub mod connection;
pub mod settings;

pub use builder::ConnectionBuilder;
pub use cache::ConnectionCache;
pub use connection::Connection;
pub use settings::ConnectionSettings;
