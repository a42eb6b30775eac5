//! Service validation library modules.

pub mod domain;
pub mod inbound;
pub mod settings;

pub use settings::ValidationSettings;
