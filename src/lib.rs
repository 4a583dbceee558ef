pub mod events;
pub mod format;
pub mod model;
pub mod scoring;
pub mod session;
pub mod settings;
