// Adapters layer: concrete implementations of the domain ports.

pub mod form_file;
pub mod http;
pub mod terminal;
