pub mod pipe;
pub mod settings;
