pub mod breathe;
pub mod contraction;
pub mod history;
pub mod settings;
