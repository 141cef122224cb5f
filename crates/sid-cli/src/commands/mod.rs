pub mod clips;
pub mod common;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod history;
pub mod record;
pub mod settings;
pub mod timer;
pub mod write;
