pub mod cli;
pub mod config;
pub mod console;
pub mod extract;
pub mod llm;
pub mod outlet;
pub mod prompts;
pub mod types;
pub mod wizard;

// Re-export commonly used types
pub use config::Config;
pub use wizard::{Wizard, WizardAction, WizardContext};
