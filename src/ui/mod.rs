// Module declarations
mod app;
mod login;
pub mod navigation;
pub mod shell;
// Re-exports for external use
pub use app::{App, UIConfig, run};
pub use login::{LoginOutcome, submit_login};
