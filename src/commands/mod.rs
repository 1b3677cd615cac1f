pub mod add;
pub mod completions;
pub mod delete;
pub mod init;
pub mod list;
pub mod setup;

pub use add::AddCommand;
pub use completions::CompletionsCommand;
pub use delete::DeleteCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use setup::SetupCommand;
