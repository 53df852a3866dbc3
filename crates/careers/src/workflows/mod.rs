pub mod accounts;
pub mod directory;
pub mod forms;
pub mod intake;
