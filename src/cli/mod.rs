pub mod convert;
pub mod favorites;
pub mod flag;
pub mod history;
pub mod interactive;
pub mod setup;
pub mod ui;
