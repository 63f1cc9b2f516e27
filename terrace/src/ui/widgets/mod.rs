//! TUI widgets for the stack browser

pub mod stack_list;

pub use stack_list::StackListWidget;
