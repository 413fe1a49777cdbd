#![allow(dead_code)]

pub mod mock_clipboard;
pub mod mock_evaluator;
pub mod mock_variables;
