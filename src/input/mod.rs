//! Input reading for one-shot commands.

mod reader;

pub use reader::{InputReader, MAX_INPUT_SIZE};
