/// Module for tracking where in the original source code the interpreter currently is.
pub mod source_buffer;

/// Module for turning a stream of source bytes into the tokens the interpreter dispatches on.
pub mod tokenizing;
