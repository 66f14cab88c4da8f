/// The Cell enumeration, the tagged value every stack slot holds.
pub mod cell;

/// The bounded data stack of cells.
pub mod stack;

/// The dictionary module provides the append only word dictionary used by the interpreter.
pub mod dictionary;
