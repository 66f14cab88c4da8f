use crate::{
    add_native_word,
    runtime::{data_structures::dictionary::Dictionary, error, interpreter::Interpreter},
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.peek()?.clone();

    interpreter.push(value)
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.pop()?;

    Ok(())
}

/// Register the stack manipulation words.
pub fn register_stack_words(dictionary: &mut Dictionary) {
    add_native_word!(
        dictionary,
        "dup",
        word_dup,
        "Duplicate the top value on the data stack.",
        "value -- value value"
    );

    add_native_word!(
        dictionary,
        "drop",
        word_drop,
        "Discard the top value on the data stack.",
        "value -- "
    );
}
