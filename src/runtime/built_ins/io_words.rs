use crate::{
    add_native_word,
    runtime::{data_structures::dictionary::Dictionary, error, interpreter::Interpreter},
};

/// Write the raw payload of the top value followed by a new line.  A uint8 is written as its
/// single byte, not as decimal digits.
///
/// Signature: `value -- `
fn word_print(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let cell = interpreter.pop_operand("print", "value")?;

    let mut line = Vec::with_capacity(cell.payload().len() + 1);
    line.extend_from_slice(cell.payload());
    line.push(b'\n');

    interpreter.output().write_all(&line)?;
    Ok(())
}

/// Register the I/O words with the given dictionary.
pub fn register_io_words(dictionary: &mut Dictionary) {
    add_native_word!(
        dictionary,
        "print",
        word_print,
        "Write the raw bytes of the top value and a new line to the output.",
        "value -- "
    );
}
