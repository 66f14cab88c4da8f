use crate::{
    add_native_word,
    runtime::{data_structures::dictionary::Dictionary, error, interpreter::Interpreter},
};

/// The path used to tag the locations of code run out of a quotation.
const QUOTATION_PATH: &str = "<quotation>";

/// Run one of two quotations.  A condition of zero picks the true branch, anything else picks the
/// false branch.
///
/// Signature: `condition true-branch false-branch -- ...`
fn word_if(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let on_false = interpreter.pop_as_quotation("if", "false branch")?;
    let on_true = interpreter.pop_as_quotation("if", "true branch")?;
    let condition = interpreter.pop_as_uint8("if", "condition")?;

    if condition == 0 {
        interpreter.process_text(QUOTATION_PATH, &on_true)
    } else {
        interpreter.process_text(QUOTATION_PATH, &on_false)
    }
}

/// Run a quotation a fixed number of times.  The first error stops the loop.
///
/// Signature: `count body -- ...`
fn word_loop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let body = interpreter.pop_as_quotation("loop", "body")?;
    let count = interpreter.pop_as_uint8("loop", "count")?;

    for _ in 0..count {
        interpreter.process_text(QUOTATION_PATH, &body)?;
    }

    Ok(())
}

/// Do nothing at all.
///
/// Signature: ` -- `
fn word_noop(_interpreter: &mut dyn Interpreter) -> error::Result<()> {
    Ok(())
}

pub fn register_control_words(dictionary: &mut Dictionary) {
    add_native_word!(
        dictionary,
        "if",
        word_if,
        "Run the true branch when the condition is 0, otherwise the false branch.",
        "condition true-branch false-branch -- ..."
    );

    add_native_word!(
        dictionary,
        "loop",
        word_loop,
        "Run the quotation count times.",
        "count body -- ..."
    );

    add_native_word!(dictionary, "noop", word_noop, "Do nothing.", " -- ");
}
