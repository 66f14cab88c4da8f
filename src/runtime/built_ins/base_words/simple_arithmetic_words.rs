use crate::{
    add_native_word,
    runtime::{
        data_structures::{cell::Cell, dictionary::Dictionary},
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// Pop `b` then `a` and push `a op b`.  The operation returns None when the divisor is zero.
fn binary_operation(
    interpreter: &mut dyn Interpreter,
    word: &str,
    operation: fn(u8, u8) -> Option<u8>,
) -> error::Result<()> {
    let b = interpreter.pop_as_uint8(word, "right hand")?;
    let a = interpreter.pop_as_uint8(word, "left hand")?;

    match operation(a, b) {
        Some(result) => interpreter.push(Cell::uint8(result)),
        None => script_error(
            interpreter,
            ErrorKind::DivisionByZero {
                word: word.to_string(),
            },
        ),
    }
}

fn word_add(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_operation(interpreter, "+", |a, b| Some(a.wrapping_add(b)))
}

fn word_subtract(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_operation(interpreter, "-", |a, b| Some(a.wrapping_sub(b)))
}

fn word_multiply(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_operation(interpreter, "*", |a, b| Some(a.wrapping_mul(b)))
}

fn word_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_operation(interpreter, "/", u8::checked_div)
}

fn word_modulo(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_operation(interpreter, "%", u8::checked_rem)
}

pub fn register_simple_arithmetic_words(dictionary: &mut Dictionary) {
    add_native_word!(
        dictionary,
        "+",
        word_add,
        "Add two uint8 values, wrapping around at 256.",
        "a b -- a+b"
    );

    add_native_word!(
        dictionary,
        "-",
        word_subtract,
        "Subtract b from a, wrapping around below 0.",
        "a b -- a-b"
    );

    add_native_word!(
        dictionary,
        "*",
        word_multiply,
        "Multiply two uint8 values, wrapping around at 256.",
        "a b -- a*b"
    );

    add_native_word!(
        dictionary,
        "/",
        word_divide,
        "Divide a by b, truncating.  Dividing by zero is an error.",
        "a b -- a/b"
    );

    add_native_word!(
        dictionary,
        "%",
        word_modulo,
        "Remainder after dividing a by b.  Dividing by zero is an error.",
        "a b -- a%b"
    );
}
