use crate::{
    add_native_word,
    runtime::{
        data_structures::dictionary::{Dictionary, WordType},
        error,
        interpreter::Interpreter,
    },
};
use std::rc::Rc;

/// A script defined word.  The body is kept as text and run through the interpreter again every
/// time the word is called.
struct ScriptFunction {
    /// The name of the word, used to tag the locations inside the body.
    name: String,

    /// The source code of the word.
    body: Vec<u8>,
}

impl ScriptFunction {
    /// Create the new ScriptFunction handler.
    pub fn new(name: String, body: Vec<u8>) -> ScriptFunction {
        ScriptFunction { name, body }
    }

    /// Run the word's body in the calling interpreter.  The name is looked up at call time, so a
    /// body that calls its own word recurses with nothing but the host stack to stop it.
    pub fn call(&self, interpreter: &mut dyn Interpreter) -> error::Result<()> {
        interpreter.process_text(&self.name, &self.body)
    }
}

/// Define a new word from a name and a quotation.  The new word shadows any earlier word of the
/// same name.
///
/// Signature: `name body -- `
fn word_define(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let body = interpreter.pop_as_quotation("define", "body")?;
    let name = interpreter.pop_as_bytes("define", "name")?;

    let display_name = String::from_utf8_lossy(&name).into_owned();
    let description = format!("[{}]", String::from_utf8_lossy(&body));
    let location = interpreter.current_location().clone().unwrap_or_default();

    tracing::debug!(word = %display_name, %location, "defining word");

    let function = ScriptFunction::new(display_name, body);
    let handler = move |interpreter: &mut dyn Interpreter| -> error::Result<()> {
        function.call(interpreter)
    };

    interpreter.add_word(
        location,
        name,
        Rc::new(handler),
        description,
        String::new(),
        WordType::Scripted,
    );

    Ok(())
}

pub fn register_word_creation_words(dictionary: &mut Dictionary) {
    add_native_word!(
        dictionary,
        "define",
        word_define,
        "Create a new word with the given name that runs the quotation.",
        "name body -- "
    );
}
