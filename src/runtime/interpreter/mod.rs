use crate::{
    lang::source_buffer::SourceLocation,
    runtime::{
        data_structures::{
            cell::Cell,
            dictionary::{Dictionary, WordInfo, WordType},
            stack::Stack,
        },
        error,
    },
};
use std::{
    fmt::{self, Display, Formatter},
    io::{Read, Write},
    rc::Rc,
};

pub mod quill_interpreter;

/// A call stack item is a record of the executing word's name and the location within the
/// original source code from which it was found.  These items are read-only and the fields are
/// accessed by member functions.
#[derive(Clone, Debug)]
pub struct CallItem {
    location: SourceLocation,
    word: String,
}

impl CallItem {
    /// Create a new call stack item.
    pub fn new(word: String, location: SourceLocation) -> CallItem {
        CallItem { location, word }
    }

    /// Where in the source code was the execution of this word found?
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    // The name of the word being executed.
    pub fn word(&self) -> &String {
        &self.word
    }
}

/// Make sure that this word can be nicely displayed to the user in event of an error.
impl Display for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.word)
    }
}

/// Type to represent a call stack.  This is a stack of call items currently being executed by the
/// interpreter.  This is used to help track errors and provide a script's stack trace to the user.
pub type CallStack = Vec<CallItem>;

/// Trait for managing the interpreter's data stack.  Intended to be called by words, both native
/// and scripted.
pub trait InterpreterStack {
    /// Use to examine the full data stack when required.
    fn stack(&self) -> &Stack;

    /// Push a cell onto the stack.  Fails if the stack is full.
    fn push(&mut self, cell: Cell) -> error::Result<()>;

    /// Pop the top cell from the stack.  If the stack is empty a stack underflow error is
    /// returned.
    fn pop(&mut self) -> error::Result<Cell>;

    /// Look at the top cell without removing it.  If the stack is empty a stack underflow error is
    /// returned.
    fn peek(&self) -> error::Result<&Cell>;

    /// Pop an operand for the given word.  An empty stack is reported as that word missing the
    /// named operand.
    fn pop_operand(&mut self, word: &str, operand: &'static str) -> error::Result<Cell>;

    /// Pop an operand and make sure it's a uint8.  Fails if the stack is empty or the cell is of
    /// another kind.
    fn pop_as_uint8(&mut self, word: &str, operand: &'static str) -> error::Result<u8>;

    /// Pop an operand and make sure it's a sequence of bytes.  Fails if the stack is empty or the
    /// cell is of another kind.
    fn pop_as_bytes(&mut self, word: &str, operand: &'static str) -> error::Result<Vec<u8>>;

    /// Pop an operand and make sure it's a quotation, returning the code it holds.  Fails if the
    /// stack is empty or the cell is of another kind.
    fn pop_as_quotation(&mut self, word: &str, operand: &'static str)
    -> error::Result<Vec<u8>>;
}

/// Trait for running source code in the interpreter.  Words use this to run quoted code, it's how
/// both control flow and user defined words work.
pub trait CodeManagement {
    /// Tokenize and execute everything the reader produces.  The path parameter is used to
    /// represent the source code in things like call stacks and error reporting.
    ///
    /// Execution stops at the first error, the stack and dictionary are left as they were at that
    /// point.
    fn process_source(&mut self, path: &str, source: &mut dyn Read) -> error::Result<()>;

    /// Execute source code that is already in memory, such as the body of a quotation.  The code
    /// is tokenized again on every call.
    fn process_text(&mut self, path: &str, code: &[u8]) -> error::Result<()> {
        let mut reader = code;
        self.process_source(path, &mut reader)
    }
}

/// Definition of a word handler function.  This is the function that is called when a word is to be
/// executed.  Can be a lambda, a callable object or a Rust function.
pub type WordHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<()>;

/// Simplify registering a native word.
///
/// Required parameters are, the dictionary or interpreter to register with.  The name of the word
/// to register.  The word function handler to execute for the word.  A simple description of the
/// word.  As well as the word's stack signature.
#[macro_export]
macro_rules! add_native_word {
    (
        $target:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        // Import the necessary items for the macro to work.
        use std::rc::Rc;
        use $crate::runtime::data_structures::dictionary::WordType;

        // Register the word while recording where in the source code the word was registered
        // from.
        $target.add_word(
            $crate::location_here!(),
            Vec::from($name),
            Rc::new($function),
            $description.to_string(),
            $signature.to_string(),
            WordType::Native,
        );
    }};
}

/// Trait for managing and executing words known to the interpreter.
pub trait WordManagement {
    /// If currently set, this represents the current executing location in the original source
    /// code.
    fn current_location(&self) -> &Option<SourceLocation>;

    /// Add a new word to the interpreter's dictionary.  This can be a native word or a scripted
    /// word.
    fn add_word(
        &mut self,
        location: SourceLocation,
        name: Vec<u8>,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
        word_type: WordType,
    );

    /// The interpreter's dictionary of words.
    fn dictionary(&self) -> &Dictionary;

    /// Find a word in the interpreter's dictionary by name.
    fn find_word(&self, word: &[u8]) -> Option<&WordInfo> {
        self.dictionary().try_get(word)
    }

    /// The current script execution call stack.
    fn call_stack(&self) -> &CallStack;
}

/// The full interface that words are given to work with.
pub trait Interpreter: InterpreterStack + WordManagement + CodeManagement {
    /// Where output from words like `print` is written.
    fn output(&mut self) -> &mut dyn Write;
}
