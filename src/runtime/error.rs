
use std::{ error::Error,
           fmt::{ self, Debug, Display, Formatter },
           io };
use crate::{ runtime::{ data_structures::cell::CellKind,
                        interpreter::CallStack },
             lang::source_buffer::SourceLocation };

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// The kinds of failure a script can run into.  Syntax errors come out of the tokenizer, stack
/// errors out of the value stack and the rest out of word dispatch and the built-in words.
#[derive(thiserror::Error, Debug)]
pub enum ErrorKind
{
    /// Malformed source text, a missing closing bracket or an unexpected character.
    #[error("{message}")]
    Syntax { message: String },

    /// A push was attempted on a full stack.
    #[error("Stack overflow, all {capacity} cells are in use.")]
    StackOverflow { capacity: usize },

    /// A pop or peek was attempted on an empty stack.
    #[error("Stack underflow.")]
    StackUnderflow,

    /// The word is not in the dictionary and is not a number literal either.
    #[error("Unknown word {word}.")]
    UnknownWord { word: String },

    /// A word popped an operand of the wrong kind.
    #[error("Word {word} expected its {operand} operand to be {expected}, found {found}.")]
    OperandKind { word: String, operand: &'static str, expected: CellKind, found: CellKind },

    /// The stack ran dry while a word was collecting its operands.
    #[error("Word {word} is missing its {operand} operand.")]
    MissingOperand { word: String, operand: &'static str },

    /// Integer division or remainder with a zero divisor.
    #[error("Word {word} attempted to divide by zero.")]
    DivisionByZero { word: String },

    /// Reading the source or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error)
}



/// Any error that occurs during the execution of a script.
pub struct ScriptError
{
    /// The location in the source code the error occurred, if available.
    location: Option<SourceLocation>,

    /// What went wrong.
    kind: ErrorKind,

    /// The script's call stack at the time of the error, if available.
    call_stack: Option<CallStack>
}


impl Error for ScriptError
{
    fn source(&self) -> Option<&(dyn Error + 'static)>
    {
        match &self.kind
        {
            ErrorKind::Io(error) => Some(error),
            _ => None
        }
    }
}


/// Pretty print the ScriptError for debugging the error that occurred within the script.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}", location, self.kind)?,
            None => write!(f, "{}", self.kind)?
        }

        if let Some(call_stack) = &self.call_stack
            && !call_stack.is_empty()
        {
            write!(f, "\n\nCall stack\n")?;

            for item in call_stack.iter().rev()
            {
                writeln!(f, "  {}", item)?;
            }
        }

        Ok(())
    }
}


/// Debug output is the same as the user facing output, this is what shows up when a test unwraps
/// a failed run.
impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(location: Option<SourceLocation>,
               kind: ErrorKind,
               call_stack: Option<CallStack>) -> ScriptError
    {
        ScriptError
            {
                location,
                kind,
                call_stack
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(location: Option<SourceLocation>,
                            kind: ErrorKind,
                            call_stack: Option<CallStack>) -> Result<T>
    {
        Err(ScriptError::new(location, kind, call_stack))
    }

    /// If available, the location in the source code the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// The description of the error.
    pub fn kind(&self) -> &ErrorKind
    {
        &self.kind
    }

    /// If available, the script's call stack at the time of the error.
    pub fn call_stack(&self) -> &Option<CallStack>
    {
        &self.call_stack
    }

    /// Fill in the location and call stack if the error was raised somewhere that couldn't know
    /// them, like the value stack.  Information that is already present is kept, it is closer to
    /// where the error actually happened.
    pub fn with_context(mut self, location: &SourceLocation, call_stack: &CallStack) -> Self
    {
        if self.location.is_none()
        {
            self.location = Some(location.clone());
        }

        if self.call_stack.is_none()
        {
            self.call_stack = Some(call_stack.clone());
        }

        self
    }
}


impl From<ErrorKind> for ScriptError
{
    fn from(kind: ErrorKind) -> ScriptError
    {
        ScriptError::new(None, kind, None)
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<io::Error> for ScriptError
{
    fn from(error: io::Error) -> ScriptError
    {
        ScriptError::new(None, ErrorKind::Io(error), None)
    }
}



/// A convenience function for creating a ScriptError and wrapping in in a Result::Err using the
/// interpreter's current location and call stack.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind) -> Result<T>
{
    let location = interpreter.current_location().clone();
    let call_stack = interpreter.call_stack().clone();

    ScriptError::new_as_result(location, kind, Some(call_stack))
}
