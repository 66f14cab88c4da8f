use std::{ io::{ stdout,
                 Read,
                 Stdout,
                 Write },
           rc::Rc };
use crate::{ lang::{ source_buffer::SourceLocation,
                     tokenizing::{ Token,
                                   TokenStream } },
             runtime::{ data_structures::{ cell::{ Cell,
                                                   CellKind },
                                           dictionary::{ Dictionary,
                                                         WordType },
                                           stack::Stack },
                        error::{ self,
                                 script_error,
                                 ErrorKind,
                                 ScriptError },
                        interpreter::{ CallItem,
                                       CallStack,
                                       CodeManagement,
                                       Interpreter,
                                       InterpreterStack,
                                       WordHandler,
                                       WordManagement } } };



/// The core interpreter implementation.  It owns its stack, dictionary and output sink outright,
/// separate interpreters share nothing.
///
/// Source code is executed as it is tokenized, one token at a time.  There is no compiled form of
/// anything, quotations are run by handing their text back to `process_text`.
pub struct QuillInterpreter<W: Write = Stdout>
{
    /// The data stack used by the interpreter.
    stack: Stack,

    /// The dictionary of words known by the interpreter.
    dictionary: Dictionary,

    /// Where words write their output.
    output: W,


    /// The last known location execution has reached in the original source code.
    current_location: Option<SourceLocation>,

    /// The call stack used to keep track of the current execution context.
    call_stack: CallStack
}


impl<W: Write> InterpreterStack for QuillInterpreter<W>
{
    fn stack(&self) -> &Stack
    {
        &self.stack
    }

    fn push(&mut self, cell: Cell) -> error::Result<()>
    {
        self.stack.push(cell)
    }

    fn pop(&mut self) -> error::Result<Cell>
    {
        self.stack.pop()
    }

    fn peek(&self) -> error::Result<&Cell>
    {
        self.stack.peek()
    }

    fn pop_operand(&mut self, word: &str, operand: &'static str) -> error::Result<Cell>
    {
        match self.stack.pop()
        {
            Ok(cell) => Ok(cell),
            Err(_) => script_error(self, ErrorKind::MissingOperand { word: word.to_string(),
                                                                     operand })
        }
    }

    fn pop_as_uint8(&mut self, word: &str, operand: &'static str) -> error::Result<u8>
    {
        let cell = self.pop_operand(word, operand)?;

        self.expect_kind(&cell, word, operand, CellKind::Uint8)?;
        Ok(cell.as_uint8())
    }

    fn pop_as_bytes(&mut self, word: &str, operand: &'static str) -> error::Result<Vec<u8>>
    {
        let cell = self.pop_operand(word, operand)?;

        self.expect_kind(&cell, word, operand, CellKind::Bytes)?;
        Ok(cell.as_bytes().to_vec())
    }

    fn pop_as_quotation(&mut self, word: &str, operand: &'static str)
        -> error::Result<Vec<u8>>
    {
        let cell = self.pop_operand(word, operand)?;

        self.expect_kind(&cell, word, operand, CellKind::Quotation)?;
        Ok(cell.as_quotation().to_vec())
    }
}


impl<W: Write> CodeManagement for QuillInterpreter<W>
{
    fn process_source(&mut self, path: &str, source: &mut dyn Read) -> error::Result<()>
    {
        tracing::trace!(path, depth = self.call_stack.len(), "processing source");

        let mut stream = TokenStream::new(path, source);

        while let Some(token) = stream
            .next_token()
            .map_err(|error| error.with_context(stream.location(), &self.call_stack))?
        {
            self.dispatch(token)?;
        }

        Ok(())
    }
}


impl<W: Write> WordManagement for QuillInterpreter<W>
{
    fn current_location(&self) -> &Option<SourceLocation>
    {
        &self.current_location
    }

    fn add_word(&mut self,
                location: SourceLocation,
                name: Vec<u8>,
                handler: Rc<WordHandler>,
                description: String,
                signature: String,
                word_type: WordType)
    {
        self.dictionary.add_word(location, name, handler, description, signature, word_type);
    }

    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    fn call_stack(&self) -> &CallStack
    {
        &self.call_stack
    }
}


impl<W: Write> Interpreter for QuillInterpreter<W>
{
    fn output(&mut self) -> &mut dyn Write
    {
        &mut self.output
    }
}


// Helper methods for the dispatch loop.
impl<W: Write> QuillInterpreter<W>
{
    /// Act on one token.  Errors that don't know where they happened yet are stamped with the
    /// token's location.
    fn dispatch(&mut self, token: Token) -> error::Result<()>
    {
        tracing::trace!(?token, depth = self.stack.len(), "dispatch");

        let location = token.location().clone();

        let result = match token
            {
                Token::Quotation(_, code) => self.stack.push(Cell::quotation(code)),
                Token::Text(_, text) => self.stack.push(Cell::bytes(text)),
                Token::Word(_, name) => self.dispatch_word(&location, &name)
            };

        result.map_err(|error| error.with_context(&location, &self.call_stack))
    }

    /// Run the word if the dictionary knows it, otherwise try it as a number literal.
    fn dispatch_word(&mut self, location: &SourceLocation, name: &[u8]) -> error::Result<()>
    {
        let found = self.dictionary
                        .try_get(name)
                        .map(|word| (word.display_name(), word.handler.clone()));

        if let Some((word_name, handler)) = found
        {
            return self.execute_handler(location, word_name, handler);
        }

        match to_uint8(name)
        {
            Some(value) => self.stack.push(Cell::uint8(value)),
            None => ScriptError::new_as_result(Some(location.clone()),
                                               ErrorKind::UnknownWord
                                                   {
                                                       word: String::from_utf8_lossy(name)
                                                                 .into_owned()
                                                   },
                                               Some(self.call_stack.clone()))
        }
    }

    /// Call a word's handler, keeping the call stack and current location up to date around the
    /// call.
    fn execute_handler(&mut self,
                       location: &SourceLocation,
                       name: String,
                       handler: Rc<WordHandler>) -> error::Result<()>
    {
        let previous_location = self.current_location.replace(location.clone());

        self.call_stack.push(CallItem::new(name, location.clone()));

        let result = (*handler)(self);

        let _ = self.call_stack.pop();
        self.current_location = previous_location;

        result
    }

    fn expect_kind(&self,
                   cell: &Cell,
                   word: &str,
                   operand: &'static str,
                   expected: CellKind) -> error::Result<()>
    {
        if cell.kind() != expected
        {
            script_error(self, ErrorKind::OperandKind { word: word.to_string(),
                                                        operand,
                                                        expected,
                                                        found: cell.kind() })?;
        }

        Ok(())
    }
}


/// Number literals are plain decimal digits with a value that fits in a byte.  Signs, prefixes and
/// separators are not accepted.
fn to_uint8(text: &[u8]) -> Option<u8>
{
    if text.is_empty() || !text.iter().all(u8::is_ascii_digit)
    {
        return None;
    }

    std::str::from_utf8(text).ok()?.parse().ok()
}


impl<W: Write> QuillInterpreter<W>
{
    /// Create an interpreter from its parts.  The dictionary decides which words are available,
    /// use `Dictionary::with_builtin_words` for the standard set.
    pub fn new(stack: Stack, dictionary: Dictionary, output: W) -> QuillInterpreter<W>
    {
        QuillInterpreter
            {
                stack,
                dictionary,
                output,

                current_location: None,
                call_stack: CallStack::with_capacity(40)
            }
    }

    /// Create an interpreter with a default sized stack and the builtin words, writing to the
    /// given output.
    pub fn with_output(output: W) -> QuillInterpreter<W>
    {
        Self::new(Stack::default(), Dictionary::with_builtin_words(), output)
    }

    /// Access the output sink, tests use this to look at what a script printed.
    pub fn output_ref(&self) -> &W
    {
        &self.output
    }

    /// Tear down the interpreter, handing back the output sink.
    pub fn into_output(self) -> W
    {
        self.output
    }
}


impl Default for QuillInterpreter<Stdout>
{
    fn default() -> Self
    {
        Self::with_output(stdout())
    }
}



#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn number_literals()
    {
        assert_eq!(to_uint8(b"0"), Some(0));
        assert_eq!(to_uint8(b"007"), Some(7));
        assert_eq!(to_uint8(b"255"), Some(255));
        assert_eq!(to_uint8(b"256"), None);
        assert_eq!(to_uint8(b"+1"), None);
        assert_eq!(to_uint8(b"-1"), None);
        assert_eq!(to_uint8(b"0x10"), None);
        assert_eq!(to_uint8(b""), None);
    }

    #[test]
    fn errors_are_stamped_with_the_token_location()
    {
        let mut interpreter = QuillInterpreter::with_output(Vec::new());
        let error = interpreter.process_text("<test>", b"1\n  drop drop").unwrap_err();

        assert!(matches!(error.kind(), ErrorKind::StackUnderflow));

        let location = error.location().clone().unwrap();
        assert_eq!((location.line(), location.column()), (2, 8));
    }

    #[test]
    fn call_stack_is_unwound_after_a_word()
    {
        let mut interpreter = QuillInterpreter::with_output(Vec::new());

        interpreter.process_text("<test>", b"1 2 +").unwrap();

        assert!(interpreter.call_stack().is_empty());
        assert!(interpreter.current_location().is_none());
    }

    #[test]
    fn nested_errors_keep_the_innermost_location()
    {
        let mut interpreter = QuillInterpreter::with_output(Vec::new());
        let error = interpreter.process_text("<test>", b"2 [1 0 /] loop").unwrap_err();

        assert!(matches!(error.kind(), ErrorKind::DivisionByZero { .. }));
        assert_eq!(error.location().as_ref().unwrap().path(), "<quotation>");

        let call_stack = error.call_stack().as_ref().unwrap();
        let words: Vec<&str> = call_stack.iter().map(|item| item.word().as_str()).collect();

        assert_eq!(words, vec!["loop", "/"]);
    }
}
