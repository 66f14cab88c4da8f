use std::{ fmt::{ self,
                  Display,
                  Formatter },
           io::{ self,
                 Bytes,
                 Read } };



/// The location in the source code where a token was found.  This structure is used all over the
/// interpreter to keep track where important things are found in the source code.  This is used
/// extensively in the error reporting.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, Debug, PartialEq, PartialOrd, Eq, Hash)]
pub struct SourceLocation
{
    /// Either the path to the file or a description of the source code.  For example code read
    /// from standard input will have a tag of "\<stdin\>".
    path: String,

    /// The 1 based line number in the source code where the token was found.
    line: usize,

    /// The 1 based column number in the source code where the token was found.
    column: usize
}


/// Used for error reporting to show where in the source code an error originated.
impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl Default for SourceLocation
{
    fn default() -> Self
    {
        Self::new()
    }
}


impl SourceLocation
{
    /// Crate a new SourceLocation with default values.
    pub fn new() -> SourceLocation
    {
        SourceLocation { path: "unspecified".to_string(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation pointing at the start of the source code.
    pub fn new_from_path(path: &str) -> Self
    {
        SourceLocation { path: path.to_owned(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.  This is useful in
    /// conjunction with the location_here! macro.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }

    /// The path to the source code or a meaningful description of the source code.
    pub fn path(&self) -> &String
    {
        &self.path
    }

    /// The 1 based line number in the source code.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// The 1 based column number in the source code.
    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// Helper macro to get the location of the macro invocation.  Native words record where in the
/// Rust code they were registered from with this.
#[macro_export]
macro_rules! location_here
{
    () =>
    {
        $crate::lang::source_buffer::SourceLocation::new_from_info(file!(),
                                                                   line!() as usize,
                                                                   column!() as usize)
    };
}



/// A buffer for pulling source bytes out of a reader.  This acts as a forward only iterator over
/// the code, one byte at a time.  As bytes are consumed the location of the cursor in that source
/// is maintained, which lets the tokenizer stamp every token with where it started.
///
/// At most one byte is held back, the one handed out by `peek_next` and not yet consumed.
pub struct SourceBuffer<R: Read>
{
    /// The bytes of the source being processed.
    bytes: Bytes<R>,

    /// The logical location of the cursor in the source code.  This is the location of the next
    /// byte to be consumed.
    location: SourceLocation,

    /// A byte that was peeked at but not yet consumed.
    current: Option<u8>
}


impl<R: Read> SourceBuffer<R>
{
    /// Create a new SourceBuffer with the path to, or meaningful tag for the source code and the
    /// reader the code is pulled from.
    pub fn new(path: &str, source: R) -> Self
    {
        SourceBuffer
            {
                bytes: source.bytes(),
                location: SourceLocation::new_from_path(path),
                current: None
            }
    }

    /// The location the cursor is at in the source code being processed.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Take a peek at the next byte in the source code without consuming it.
    pub fn peek_next(&mut self) -> io::Result<Option<u8>>
    {
        if self.current.is_none()
        {
            self.current = self.bytes.next().transpose()?;
        }

        Ok(self.current)
    }

    /// Get and consume the next byte in the source code.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>>
    {
        let next = match self.current.take()
            {
                Some(current) => Some(current),
                None => self.bytes.next().transpose()?
            };

        if let Some(next_byte) = next
        {
            self.increment_location(next_byte);
        }

        Ok(next)
    }

    /// Increment the location based on the next byte.  Advance one column for regular bytes.
    /// Reset the column to 1 and increment the line for new line characters.
    fn increment_location(&mut self, next: u8)
    {
        if next == b'\n'
        {
            self.location.line += 1;
            self.location.column = 1;
        }
        else
        {
            self.location.column += 1;
        }
    }
}



#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn tracks_lines_and_columns()
    {
        let mut buffer = SourceBuffer::new("<test>", "ab\nc".as_bytes());

        assert_eq!(buffer.next_byte().unwrap(), Some(b'a'));
        assert_eq!(buffer.next_byte().unwrap(), Some(b'b'));
        assert_eq!(buffer.location().column(), 3);

        assert_eq!(buffer.next_byte().unwrap(), Some(b'\n'));
        assert_eq!(buffer.location().line(), 2);
        assert_eq!(buffer.location().column(), 1);
    }

    #[test]
    fn peeking_does_not_move_the_cursor()
    {
        let mut buffer = SourceBuffer::new("<test>", "xy".as_bytes());

        assert_eq!(buffer.peek_next().unwrap(), Some(b'x'));
        assert_eq!(buffer.peek_next().unwrap(), Some(b'x'));
        assert_eq!(buffer.location().column(), 1);

        assert_eq!(buffer.next_byte().unwrap(), Some(b'x'));
        assert_eq!(buffer.next_byte().unwrap(), Some(b'y'));
        assert_eq!(buffer.next_byte().unwrap(), None);
        assert_eq!(buffer.peek_next().unwrap(), None);
    }
}
