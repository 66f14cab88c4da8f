use std::{ fmt::{ self,
                  Display,
                  Formatter },
           slice };



/// The kind of value a cell holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind
{
    /// Unevaluated source code.
    Quotation,

    /// A single unsigned byte, 0 to 255.
    Uint8,

    /// A sequence of raw bytes.
    Bytes
}


impl Display for CellKind
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        let label = match self
            {
                CellKind::Quotation => "quotation",
                CellKind::Uint8 => "uint8",
                CellKind::Bytes => "bytes"
            };

        write!(f, "{}", label)
    }
}



/// Core value enumeration used by the interpreter.  Every value that lives on the stack is a
/// cell.
///
/// The accessors `as_uint8`, `as_bytes` and `as_quotation` panic when used on the wrong kind of
/// cell.  Check with `kind` first, words do this through the interpreter's `pop_as_*` methods.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Cell
{
    /// Source code kept as text.  It's tokenized again every time it is executed.
    Quotation(Vec<u8>),

    /// A single byte value.
    Uint8(u8),

    /// Raw bytes, usually from a text literal.
    Bytes(Vec<u8>)
}


impl Cell
{
    /// Wrap source code as a quotation cell.
    pub fn quotation(code: impl Into<Vec<u8>>) -> Cell
    {
        Cell::Quotation(code.into())
    }

    /// Create a single byte cell.
    pub fn uint8(value: u8) -> Cell
    {
        Cell::Uint8(value)
    }

    /// Create a raw bytes cell.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Cell
    {
        Cell::Bytes(data.into())
    }

    /// What kind of value does this cell hold?
    pub fn kind(&self) -> CellKind
    {
        match self
        {
            Cell::Quotation(_) => CellKind::Quotation,
            Cell::Uint8(_) => CellKind::Uint8,
            Cell::Bytes(_) => CellKind::Bytes
        }
    }

    /// The raw bytes held by the cell, regardless of kind.  A uint8 cell is its single byte.
    pub fn payload(&self) -> &[u8]
    {
        match self
        {
            Cell::Quotation(code) => code,
            Cell::Uint8(value) => slice::from_ref(value),
            Cell::Bytes(data) => data
        }
    }

    /// The byte held by a uint8 cell.  Panics for any other kind.
    pub fn as_uint8(&self) -> u8
    {
        match self
        {
            Cell::Uint8(value) => *value,
            _ => self.kind_mismatch(CellKind::Uint8)
        }
    }

    /// The bytes held by a bytes cell.  Panics for any other kind.
    pub fn as_bytes(&self) -> &[u8]
    {
        match self
        {
            Cell::Bytes(data) => data,
            _ => self.kind_mismatch(CellKind::Bytes)
        }
    }

    /// The code held by a quotation cell.  Panics for any other kind.
    pub fn as_quotation(&self) -> &[u8]
    {
        match self
        {
            Cell::Quotation(code) => code,
            _ => self.kind_mismatch(CellKind::Quotation)
        }
    }

    fn kind_mismatch(&self, expected: CellKind) -> !
    {
        panic!("Cell should be of kind {} instead of {}.", expected, self.kind());
    }
}


/// Show the cell the way it would be written in source code.
impl Display for Cell
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Cell::Quotation(code) => write!(f, "[{}]", String::from_utf8_lossy(code)),
            Cell::Uint8(value) => write!(f, "{}", value),
            Cell::Bytes(data) => write!(f, "{:?}", String::from_utf8_lossy(data))
        }
    }
}


impl fmt::Debug for Cell
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{} {}", self.kind(), self)
    }
}



#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn payload_of_each_kind()
    {
        assert_eq!(Cell::uint8(0x69).payload(), &[0x69]);
        assert_eq!(Cell::bytes("hi").payload(), b"hi");
        assert_eq!(Cell::quotation("dup print").payload(), b"dup print");
    }

    #[test]
    fn accessors_match_kind()
    {
        assert_eq!(Cell::uint8(7).as_uint8(), 7);
        assert_eq!(Cell::bytes(vec![1, 2]).as_bytes(), &[1, 2]);
        assert_eq!(Cell::quotation("noop").as_quotation(), b"noop");
        assert_eq!(Cell::quotation("noop").kind(), CellKind::Quotation);
    }

    #[test]
    #[should_panic(expected = "Cell should be of kind uint8 instead of bytes.")]
    fn wrong_kind_access_panics()
    {
        let _ = Cell::bytes("7").as_uint8();
    }

    #[test]
    fn display_reads_like_source()
    {
        assert_eq!(Cell::uint8(42).to_string(), "42");
        assert_eq!(Cell::bytes("hi").to_string(), "\"hi\"");
        assert_eq!(Cell::quotation("1 +").to_string(), "[1 +]");
    }
}
