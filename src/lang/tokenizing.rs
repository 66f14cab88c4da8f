use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::error::{self, ErrorKind, ScriptError},
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    io::Read,
};

/// A token is a simple unit of the language.  Due to the language's simplicity we only have three
/// possibilities.  The token can only be a word, a literal piece of text, or a quotation of
/// deferred code.
///
/// The token also holds the location in the original source code where it was found.  The text of
/// every token is kept as the raw bytes found in the source.
#[derive(Clone, PartialEq, Eq)]
pub enum Token {
    /// A word in the language to be executed, or a number literal.  Which one is decided when the
    /// word is dispatched.
    Word(SourceLocation, Vec<u8>),

    /// A piece of text delimited by matching single or double quotes.
    Text(SourceLocation, Vec<u8>),

    /// Code delimited by square brackets, kept unparsed.  The outer brackets are not part of the
    /// text.
    Quotation(SourceLocation, Vec<u8>),
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

/// Make sure that the tokens are nicely printable for debugging purposes.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Word(_, text) => write!(f, "{}", String::from_utf8_lossy(text)),
            Token::Text(_, text) => write!(f, "{:?}", String::from_utf8_lossy(text)),
            Token::Quotation(_, text) => write!(f, "[{}]", String::from_utf8_lossy(text)),
        }
    }
}

/// Include the original location and the kind of the token.
impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let kind = match self {
            Token::Word(_, _) => "word",
            Token::Text(_, _) => "text",
            Token::Quotation(_, _) => "quotation",
        };

        write!(f, "{}: {} {}", self.location(), kind, self)
    }
}

impl Token {
    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Token::Word(location, _) => location,
            Token::Text(location, _) => location,
            Token::Quotation(location, _) => location,
        }
    }

    /// The raw text of the token.
    pub fn text(&self) -> &[u8] {
        match self {
            Token::Word(_, text) => text,
            Token::Text(_, text) => text,
            Token::Quotation(_, text) => text,
        }
    }

    /// Check if the token is a word.
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_, _))
    }

    /// Check if the token is a piece of literal text.
    pub fn is_text(&self) -> bool {
        matches!(self, Token::Text(_, _))
    }

    /// Check if the token is a quotation.
    pub fn is_quotation(&self) -> bool {
        matches!(self, Token::Quotation(_, _))
    }
}

/// Check if the given byte is considered whitespace.
fn is_whitespace(next: u8) -> bool {
    next == b' ' || next == b'\t' || next == b'\n'
}

/// Can the byte start a word?  Any visible ASCII character except for the brackets.
fn is_word_start(next: u8) -> bool {
    (33..=126).contains(&next) && next != b'[' && next != b']'
}

/// Build a syntax error at the given location.
fn syntax_error<T>(location: &SourceLocation, message: String) -> error::Result<T> {
    ScriptError::new_as_result(Some(location.clone()), ErrorKind::Syntax { message }, None)
}

/// Lazily pulls tokens out of a source.  Each call to `next_token` reads only as many bytes as it
/// needs to produce the next token, the stream can't be rewound.
pub struct TokenStream<R: Read> {
    buffer: SourceBuffer<R>,
}

impl<R: Read> TokenStream<R> {
    /// Create a token stream over the given reader.  The path is used to tag the locations of the
    /// tokens.
    pub fn new(path: &str, source: R) -> Self {
        TokenStream {
            buffer: SourceBuffer::new(path, source),
        }
    }

    /// The location of the next byte to be read.
    pub fn location(&self) -> &SourceLocation {
        self.buffer.location()
    }

    /// Get the next token, or None once the end of the source has been reached.
    pub fn next_token(&mut self) -> error::Result<Option<Token>> {
        self.skip_whitespace()?;

        let Some(next) = self.buffer.peek_next()? else {
            return Ok(None);
        };

        let location = self.buffer.location().clone();

        match next {
            b'[' => self.process_quotation(location).map(Some),
            b'"' | b'\'' => self.process_text(location).map(Some),
            _ if is_word_start(next) => self.process_word(location).map(Some),
            _ => syntax_error(
                &location,
                format!("Unexpected character {:?}.", char::from(next)),
            ),
        }
    }

    /// Skip over whitespace in the text.  Stopping only at either the end of the source or the
    /// next non-whitespace byte.
    fn skip_whitespace(&mut self) -> error::Result<()> {
        while let Some(next) = self.buffer.peek_next()?
            && is_whitespace(next)
        {
            let _ = self.buffer.next_byte()?;
        }

        Ok(())
    }

    /// Process a quotation.  Brackets nest, the quotation only ends when the bracket that opened
    /// it is closed.  Everything between the outer brackets is kept verbatim.
    fn process_quotation(&mut self, location: SourceLocation) -> error::Result<Token> {
        let opening = self.buffer.next_byte()?;
        assert!(opening == Some(b'['));

        let mut depth = 1usize;
        let mut text = Vec::new();

        while let Some(next) = self.buffer.next_byte()? {
            match next {
                b'[' => depth += 1,
                b']' => depth -= 1,
                _ => {}
            }

            if depth == 0 {
                return Ok(Token::Quotation(location, text));
            }

            text.push(next);
        }

        // Looks like we hit the end of the source with the quotation still open.
        syntax_error(
            self.buffer.location(),
            "Missing closing bracket for quotation.".to_string(),
        )
    }

    /// Process a literal piece of text.  The text ends at the next quote of the same kind that
    /// opened it.  Hitting the end of the source first simply ends the text there.
    fn process_text(&mut self, location: SourceLocation) -> error::Result<Token> {
        let Some(quote) = self.buffer.next_byte()? else {
            unreachable!("text token started without a quote");
        };

        let mut text = Vec::new();

        while let Some(next) = self.buffer.next_byte()? {
            if next == quote {
                break;
            }

            text.push(next);
        }

        Ok(Token::Text(location, text))
    }

    /// Pull bytes out of the source until we hit whitespace or the end of the source.  Only the
    /// first byte of a word is restricted.
    fn process_word(&mut self, location: SourceLocation) -> error::Result<Token> {
        let mut text = Vec::new();

        while let Some(next) = self.buffer.peek_next()?
            && !is_whitespace(next)
        {
            let _ = self.buffer.next_byte()?;
            text.push(next);
        }

        Ok(Token::Word(location, text))
    }
}

/// Walk the stream one token at a time.  After an error has been returned the iteration should
/// be abandoned, the stream is positioned wherever the bad input left it.
impl<R: Read> Iterator for TokenStream<R> {
    type Item = error::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Tokenize a complete in memory source into a list of tokens.
pub fn tokenize_from_source(path: &str, source: &[u8]) -> error::Result<TokenList> {
    TokenStream::new(path, source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> error::Result<TokenList> {
        tokenize_from_source("<test>", source.as_bytes())
    }

    #[test]
    fn nested_quotation_is_one_token() {
        let tokens = tokenize("[a [b] c]").unwrap();

        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_quotation());
        assert_eq!(tokens[0].text(), b"a [b] c");
    }

    #[test]
    fn unterminated_quotation_fails_at_end_of_input() {
        let error = tokenize("[a").unwrap_err();

        assert!(matches!(error.kind(), ErrorKind::Syntax { .. }));

        let location = error.location().clone().unwrap();
        assert_eq!((location.line(), location.column()), (1, 3));
    }

    #[test]
    fn text_in_either_quote() {
        let tokens = tokenize("\"abc\" 'd\"e'").unwrap();

        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(Token::is_text));
        assert_eq!(tokens[0].text(), b"abc");
        assert_eq!(tokens[1].text(), b"d\"e");
    }

    #[test]
    fn unterminated_text_is_accepted() {
        let tokens = tokenize("'abc").unwrap();

        assert_eq!(tokens, vec![Token::Text(SourceLocation::new_from_path("<test>"), b"abc".to_vec())]);
    }

    #[test]
    fn words_split_on_whitespace() {
        let tokens = tokenize("  dup\tdrop\n+ a]b ").unwrap();
        let words: Vec<&[u8]> = tokens.iter().map(Token::text).collect();

        assert!(tokens.iter().all(Token::is_word));
        assert_eq!(words, vec![&b"dup"[..], &b"drop"[..], &b"+"[..], &b"a]b"[..]]);
    }

    #[test]
    fn tokens_carry_their_start_location() {
        let tokens = tokenize("1 2\n  [x]").unwrap();
        let locations: Vec<(usize, usize)> = tokens
            .iter()
            .map(|token| (token.location().line(), token.location().column()))
            .collect();

        assert_eq!(locations, vec![(1, 1), (1, 3), (2, 3)]);
    }

    #[test]
    fn stray_closing_bracket_is_unexpected() {
        let error = tokenize("1 ]").unwrap_err();

        assert!(matches!(error.kind(), ErrorKind::Syntax { .. }));

        let location = error.location().clone().unwrap();
        assert_eq!((location.line(), location.column()), (1, 3));
    }

    #[test]
    fn control_characters_are_unexpected() {
        assert!(tokenize("dup\r\n").is_ok());
        assert!(tokenize("\r").is_err());
        assert!(tokenize("\u{7}").is_err());
    }

    #[test]
    fn stream_is_lazy() {
        // The bad byte at the end is only seen once the stream gets that far.
        let mut stream = TokenStream::new("<test>", "ok ]".as_bytes());

        assert_eq!(stream.next_token().unwrap().unwrap().text(), b"ok");
        assert!(stream.next_token().is_err());
    }

    #[test]
    fn empty_source_has_no_tokens() {
        assert!(tokenize(" \n\t ").unwrap().is_empty());
    }
}
