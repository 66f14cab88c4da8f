use crate::{ lang::source_buffer::SourceLocation,
             runtime::{ built_ins::register_builtin_words,
                        interpreter::WordHandler } };
use std::{
    collections::HashSet,
    fmt::{self, Display, Formatter},
    rc::Rc,
    slice::Iter,
};

/// The type of a word in the dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordType {
    /// The word is a native word written in Rust.
    Native,

    /// The word was created by a script with `define`.
    Scripted,
}

/// The information stored in the dictionary for each word.
#[derive(Clone)]
pub struct WordInfo {
    /// The location in the source code where the word was defined.
    pub location: SourceLocation,

    /// The name of the word.
    pub name: Vec<u8>,

    /// What kind of word is it?
    pub word_type: WordType,

    /// A simple description of the word.
    pub description: String,

    /// The stack signature of the word.
    pub signature: String,

    /// The code that runs when the word is executed.
    pub handler: Rc<WordHandler>,
}

impl WordInfo {
    /// The name of the word for display, any bytes that aren't valid UTF-8 are replaced.
    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }
}

/// The dictionary used by the interpreter to keep track of all of the words it knows.
///
/// The dictionary is an append only log.  Looking up a name scans from the newest word to the
/// oldest, so defining a name again shadows the earlier definitions without removing them.
#[derive(Clone, Default)]
pub struct Dictionary {
    words: Vec<WordInfo>,
}

/// Pretty print the dictionary.  Only the reachable version of each word is listed.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let visible = self.visible_words();
        let max_size = visible
            .iter()
            .map(|word| word.display_name().len())
            .max()
            .unwrap_or(0);

        writeln!(formatter, "{} words defined.\n", visible.len())?;

        for word in visible.iter() {
            let word_type = match word.word_type {
                WordType::Native => "native",
                WordType::Scripted => "scripted",
            };

            writeln!(
                formatter,
                "{:width$}  {:8}  {:20}  --  {}",
                word.display_name(),
                word_type,
                word.signature,
                word.description,
                width = max_size
            )?;
        }

        Ok(())
    }
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary { words: Vec::new() }
    }

    /// Create a dictionary seeded with the builtin words of the language.
    pub fn with_builtin_words() -> Dictionary {
        let mut dictionary = Dictionary::new();

        register_builtin_words(&mut dictionary);
        dictionary
    }

    /// Append a word.  It wins over every earlier word with the same name from now on.
    pub fn insert(&mut self, word: WordInfo) {
        self.words.push(word);
    }

    /// Build and append a word from its parts.  This mirrors the interpreter's `add_word` so that
    /// the `add_native_word!` macro can target either one.
    pub fn add_word(
        &mut self,
        location: SourceLocation,
        name: Vec<u8>,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
        word_type: WordType,
    ) {
        self.insert(WordInfo {
            location,
            name,
            word_type,
            description,
            signature,
            handler,
        });
    }

    /// Try to get a word from the dictionary, returning only the newest version of the word if
    /// found.
    pub fn try_get(&self, name: &[u8]) -> Option<&WordInfo> {
        self.words.iter().rev().find(|word| word.name == name)
    }

    /// The number of stored words, shadowed ones included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Walk every stored word from the oldest to the newest.
    pub fn iter(&self) -> Iter<'_, WordInfo> {
        self.words.iter()
    }

    /// The reachable version of each word, sorted by name.
    fn visible_words(&self) -> Vec<&WordInfo> {
        let mut seen = HashSet::new();
        let mut visible: Vec<&WordInfo> = self
            .words
            .iter()
            .rev()
            .filter(|word| seen.insert(word.name.as_slice()))
            .collect();

        visible.sort_by(|a, b| a.name.cmp(&b.name));
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        location_here,
        runtime::{error, interpreter::Interpreter},
    };

    fn word(name: &str, description: &str) -> WordInfo {
        WordInfo {
            location: location_here!(),
            name: name.as_bytes().to_vec(),
            word_type: WordType::Scripted,
            description: description.to_string(),
            signature: String::new(),
            handler: Rc::new(|_: &mut dyn Interpreter| -> error::Result<()> { Ok(()) }),
        }
    }

    #[test]
    fn newest_definition_wins() {
        let mut dictionary = Dictionary::new();

        for version in 0..5 {
            dictionary.insert(word("square", &format!("version {}", version)));

            assert_eq!(
                dictionary.try_get(b"square").unwrap().description,
                format!("version {}", version)
            );
            assert_eq!(dictionary.len(), version + 1);
        }
    }

    #[test]
    fn shadowing_keeps_other_names_reachable() {
        let mut dictionary = Dictionary::new();

        dictionary.insert(word("a", "first a"));
        dictionary.insert(word("b", "only b"));
        dictionary.insert(word("a", "second a"));

        assert_eq!(dictionary.try_get(b"a").unwrap().description, "second a");
        assert_eq!(dictionary.try_get(b"b").unwrap().description, "only b");
        assert!(dictionary.try_get(b"c").is_none());
        assert_eq!(dictionary.iter().filter(|word| word.name == b"a").count(), 2);
    }

    #[test]
    fn listing_shows_each_name_once() {
        let mut dictionary = Dictionary::new();

        dictionary.insert(word("a", "first a"));
        dictionary.insert(word("a", "second a"));

        let listing = dictionary.to_string();

        assert!(listing.starts_with("1 words defined."));
        assert!(listing.contains("second a"));
        assert!(!listing.contains("first a"));
    }

    #[test]
    fn builtin_words_are_all_present() {
        let dictionary = Dictionary::with_builtin_words();

        for name in ["define", "if", "loop", "noop", "print", "dup", "drop", "+", "-", "*", "/", "%"]
        {
            let found = dictionary.try_get(name.as_bytes());

            assert!(found.is_some(), "missing {}", name);
            assert_eq!(found.unwrap().word_type, WordType::Native);
        }
    }
}
