/// Words that do arithmetic on uint8 cells.
mod simple_arithmetic_words;

/// Words that manipulate the data stack.
mod stack_words;

/// Words that create new words.
mod word_creation_words;

/// Words that decide what code runs and how often.
mod control_words;

use crate::runtime::{
    built_ins::base_words::{
        control_words::register_control_words,
        simple_arithmetic_words::register_simple_arithmetic_words,
        stack_words::register_stack_words, word_creation_words::register_word_creation_words,
    },
    data_structures::dictionary::Dictionary,
};

/// Called to register all of the core words of the language.
pub fn register_base_words(dictionary: &mut Dictionary) {
    register_stack_words(dictionary);
    register_simple_arithmetic_words(dictionary);
    register_word_creation_words(dictionary);
    register_control_words(dictionary);
}
