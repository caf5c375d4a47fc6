//! A module implementing lexical analysis (tokenization) of a command line.
//!
//! Words are separated by plain spaces. A backslash escapes the character that
//! follows it when that character is a space or another backslash:
//!
//! - `\ ` keeps the space inside the current word,
//! - `\\` stands for a single backslash,
//! - any other backslash is kept as is.
//!
//! Escapes are resolved left to right in a single pass, so `\\ ` is a backslash
//! ending a word, while `\\\ ` is a backslash followed by a literal space.

use std::iter::Peekable;
use std::str::Chars;

const SEPARATOR: char = ' ';
const ESCAPE: char = '\\';

/// Lazy iterator over the words of a command line.
///
/// Created by [`tokens`]. Never yields an empty word.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            chars: line.chars().peekable(),
        }
    }

    fn skip_separators(&mut self) {
        while self.chars.next_if_eq(&SEPARATOR).is_some() {}
    }
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_separators();
        self.chars.peek()?;

        let mut word = String::new();
        while let Some(ch) = self.chars.next() {
            match ch {
                SEPARATOR => break,
                ESCAPE => {
                    let escaped = self
                        .chars
                        .next_if(|&next| next == SEPARATOR || next == ESCAPE);
                    word.push(escaped.unwrap_or(ESCAPE));
                }
                c => word.push(c),
            }
        }
        Some(word)
    }
}

/// Iterate over the words of `line` without allocating them up front.
pub fn tokens(line: &str) -> Tokens<'_> {
    Tokens::new(line)
}

/// Split `line` into words, resolving backslash escapes.
///
/// # Examples
/// ```
/// use myshell::lexer::tokenize;
/// assert_eq!(tokenize(r"cd my\ files"), vec!["cd", "my files"]);
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    tokens(line).collect()
}
