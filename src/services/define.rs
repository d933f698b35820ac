//! In-bundle constant substitution.
//!
//! Replaces free identifiers (and dotted paths such as `process.env.MODE`)
//! with the code literal declared for them. Member accesses (`obj.DEV`),
//! string literals and comments are left alone.

use crate::domain::models::DefineEntries;

/// Compiled define table for one resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefineTable {
    entries: DefineEntries,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    Quoted(char),
    LineComment,
    BlockComment,
}

impl DefineTable {
    pub const fn new(entries: DefineEntries) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every define to `source`.
    pub fn substitute(&self, source: &str) -> String {
        if self.entries.is_empty() {
            return source.to_string();
        }

        let chars: Vec<char> = source.chars().collect();
        let mut out = String::with_capacity(source.len());
        let mut state = Scan::Code;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();
            match state {
                Scan::Quoted(quote) => {
                    out.push(c);
                    if c == '\\' {
                        if let Some(escaped) = next {
                            out.push(escaped);
                            i += 1;
                        }
                    } else if c == quote {
                        state = Scan::Code;
                    }
                    i += 1;
                }
                Scan::LineComment => {
                    out.push(c);
                    if c == '\n' {
                        state = Scan::Code;
                    }
                    i += 1;
                }
                Scan::BlockComment => {
                    out.push(c);
                    if c == '*' && next == Some('/') {
                        out.push('/');
                        state = Scan::Code;
                        i += 1;
                    }
                    i += 1;
                }
                Scan::Code => {
                    if matches!(c, '"' | '\'' | '`') {
                        state = Scan::Quoted(c);
                        out.push(c);
                        i += 1;
                    } else if c == '/' && next == Some('/') {
                        state = Scan::LineComment;
                        out.push(c);
                        i += 1;
                    } else if c == '/' && next == Some('*') {
                        state = Scan::BlockComment;
                        out.push_str("/*");
                        i += 2;
                    } else if is_ident_start(c) && !follows_member_access(&chars, i) {
                        i = self.substitute_path(&chars, i, &mut out);
                    } else {
                        out.push(c);
                        i += 1;
                    }
                }
            }
        }
        out
    }

    /// Read the dotted identifier path starting at `start`, replace its longest
    /// defined prefix and return the index after the path.
    fn substitute_path(&self, chars: &[char], start: usize, out: &mut String) -> usize {
        // End offsets of each dotted segment: `a`, `a.b`, `a.b.c`.
        let mut ends = Vec::new();
        let mut i = start;
        loop {
            while i < chars.len() && is_ident_continue(chars[i]) {
                i += 1;
            }
            ends.push(i);
            if i + 1 < chars.len() && chars[i] == '.' && is_ident_start(chars[i + 1]) {
                i += 1;
            } else {
                break;
            }
        }

        let path: String = chars[start..i].iter().collect();
        for &end in ends.iter().rev() {
            let candidate = &path[..char_offset(&path, end - start)];
            if let Some(replacement) = self.get(candidate) {
                out.push_str(replacement);
                out.push_str(&path[candidate.len()..]);
                return i;
            }
        }
        out.push_str(&path);
        i
    }
}

impl From<DefineEntries> for DefineTable {
    fn from(entries: DefineEntries) -> Self {
        Self::new(entries)
    }
}

const fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

const fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Whether the identifier at `i` is preceded by `.` or glued to a previous token.
fn follows_member_access(chars: &[char], i: usize) -> bool {
    if i == 0 {
        return false;
    }
    let prev = chars[i - 1];
    if is_ident_continue(prev) {
        return true;
    }
    let mut j = i;
    while j > 0 && chars[j - 1].is_whitespace() {
        j -= 1;
    }
    j > 0 && chars[j - 1] == '.'
}

/// Byte offset of the `n`th char of `s`.
fn char_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(offset, _)| offset)
}
