use serde::{Deserialize, Serialize};

/// A component of a date-format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Timezone,
}

impl DatePart {
    pub const ALL: [DatePart; 7] = [
        DatePart::Year,
        DatePart::Month,
        DatePart::Day,
        DatePart::Hour,
        DatePart::Minute,
        DatePart::Second,
        DatePart::Timezone,
    ];

    /// Format characters that render this part.
    fn tokens(self) -> &'static [char] {
        match self {
            DatePart::Year => &['Y', 'y'],
            DatePart::Month => &['F', 'M', 'm', 'n'],
            DatePart::Day => &['l', 'D', 'd', 'S', 'j', 'N', 'w', 'W', 'z'],
            DatePart::Hour => &['H', 'h', 'G', 'g'],
            DatePart::Minute => &['i'],
            DatePart::Second => &['s'],
            DatePart::Timezone => &['T', 'O', 'Z', 'P', 'e'],
        }
    }

    /// Day tokens pair up (`jS`, `D,`), everything else is a single char.
    fn max_run(self) -> usize {
        match self {
            DatePart::Day => 2,
            _ => 1,
        }
    }
}

const PUNCTUATION: [char; 5] = ['-', '/', '.', ',', ':'];

/// Removes the format characters of every part not listed in `allowed`.
///
/// Each removed token takes one leading punctuation mark and whitespace with
/// it. Characters escaped with `\` are literals and always kept. Empty
/// `()`, `[]` and `||` groups and dangling punctuation are cleaned up, and an
/// empty string is returned when nothing but escaped literals is left.
pub fn limit_format(format: &str, allowed: &[DatePart]) -> String {
    let mut format = unescape_punctuation(format);

    for part in DatePart::ALL.iter().filter(|part| !allowed.contains(part)) {
        format = strip_part(&format, part.tokens(), part.max_run());
    }

    for empty in ["()", "[]", "||"] {
        format = format.replace(empty, "");
    }

    let mut format = format.trim().to_string();
    if format.starts_with(['-', '/', '.', ',', ':', '\'']) {
        format.remove(0);
    }
    if format.ends_with(['-', '/', ',', ':', '\'']) {
        format.pop();
    }
    let format = format.replace('$', "").trim().to_string();

    if strip_escapes(&format).trim().is_empty() {
        return String::new();
    }

    format
}

fn unescape_punctuation(format: &str) -> String {
    format
        .replace("\\-", "-")
        .replace("\\:", ":")
        .replace("\\'", "'")
        .replace("\\. ", " . ")
        .replace("\\,", ",")
        .replace("\\T", " ")
        .replace('T', " ")
}

/// Drops every `\` escape along with up to three following characters.
fn strip_escapes(format: &str) -> String {
    let mut out = String::with_capacity(format.len());
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek().is_some_and(|next| !next.is_whitespace()) {
            for _ in 0..3 {
                if chars.peek().is_some_and(|next| !next.is_whitespace()) {
                    chars.next();
                } else {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }

    out
}

fn strip_part(format: &str, tokens: &[char], max_run: usize) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut out = String::with_capacity(format.len());
    let mut i = 0;

    while i < chars.len() {
        match match_token(&chars, i, tokens, max_run) {
            Some(end) => i = end,
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }

    out
}

/// Matches `[punct]?\s?token{1,max_run}` at `start`, returning the end index.
fn match_token(chars: &[char], start: usize, tokens: &[char], max_run: usize) -> Option<usize> {
    let punct_options: &[usize] = if chars.get(start).is_some_and(|c| PUNCTUATION.contains(c)) {
        &[1, 0]
    } else {
        &[0]
    };

    for &punct in punct_options {
        let after_punct = start + punct;
        let space_options: &[usize] = if chars.get(after_punct).is_some_and(|c| c.is_whitespace()) {
            &[1, 0]
        } else {
            &[0]
        };

        for &space in space_options {
            if let Some(end) = token_run(chars, after_punct + space, tokens, max_run) {
                return Some(end);
            }
        }
    }

    None
}

fn token_run(chars: &[char], start: usize, tokens: &[char], max_run: usize) -> Option<usize> {
    if start > 0 && chars[start - 1] == '\\' {
        return None;
    }

    let run = chars[start..]
        .iter()
        .take(max_run)
        .take_while(|c| tokens.contains(c))
        .count();

    (run > 0).then_some(start + run)
}
