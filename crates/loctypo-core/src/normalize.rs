//! Line normalization.
//!
//! Turns one raw localization line into the raw word fields that follow its
//! key. Comments, magic words (`[GetName]`, `§Ycolored§!`) and punctuation
//! that separates words are removed here; per-word cleanup lives in
//! [`crate::filter`].

/// Delimiter pairs removed from every line, in the order they are applied.
pub const MAGIC_DELIMITERS: &[(char, char)] = &[('[', ']'), ('§', '§')];

/// Remove every magic word delimited by `open` … `close` from `line`.
///
/// Repeatedly finds the first `open`, then the first `close` after it, and
/// deletes the inclusive span, restarting from the beginning of the shortened
/// string. Stops as soon as an opener has no closer after it; that opener and
/// everything after it are left untouched.
///
/// ```
/// use loctypo_core::normalize::strip_magic_word;
///
/// assert_eq!(strip_magic_word("Go to [GetDestination] now", '[', ']'), "Go to  now");
/// assert_eq!(strip_magic_word("open [ only", '[', ']'), "open [ only");
/// ```
pub fn strip_magic_word(line: &str, open: char, close: char) -> String {
    let mut result = line.to_string();
    loop {
        let Some(start) = result.find(open) else {
            break;
        };
        let after_open = start + open.len_utf8();
        let Some(offset) = result[after_open..].find(close) else {
            break;
        };
        let end = after_open + offset + close.len_utf8();
        result.replace_range(start..end, "");
    }
    result
}

/// Split `text` into lines ending in `\n`, `\r\n` or a lone `\r`.
///
/// Behaves like [`str::lines`] otherwise: terminators are not returned and a
/// final terminator does not produce a trailing empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
        let line = &rest[..end];
        rest = &rest[end..];
        rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix(['\r', '\n']))
            .unwrap_or(rest);
        Some(line)
    })
}

/// Normalize a raw line and split it into word fields, dropping the key.
///
/// The returned fields are not yet cleaned: they may be empty or carry
/// boundary punctuation. A line holding only a key (or nothing) yields an
/// empty vector.
pub fn clean_line(line: &str) -> Vec<String> {
    let line = match line.find('#') {
        Some(comment) => &line[..comment],
        None => line,
    };

    let mut line = line.to_string();
    for &(open, close) in MAGIC_DELIMITERS {
        line = strip_magic_word(&line, open, close);
    }

    let line = line
        .trim()
        .replace('\n', " ")
        .replace("\\n", " ")
        .replace(['-', '—', '–'], " ")
        .replace("...", " ")
        .replace(['‘', '’'], "'");

    // first field is the localization key
    line.split(' ').skip(1).map(str::to_string).collect()
}
