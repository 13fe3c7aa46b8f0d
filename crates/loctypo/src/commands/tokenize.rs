//! Tokenize command: show the words extracted from each line of a file.
//!
//! Useful for checking what the normalizer keeps before trusting a scan.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use loctypo_core::config::Config;
use loctypo_core::corpus::read_corpus_file;
use loctypo_core::filter::WordCleaner;
use loctypo_core::normalize::split_lines;

/// Arguments for the `tokenize` subcommand.
#[derive(Args, Debug)]
pub struct TokenizeArgs {
    /// Localization file to tokenize.
    pub file: Utf8PathBuf,

    /// Also list lines that yield no words.
    #[arg(long)]
    pub all: bool,
}

/// Words found on one line.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct LineTokens {
    /// 1-based line number.
    line: usize,
    tokens: Vec<String>,
}

fn tokenize_text(text: &str, cleaner: &WordCleaner, all: bool) -> Vec<LineTokens> {
    split_lines(text)
        .enumerate()
        .map(|(idx, line)| LineTokens {
            line: idx + 1,
            tokens: cleaner.words(line),
        })
        .filter(|entry| all || !entry.tokens.is_empty())
        .collect()
}

/// Print the counted words of every line of `args.file`.
#[instrument(name = "cmd_tokenize", skip_all, fields(file = %args.file))]
pub fn cmd_tokenize(args: TokenizeArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = %args.file, all = args.all, "executing tokenize command");

    let text = read_corpus_file(&args.file).with_context(|| format!("failed to read {}", args.file))?;
    let lines = tokenize_text(&text, &config.word_cleaner(), args.all);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    for entry in &lines {
        println!(
            "{}: {}",
            format!("{:>5}", entry.line).dimmed(),
            entry.tokens.join(" ")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_numbered_from_one() {
        let text = "l_english:\n KEY_1:0 \"Hello, wolrd!\" # note\n KEY_2:0 \"Go to [Dest] now\"\n";
        let lines = tokenize_text(text, &WordCleaner::default(), false);
        assert_eq!(
            lines,
            vec![
                LineTokens {
                    line: 2,
                    tokens: vec!["hello".to_string(), "wolrd".to_string()],
                },
                LineTokens {
                    line: 3,
                    tokens: vec!["go".to_string(), "to".to_string(), "now".to_string()],
                },
            ]
        );
    }

    #[test]
    fn carriage_return_lines_numbered_like_newlines() {
        let text = "K: alpha\rK2: beta\r\nK3: gamma";
        let lines = tokenize_text(text, &WordCleaner::default(), false);
        let numbers: Vec<_> = lines.iter().map(|entry| entry.line).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(lines[0].tokens, vec!["alpha"]);
    }

    #[test]
    fn all_keeps_empty_lines() {
        let lines = tokenize_text("l_english:\n\n K: word\n", &WordCleaner::default(), true);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].tokens.is_empty());
        assert_eq!(lines[2].tokens, vec!["word"]);
    }
}
