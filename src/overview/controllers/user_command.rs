//! # User Commands
//!
//! Line-oriented commands typed at the overview prompt.

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Load the next page (empty line or `more`)
    More,
    /// Search for a new query; `None` clears it
    Search(Option<String>),
    /// Show details for the item at this 1-based position
    Open(usize),
    Help,
    Quit,
    Unknown(String),
}

impl UserCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" | "more" | "m" => UserCommand::More,
            "search" | "s" | "/" => {
                if rest.is_empty() {
                    UserCommand::Search(None)
                } else {
                    UserCommand::Search(Some(rest.to_string()))
                }
            }
            "open" | "o" => match rest.parse::<usize>() {
                Ok(index) if index > 0 => UserCommand::Open(index),
                _ => UserCommand::Unknown(line.to_string()),
            },
            "help" | "h" | "?" => UserCommand::Help,
            "quit" | "q" | "exit" => UserCommand::Quit,
            _ => UserCommand::Unknown(line.to_string()),
        }
    }
}
