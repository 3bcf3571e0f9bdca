use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

/// Syntax highlighter for fenced code in answers and for the SQL shown
/// in the step transcript.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Highlight a complete code block. Lines that fail to highlight are
    /// passed through untouched.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let theme = &self.theme_set.themes["Solarized (dark)"];

        let syntax = if let Some(lang) = lang {
            self.syntax_set
                .find_syntax_by_token(lang)
                .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        } else {
            self.syntax_set.find_syntax_plain_text()
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut output = String::new();

        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false)),
                Err(_) => output.push_str(line),
            }
        }

        // Reset colors before the final newline so callers can print line
        // by line without a stray escape on its own line.
        if output.ends_with('\n') {
            output.pop();
            output.push_str("\x1b[0m\n");
        } else {
            output.push_str("\x1b[0m");
        }
        output
    }

    pub fn highlight_sql(&self, sql: &str) -> String {
        self.highlight(sql, Some("sql"))
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}
