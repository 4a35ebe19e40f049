//! LaTeX table scaffolding shared by the table renderers
//!
//! Renderers only supply caption, label, column layout, header cells and body rows;
//! [`LatexTable::render`] wraps them into a booktabs `table` float ready to paste
//! into the thesis.

/// Glyph shown when a boolean check holds
pub const CHECK_GLYPH: &str = "$\\checkmark$";

/// Glyph shown when a boolean check fails
pub const CROSS_GLYPH: &str = "$\\times$";

/// How the `tabular` is fitted to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSizing {
    /// Scale the whole tabular to `\textwidth`
    ResizeToTextWidth,
    /// Typeset with `\small`
    Small,
}

/// A booktabs table float with one body row per record
#[derive(Debug, Clone)]
pub struct LatexTable {
    pub caption: String,
    pub label: String,
    /// Column specification passed to `tabular`, e.g. `lrrc`
    pub columns: String,
    pub sizing: TableSizing,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LatexTable {
    /// Renders the float, header cells in bold
    pub fn render(&self) -> String {
        let header = self
            .headers
            .iter()
            .map(|cell| format!("\\textbf{{{}}}", cell))
            .collect::<Vec<_>>()
            .join(" & ");

        let body = self
            .rows
            .iter()
            .map(|row| format!("        {} \\\\", row.join(" & ")))
            .collect::<Vec<_>>()
            .join("\n");

        let mut out = String::new();
        out.push_str("\\begin{table}[H]\n");
        out.push_str("    \\centering\n");
        out.push_str(&format!("    \\caption{{{}}}\n", self.caption));
        out.push_str(&format!("    \\label{{{}}}\n", self.label));
        match self.sizing {
            TableSizing::ResizeToTextWidth => {
                out.push_str("    \\resizebox{\\textwidth}{!}{%\n");
            }
            TableSizing::Small => out.push_str("    \\small\n"),
        }
        out.push_str(&format!("    \\begin{{tabular}}{{{}}}\n", self.columns));
        out.push_str("    \\toprule\n");
        out.push_str(&format!("    {} \\\\\n", header));
        out.push_str("    \\midrule\n");
        if !body.is_empty() {
            out.push_str(&body);
            out.push('\n');
        }
        out.push_str("    \\bottomrule\n");
        match self.sizing {
            TableSizing::ResizeToTextWidth => {
                out.push_str("    \\end{tabular}%\n");
                out.push_str("    }\n");
            }
            TableSizing::Small => out.push_str("    \\end{tabular}\n"),
        }
        out.push_str("\\end{table}");
        out
    }
}

/// Formats an integer with comma thousands separators (`1234567` -> `1,234,567`)
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Picks the display glyph for a boolean check
pub fn check_glyph(passed: bool) -> &'static str {
    if passed {
        CHECK_GLYPH
    } else {
        CROSS_GLYPH
    }
}

/// Upper-cases the first character and lower-cases the rest (`"IDEAL"` -> `"Ideal"`)
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Escapes characters that LaTeX treats as markup in text mode
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '_' | '&' | '%' | '#' | '$' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            '\\' => escaped.push_str("\\textbackslash{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1000, "1,000")]
    #[case(65536, "65,536")]
    #[case(2097152, "2,097,152")]
    #[case(1_000_000_000, "1,000,000,000")]
    fn test_group_thousands(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(group_thousands(value), expected);
    }

    #[rstest]
    #[case("ideal", "Ideal")]
    #[case("IDEAL", "Ideal")]
    #[case("fallback_split", "Fallback_split")]
    #[case("", "")]
    fn test_capitalize(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(capitalize(raw), expected);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("FRB_0001"), "FRB\\_0001");
        assert_eq!(escape_text("a&b%c#d"), "a\\&b\\%c\\#d");
        assert_eq!(escape_text("3096"), "3096");
    }

    #[test]
    fn test_check_glyph() {
        assert_eq!(check_glyph(true), "$\\checkmark$");
        assert_eq!(check_glyph(false), "$\\times$");
    }

    #[test]
    fn test_render_small_table() {
        let table = LatexTable {
            caption: "Caption".to_string(),
            label: "tab:test".to_string(),
            columns: "lr".to_string(),
            sizing: TableSizing::Small,
            headers: vec!["A".to_string(), "B".to_string()],
            rows: vec![
                vec!["x".to_string(), "1".to_string()],
                vec!["y".to_string(), "2".to_string()],
            ],
        };

        let rendered = table.render();
        assert!(rendered.starts_with("\\begin{table}[H]"));
        assert!(rendered.ends_with("\\end{table}"));
        assert!(rendered.contains("\\caption{Caption}"));
        assert!(rendered.contains("\\label{tab:test}"));
        assert!(rendered.contains("\\small"));
        assert!(rendered.contains("\\begin{tabular}{lr}"));
        assert!(rendered.contains("\\textbf{A} & \\textbf{B} \\\\"));
        assert!(rendered.contains("        x & 1 \\\\\n        y & 2 \\\\"));
        assert!(!rendered.contains("resizebox"));
    }

    #[test]
    fn test_render_resized_table() {
        let table = LatexTable {
            caption: "C".to_string(),
            label: "tab:r".to_string(),
            columns: "l".to_string(),
            sizing: TableSizing::ResizeToTextWidth,
            headers: vec!["A".to_string()],
            rows: Vec::new(),
        };

        let rendered = table.render();
        assert!(rendered.contains("\\resizebox{\\textwidth}{!}{%"));
        assert!(rendered.contains("\\end{tabular}%\n    }\n\\end{table}"));
        assert!(rendered.contains("\\midrule\n    \\bottomrule"));
    }
}
