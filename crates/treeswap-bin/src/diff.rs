use anyhow::Result;
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;
use std::path::Path;

/// Colored line diff of one content change, `None` when the texts are line-identical.
pub fn render_diff(file_path: &Path, old_content: &str, new_content: &str) -> Result<Option<String>> {
    let diff = TextDiff::from_lines(old_content, new_content);
    let mut output = String::new();
    let mut has_changes = false;

    writeln!(output, "\n📝 {}", file_path.display())?;
    for (i, group) in diff.grouped_ops(3).iter().enumerate() {
        if i > 0 {
            writeln!(output, "{:-^1$}", "", 40)?;
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, style) = match change.tag() {
                    ChangeTag::Delete => ("- ", "\x1b[31m"), // Red
                    ChangeTag::Insert => ("+ ", "\x1b[32m"), // Green
                    ChangeTag::Equal => ("  ", "\x1b[0m"),   // Default
                };
                write!(output, "{}{}{}\x1b[0m", style, sign, change.value())?;
                if change.missing_newline() {
                    writeln!(output)?;
                }
                if change.tag() != ChangeTag::Equal {
                    has_changes = true;
                }
            }
        }
    }

    Ok(has_changes.then_some(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_detection() {
        let old_content = "This is Foo content\nwith multiple lines";
        let new_content = "This is Bar content\nwith multiple lines";

        let rendered = render_diff(Path::new("a.txt"), old_content, new_content)
            .unwrap()
            .unwrap();

        assert!(rendered.contains("a.txt"));
        assert!(rendered.contains("- This is Foo content"));
        assert!(rendered.contains("+ This is Bar content"));
    }

    #[test]
    fn test_no_diff_detection() {
        let content = "This is the same content\nwith multiple lines";

        let rendered = render_diff(Path::new("a.txt"), content, content).unwrap();

        assert!(rendered.is_none());
    }
}
