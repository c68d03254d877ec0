//! Splitting serialized documents into upload-sized pieces
//!
//! Both writers emit one statement per line, so a chunk boundary never cuts a
//! statement.

/// Split N-Quads text into chunks of at most `lines` statements
pub fn split_nquads_chunks(text: &str, lines: usize) -> Vec<String> {
    let statements: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    statements
        .chunks(lines.max(1))
        .map(|chunk| chunk.join("\n"))
        .collect()
}

/// Split Turtle text into chunks of at most `lines` statements.
///
/// Every chunk repeats the `@prefix` lines of the document so it parses on its own.
pub fn split_turtle_chunks(text: &str, lines: usize) -> Vec<String> {
    let (directives, statements): (Vec<&str>, Vec<&str>) = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .partition(|l| l.trim_start().starts_with("@prefix"));

    let header = if directives.is_empty() {
        String::new()
    } else {
        format!("{}\n\n", directives.join("\n"))
    };

    statements
        .chunks(lines.max(1))
        .map(|chunk| format!("{}{}", header, chunk.join("\n")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turtle_chunks_repeat_header() {
        let text = "@prefix ex: <http://example.org/> .\n\nex:a ex:p 1 .\nex:b ex:p 2 .\nex:c ex:p 3 .\n";
        let chunks = split_turtle_chunks(text, 2);

        assert_eq!(
            chunks,
            vec![
                "@prefix ex: <http://example.org/> .\n\nex:a ex:p 1 .\nex:b ex:p 2 .",
                "@prefix ex: <http://example.org/> .\n\nex:c ex:p 3 .",
            ]
        );
    }

    #[test]
    fn test_turtle_chunks_without_prefixes() {
        let chunks = split_turtle_chunks("_:a <http://example.org/p> _:b .\n", 10);
        assert_eq!(chunks, vec!["_:a <http://example.org/p> _:b ."]);
    }

    #[test]
    fn test_nquads_chunks() {
        let text = (0..5)
            .map(|i| format!("<http://example.org/s{}> <http://example.org/p> \"{}\" .", i, i))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = split_nquads_chunks(&text, 2);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].lines().count(), 1);
        assert!(chunks[2].starts_with("<http://example.org/s4>"));
    }

    #[test]
    fn test_empty_document_has_no_chunks() {
        assert!(split_nquads_chunks("", 10).is_empty());
        assert!(split_turtle_chunks("@prefix ex: <http://example.org/> .\n", 10).is_empty());
    }
}
