//! Line splitting shared by the classifier and tokenizers.

/// One physical line of a buffer, without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalLine<'a> {
    /// Line content (`\n` and a preceding `\r` removed).
    pub content: &'a str,
    /// Whether the line was followed by `\n`.
    pub terminated: bool,
}

/// Split `text` into physical lines.
///
/// `"a\nb\n"` and `"a\nb"` both yield two lines; an empty buffer yields none. Tokenizers should
/// use the same split so their rows line up with the classifier's line table.
pub fn physical_lines(text: &str) -> impl Iterator<Item = PhysicalLine<'_>> {
    text.split_inclusive('\n').map(|segment| match segment.strip_suffix('\n') {
        Some(content) => PhysicalLine {
            content: content.strip_suffix('\r').unwrap_or(content),
            terminated: true,
        },
        None => PhysicalLine {
            content: segment,
            terminated: false,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_lines_handles_terminators() {
        let lines: Vec<_> = physical_lines("a\r\nb\n\nc").collect();
        let contents: Vec<_> = lines.iter().map(|l| l.content).collect();
        assert_eq!(contents, vec!["a", "b", "", "c"]);
        assert!(lines[2].terminated);
        assert!(!lines[3].terminated);

        assert_eq!(physical_lines("").count(), 0);
        assert_eq!(physical_lines("x\n").count(), 1);
    }
}
