use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default English query preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC) folds full-width and ligature forms
        let text: String = text.nfkc().collect();

        // Collapse runs of whitespace/newlines to single spaces
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input() {
        assert_eq!(DefaultPreprocessor.process("   \n\t "), "");
    }

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(DefaultPreprocessor.process("  Hello \n"), "hello");
    }

    #[test]
    fn test_collapses_inner_whitespace() {
        assert_eq!(DefaultPreprocessor.process("ice \n  cream"), "ice cream");
    }

    #[test]
    fn test_nfkc_folds_fullwidth() {
        assert_eq!(DefaultPreprocessor.process("ＲＵＮ"), "run");
        assert_eq!(DefaultPreprocessor.process("ﬁne"), "fine");
    }
}
