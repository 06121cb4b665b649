use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default: trim, NFKC, lowercase
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC)
        text.nfkc().collect::<String>().to_lowercase()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_width() {
        let p = DefaultPreprocessor;
        assert_eq!(p.process("  Дерево "), "дерево");
        assert_eq!(p.process("ＴＲＥＥ"), "tree");
        assert_eq!(p.process("   "), "");
    }
}
