use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Built-in list used for `--offline` play.
pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// True when `word` is exactly `length` ASCII letters.
#[must_use]
pub fn is_word_of_length(word: &str, length: usize) -> bool {
    word.len() == length && word.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn load_wordbank_from_str(data: &str, length: usize) -> Vec<String> {
    data.lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| is_word_of_length(word, length))
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P, length: usize) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let word = line?.trim().to_lowercase();
        if is_word_of_length(&word, length) {
            words.push(word);
        }
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_wordbank_is_five_letter_words() {
        let words = load_wordbank_from_str(EMBEDDED_WORDBANK, 5);
        assert!(words.len() > 100);
        assert!(words.iter().all(|w| is_word_of_length(w, 5)));
        assert!(words.iter().all(|w| w.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn test_load_from_str_filters_and_normalizes() {
        let words = load_wordbank_from_str("  CRANE \nslate\ncranes\nab c d\nr4ise\n", 5);
        assert_eq!(words, vec!["crane".to_string(), "slate".to_string()]);
    }

    #[test]
    fn test_load_from_str_other_length() {
        let words = load_wordbank_from_str("cat\ncrane\ndog\n", 3);
        assert_eq!(words, vec!["cat".to_string(), "dog".to_string()]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Apple").unwrap();
        writeln!(file, "grape").unwrap();
        writeln!(file, "kiwi").unwrap();
        let words = load_wordbank_from_file(file.path(), 5).unwrap();
        assert_eq!(words, vec!["apple".to_string(), "grape".to_string()]);
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(load_wordbank_from_file("/definitely/not/here.txt", 5).is_err());
    }
}
