use serde::{Deserialize, Serialize};

/// One headword record as returned by the lexical API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    #[serde(default)]
    pub license: Option<License>,
    #[serde(default)]
    pub source_urls: Vec<String>,
}

impl DictionaryEntry {
    /// Headline transcription, falling back to the first phonetic variant with IPA text
    pub fn pronunciation(&self) -> Option<&str> {
        self.phonetic
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| {
                self.phonetics
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .find(|t| !t.is_empty())
            })
    }

    /// First phonetic variant carrying a recording
    pub fn audio_url(&self) -> Option<&str> {
        self.phonetics
            .iter()
            .filter_map(|p| p.audio.as_deref())
            .find(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

impl Meaning {
    /// Synonyms for display, capped at `limit`
    pub fn top_synonyms(&self, limit: usize) -> &[String] {
        &self.synonyms[..self.synonyms.len().min(limit)]
    }

    pub fn top_antonyms(&self, limit: usize) -> &[String] {
        &self.antonyms[..self.antonyms.len().min(limit)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// A word from the semantic network with its relatedness score.
///
/// The score is only comparable within one aggregation, higher is stronger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedWord {
    pub word: String,
    #[serde(default)]
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUN_ENTRY: &str = r#"{
        "word": "run",
        "phonetic": "",
        "phonetics": [
            { "text": "/ɹʌn/", "audio": "" },
            { "text": "/ɹʌn/", "audio": "https://example.org/run-us.mp3", "sourceUrl": "https://example.org/run" }
        ],
        "meanings": [
            {
                "partOfSpeech": "verb",
                "definitions": [
                    { "definition": "To move swiftly.", "example": "Run to the store.", "synonyms": [], "antonyms": [] },
                    { "definition": "To flow." }
                ],
                "synonyms": ["sprint", "dash", "jog"],
                "antonyms": ["walk"]
            }
        ],
        "license": { "name": "CC BY-SA 3.0", "url": "https://creativecommons.org/licenses/by-sa/3.0" },
        "sourceUrls": ["https://en.wiktionary.org/wiki/run"]
    }"#;

    #[test]
    fn test_parse_api_entry() {
        let entry: DictionaryEntry = serde_json::from_str(RUN_ENTRY).unwrap();
        assert_eq!(entry.word, "run");
        assert_eq!(entry.meanings.len(), 1);
        assert_eq!(entry.meanings[0].part_of_speech, "verb");
        assert_eq!(
            entry.meanings[0].definitions[0].example.as_deref(),
            Some("Run to the store.")
        );
        assert!(entry.meanings[0].definitions[1].example.is_none());
        assert_eq!(entry.meanings[0].definitions.len(), 2);
        assert_eq!(entry.source_urls.len(), 1);
    }

    #[test]
    fn test_pronunciation_skips_empty_headline() {
        let entry: DictionaryEntry = serde_json::from_str(RUN_ENTRY).unwrap();
        assert_eq!(entry.pronunciation(), Some("/ɹʌn/"));
    }

    #[test]
    fn test_audio_url_skips_empty_variants() {
        let entry: DictionaryEntry = serde_json::from_str(RUN_ENTRY).unwrap();
        assert_eq!(entry.audio_url(), Some("https://example.org/run-us.mp3"));
    }

    #[test]
    fn test_top_synonyms_slices() {
        let entry: DictionaryEntry = serde_json::from_str(RUN_ENTRY).unwrap();
        let meaning = &entry.meanings[0];
        assert_eq!(meaning.top_synonyms(2), ["sprint", "dash"]);
        assert_eq!(meaning.top_synonyms(10).len(), 3);
        assert_eq!(meaning.top_antonyms(0).len(), 0);
    }

    #[test]
    fn test_related_word_without_score() {
        let words: Vec<RelatedWord> =
            serde_json::from_str(r#"[{"word":"dash","score":1200},{"word":"hurry"}]"#).unwrap();
        assert_eq!(words[0].score, 1200.0);
        assert_eq!(words[1].score, 0.0);
    }
}
