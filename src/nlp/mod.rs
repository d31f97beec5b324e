//! Portuguese text normalization ahead of classification.
//!
//! Pipeline (order matters):
//! 1. lowercase
//! 2. drop URLs
//! 3. drop anything outside `[a-z0-9]`, Portuguese accented letters and whitespace
//! 4. strip diacritics (after step 3, so accented letters survive the filter)
//! 5. drop standalone numbers
//! 6. collapse whitespace
//! 7. tokenize, drop stopwords and tokens under 3 chars, stem, re-join

pub mod stopwords;

use std::collections::HashSet;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, ValidationError};

/// Tokens shorter than this are dropped.
const MIN_TOKEN_CHARS: usize = 3;

/// Turns free text into a space-separated string of stems.
pub trait TextNormalizer: Send + Sync {
    fn normalize(&self, text: &str) -> Result<String, Error>;
}

/// Normalizer for Brazilian Portuguese email bodies.
pub struct PortugueseNormalizer {
    url_pattern: Regex,
    symbol_pattern: Regex,
    number_pattern: Regex,
    space_pattern: Regex,
    stopwords: HashSet<String>,
    stemmer: Stemmer,
}

impl PortugueseNormalizer {
    pub fn new() -> Self {
        // Tokens are compared after diacritics are stripped, so the list is
        // folded the same way.
        let stopwords = stopwords::PORTUGUESE
            .iter()
            .map(|w| strip_accents(w))
            .collect();

        Self {
            url_pattern: Regex::new(r"http\S+|www\S+|https\S+").unwrap(),
            symbol_pattern: Regex::new(r"[^a-z0-9áàâãéèêíïóôõöúçñ\s]").unwrap(),
            number_pattern: Regex::new(r"\b\d+\b").unwrap(),
            space_pattern: Regex::new(r"\s+").unwrap(),
            stopwords,
            stemmer: Stemmer::create(Algorithm::Portuguese),
        }
    }

    /// Steps 1–6: character-level cleanup, before tokenization.
    pub fn clean(&self, text: &str) -> String {
        let text = text.to_lowercase();
        let text = self.url_pattern.replace_all(&text, " ");
        let text = self.symbol_pattern.replace_all(&text, " ");
        let text = strip_accents(&text);
        let text = self.number_pattern.replace_all(&text, " ");
        self.space_pattern.replace_all(&text, " ").trim().to_string()
    }

    fn keep(&self, token: &str) -> bool {
        token.chars().count() >= MIN_TOKEN_CHARS && !self.stopwords.contains(token)
    }
}

impl Default for PortugueseNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer for PortugueseNormalizer {
    fn normalize(&self, text: &str) -> Result<String, Error> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let cleaned = self.clean(text);
        let stems: Vec<String> = cleaned
            .unicode_words()
            .filter(|token| self.keep(token))
            .map(|token| self.stemmer.stem(token).into_owned())
            .collect();

        Ok(stems.join(" "))
    }
}

/// Decompose and drop combining marks: `ação` → `acao`.
fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(word: &str) -> String {
        Stemmer::create(Algorithm::Portuguese).stem(word).into_owned()
    }

    #[test]
    fn empty_input_is_rejected() {
        let normalizer = PortugueseNormalizer::new();
        for input in ["", "   ", "\n\t"] {
            let err = normalizer.normalize(input).unwrap_err();
            assert!(matches!(err, Error::Validation(ValidationError::EmptyText)));
        }
    }

    #[test]
    fn clean_strips_urls_symbols_numbers_and_accents() {
        let normalizer = PortugueseNormalizer::new();
        let cleaned = normalizer.clean("Veja: https://Exemplo.com/x?y=1 — Preço R$ 30, AÇÃO 2x!");
        assert_eq!(cleaned, "veja preco r acao 2x");
    }

    #[test]
    fn urls_numbers_and_accents_are_normalized() {
        let normalizer = PortugueseNormalizer::new();
        let out = normalizer
            .normalize("Confira https://Exemplo.com/pedido e WWW.loja.com.br: pedido 2024 com AÇÃO urgente")
            .unwrap();

        assert!(!out.contains("http"));
        assert!(!out.contains("exemplo"));
        assert!(!out.contains("www"));
        assert!(!out.contains("loja"));
        assert!(!out.contains("2024"));
        assert!(out.is_ascii());

        let expected: Vec<String> = ["confira", "pedido", "acao", "urgente"]
            .iter()
            .map(|w| stem(w))
            .collect();
        assert_eq!(out, expected.join(" "));
    }

    #[test]
    fn status_request_is_reduced_to_stems() {
        let normalizer = PortugueseNormalizer::new();
        let out = normalizer
            .normalize("Prezado, gostaria de saber o status do meu pedido #12345, obrigado.")
            .unwrap();

        assert!(!out.contains("12345"));
        assert!(!out.contains('#'));
        assert!(!out.contains(','));
        assert!(!out.contains('.'));
        assert_eq!(out, out.to_lowercase());

        let expected: Vec<String> = ["prezado", "gostaria", "saber", "status", "pedido", "obrigado"]
            .iter()
            .map(|w| stem(w))
            .collect();
        assert_eq!(out, expected.join(" "));
    }

    #[test]
    fn short_tokens_and_stopwords_are_dropped() {
        let normalizer = PortugueseNormalizer::new();
        assert_eq!(normalizer.normalize("ok eu vou").unwrap(), stem("vou"));
        // Accented stopwords are removed after diacritics are stripped
        assert_eq!(normalizer.normalize("Não entendi").unwrap(), stem("entendi"));
        assert_eq!(normalizer.normalize("de que para com").unwrap(), "");
    }

    #[test]
    fn normalizing_stems_again_is_stable() {
        let normalizer = PortugueseNormalizer::new();
        for input in [
            "Gostaria de confirmar o pagamento da fatura de setembro",
            "Prezado, gostaria de saber o status do meu pedido #12345, obrigado.",
        ] {
            let once = normalizer.normalize(input).unwrap();
            let twice = normalizer.normalize(&once).unwrap();
            assert_eq!(once, twice, "second pass changed {input:?}");
        }
    }
}
