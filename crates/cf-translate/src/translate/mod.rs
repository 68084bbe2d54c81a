//! Machine translation of statements
//!
//! Design: each remote service implements [`TranslationBackend`].
//! [`TranslatorChain`] tries backends in registration order and never fails:
//! when every backend gives up, the source text is kept.

mod libretranslate;
mod mymemory;

pub use libretranslate::{LibreTranslate, LIBRETRANSLATE_URL};
pub use mymemory::{MyMemory, MYMEMORY_URL};

use crate::error::Error;
use crate::types::{ProblemRecord, TranslatedRecord};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Pause after every translation request; free instances throttle hard
pub const DEFAULT_TRANSLATION_PAUSE: Duration = Duration::from_millis(500);

/// Timeout for a single translation request
pub(crate) const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for translation services
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Unique identifier for this backend (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Translate `text` between two generic language codes ("en", "zh")
    ///
    /// Backends map the generic codes to their own dialect.
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, Error>;
}

/// Ordered list of backends with a fixed pause between calls
pub struct TranslatorChain {
    backends: Vec<Box<dyn TranslationBackend>>,
    source: String,
    target: String,
    pause: Duration,
}

impl Default for TranslatorChain {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslatorChain {
    /// Create an empty English → Chinese chain
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
            source: "en".to_string(),
            target: "zh".to_string(),
            pause: DEFAULT_TRANSLATION_PAUSE,
        }
    }

    /// Create a chain with the public backends pre-registered
    ///
    /// Includes (in order of priority):
    /// 1. LibreTranslate community instance
    /// 2. MyMemory
    pub fn with_defaults() -> Self {
        let mut chain = Self::new();
        chain.register(Box::new(LibreTranslate::new()));
        chain.register(Box::new(MyMemory::new()));
        chain
    }

    /// Register a backend; backends are tried in registration order
    pub fn register(&mut self, backend: Box<dyn TranslationBackend>) {
        self.backends.push(backend);
    }

    /// Register a backend, builder style
    pub fn with_backend(mut self, backend: Box<dyn TranslationBackend>) -> Self {
        self.register(backend);
        self
    }

    /// Set the pause inserted after every translation request
    pub fn pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Set source and target language codes
    pub fn languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source = source.into();
        self.target = target.into();
        self
    }

    /// Names of the registered backends, in priority order
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Translate one text
    ///
    /// Blank text is returned as is without a request. If no backend
    /// produces a non-empty translation the source text is returned.
    pub async fn translate(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let mut translated = None;
        for backend in &self.backends {
            match backend.translate(text, &self.source, &self.target).await {
                Ok(result) if !result.trim().is_empty() => {
                    debug!(backend = backend.name(), chars = text.len(), "Translated");
                    translated = Some(result);
                    break;
                }
                Ok(_) => warn!(backend = backend.name(), "Backend returned empty text"),
                Err(e) => warn!(backend = backend.name(), error = %e, "Backend failed"),
            }
        }

        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }

        translated.unwrap_or_else(|| {
            warn!("All translation backends failed, keeping source text");
            text.to_string()
        })
    }
}

/// Translate the natural-language fields of a statement
///
/// Sample tests are copied verbatim; an empty note stays empty.
pub async fn translate_problem(chain: &TranslatorChain, problem: &ProblemRecord) -> TranslatedRecord {
    let title = chain.translate(&problem.title).await;
    let description = chain.translate(&problem.description).await;
    let input_section = chain.translate(&problem.input_section).await;
    let output_section = chain.translate(&problem.output_section).await;
    let note = if problem.note.is_empty() {
        String::new()
    } else {
        chain.translate(&problem.note).await
    };

    TranslatedRecord {
        title,
        description,
        input_section,
        output_section,
        examples: problem.examples.clone(),
        note,
    }
}

/// Map a generic language code to a backend dialect
pub(crate) fn dialect<'a>(code: &'a str, table: &[(&str, &'static str)]) -> &'a str {
    table
        .iter()
        .find(|(generic, _)| *generic == code)
        .map(|(_, specific)| *specific)
        .unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Example;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Prefixes every text with a marker
    struct Prefixing(&'static str);

    #[async_trait]
    impl TranslationBackend for Prefixing {
        fn name(&self) -> &'static str {
            "prefixing"
        }

        async fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String, Error> {
            Ok(format!("{}{}", self.0, text))
        }
    }

    /// Always fails, counting calls
    struct Failing(Arc<AtomicUsize>);

    #[async_trait]
    impl TranslationBackend for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String, Error> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(Error::TranslationFailed {
                backend: "failing",
                reason: "quota exceeded".to_string(),
            })
        }
    }

    struct Empty;

    #[async_trait]
    impl TranslationBackend for Empty {
        fn name(&self) -> &'static str {
            "empty"
        }

        async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String, Error> {
            Ok("   ".to_string())
        }
    }

    fn problem() -> ProblemRecord {
        ProblemRecord {
            title: "Sum".to_string(),
            full_title: "A. Sum".to_string(),
            description: "Add numbers.".to_string(),
            input_section: "Two integers.".to_string(),
            output_section: "One integer.".to_string(),
            examples: vec![
                Example {
                    input: "1 2".to_string(),
                    output: "3".to_string(),
                },
                Example {
                    input: "  5 5".to_string(),
                    output: "10".to_string(),
                },
            ],
            note: String::new(),
        }
    }

    #[test]
    fn test_with_defaults_order() {
        let chain = TranslatorChain::with_defaults();
        assert_eq!(chain.backend_names(), vec!["libretranslate", "mymemory"]);
        assert!(TranslatorChain::new().backend_names().is_empty());
    }

    #[tokio::test]
    async fn test_falls_back_to_next_backend() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = TranslatorChain::new()
            .pause(Duration::ZERO)
            .with_backend(Box::new(Failing(calls.clone())))
            .with_backend(Box::new(Prefixing("zh:")));

        assert_eq!(chain.translate("Hello").await, "zh:Hello");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_result_falls_through() {
        let chain = TranslatorChain::new()
            .pause(Duration::ZERO)
            .with_backend(Box::new(Empty))
            .with_backend(Box::new(Prefixing("2:")));

        assert_eq!(chain.translate("Hello").await, "2:Hello");
    }

    #[tokio::test]
    async fn test_all_backends_failing_keeps_source() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = TranslatorChain::new()
            .pause(Duration::ZERO)
            .with_backend(Box::new(Failing(calls.clone())))
            .with_backend(Box::new(Failing(calls.clone())));

        assert_eq!(chain.translate("Hello").await, "Hello");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_blank_text_skips_backends() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = TranslatorChain::new()
            .pause(Duration::ZERO)
            .with_backend(Box::new(Failing(calls.clone())));

        assert_eq!(chain.translate("").await, "");
        assert_eq!(chain.translate(" \n").await, " \n");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_translate_problem_keeps_examples() {
        let chain = TranslatorChain::new()
            .pause(Duration::ZERO)
            .with_backend(Box::new(Prefixing("zh:")));
        let source = problem();

        let translated = translate_problem(&chain, &source).await;

        assert_eq!(translated.title, "zh:Sum");
        assert_eq!(translated.description, "zh:Add numbers.");
        assert_eq!(translated.input_section, "zh:Two integers.");
        assert_eq!(translated.output_section, "zh:One integer.");
        assert_eq!(translated.examples, source.examples);
        assert!(translated.note.is_empty());
    }

    #[tokio::test]
    async fn test_translate_problem_with_note() {
        let chain = TranslatorChain::new()
            .pause(Duration::ZERO)
            .with_backend(Box::new(Prefixing("zh:")));
        let source = ProblemRecord {
            note: "Explanation.".to_string(),
            ..problem()
        };

        let translated = translate_problem(&chain, &source).await;
        assert_eq!(translated.note, "zh:Explanation.");
    }

    #[tokio::test]
    async fn test_translate_problem_fail_soft() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = TranslatorChain::new()
            .pause(Duration::ZERO)
            .with_backend(Box::new(Failing(calls.clone())));
        let source = problem();

        let translated = translate_problem(&chain, &source).await;

        assert_eq!(translated.title, source.title);
        assert_eq!(translated.description, source.description);
        assert_eq!(translated.input_section, source.input_section);
        assert_eq!(translated.output_section, source.output_section);
        assert_eq!(translated.examples, source.examples);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_dialect() {
        let table = [("zh", "zh-Hans")];
        assert_eq!(dialect("zh", &table), "zh-Hans");
        assert_eq!(dialect("en", &table), "en");
    }
}
