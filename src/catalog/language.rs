use crate::error::CatalogError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// An expression language as known to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    /// Catalog identifier, e.g. `simple`.
    pub id: String,
    /// The key used for this language inside a flow document.
    pub model_name: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Language {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            model_name: id.to_string(),
            title: title.to_string(),
            description: None,
        }
    }
}

/// Ordered registry of expression languages.
///
/// Declaration order is significant: it is the tie-break when a holder
/// carries more than one language key.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
    by_id: AHashMap<String, usize>,
    by_model_name: AHashMap<String, usize>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_languages() -> Self {
        let mut registry = Self::default();
        for (id, title) in [
            ("simple", "Simple"),
            ("constant", "Constant"),
            ("header", "Header"),
            ("exchangeProperty", "ExchangeProperty"),
            ("variable", "Variable"),
            ("jsonpath", "JsonPath"),
            ("jq", "JQ"),
            ("xpath", "XPath"),
            ("xquery", "XQuery"),
            ("csimple", "CSimple"),
            ("datasonnet", "DataSonnet"),
            ("groovy", "Groovy"),
            ("js", "JavaScript"),
            ("python", "Python"),
            ("java", "Java"),
            ("method", "Bean Method"),
            ("ref", "Ref"),
            ("tokenize", "Tokenize"),
            ("xtokenize", "XML Tokenize"),
            ("hl7terser", "HL7 Terser"),
            ("wasm", "Wasm"),
        ] {
            registry.register(Language::new(id, title));
        }
        registry
    }

    /// Parses a JSON array of languages, keeping the array order.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let languages: Vec<Language> = serde_json::from_str(json)?;
        let mut registry = Self::default();
        for language in languages {
            if language.id.is_empty() || language.model_name.is_empty() {
                return Err(CatalogError::InvalidEntry(
                    language.title,
                    "language id and model name must not be empty".to_string(),
                ));
            }
            registry.register(language);
        }
        Ok(registry)
    }

    /// Adds a language, replacing an existing one with the same id in place.
    pub fn register(&mut self, language: Language) {
        if let Some(&slot) = self.by_id.get(&language.id) {
            let previous = std::mem::replace(&mut self.languages[slot], language);
            self.by_model_name.remove(&previous.model_name);
            self.by_model_name
                .insert(self.languages[slot].model_name.clone(), slot);
            return;
        }
        let slot = self.languages.len();
        self.by_id.insert(language.id.clone(), slot);
        self.by_model_name.insert(language.model_name.clone(), slot);
        self.languages.push(language);
    }

    pub fn get(&self, id: &str) -> Option<&Language> {
        self.by_id.get(id).map(|&slot| &self.languages[slot])
    }

    pub fn by_model_name(&self, model_name: &str) -> Option<&Language> {
        self.by_model_name
            .get(model_name)
            .map(|&slot| &self.languages[slot])
    }

    /// Languages in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
