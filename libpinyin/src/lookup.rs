//! Fallback dictionary lookup for words the local corpus cannot illustrate.
//!
//! The remote source is a dictionary website with one details page per word.
//! The page is fetched with a `reqwest` blocking client (no async runtime
//! needed) and picked apart with regular expressions; the parts used are:
//!
//! - `<ruby class="mainsc">`: the headword (`<a>` children) and its pinyin (`<rt>`)
//! - `<div class="en py-2">`: the English definition
//! - `id="sen1"`: the first example sentence (`<span class="cnchar">` runs)
//! - `id="ensen1"`: its translation
//! - `id="ppysen1"`: its numeric-tone pinyin in the `value` attribute
//!
//! Lookups never return errors to the caller. Every call produces a
//! [`LookupOutcome`] the pipeline must match on.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::FallbackConfig;
use crate::corpus::ExampleSentence;
use crate::tone::decode_remote_pinyin;

/// Everything a details page offers about one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRecord {
    pub word: String,
    pub pinyin: String,
    pub definition: String,
    pub example: ExampleSentence,
}

/// Result of one fallback lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The page was fetched and parsed
    Found(RemoteRecord),
    /// The page was fetched but lacks the expected structure
    NotFound(String),
    /// The request itself failed (transport error or non-success status)
    Failed(String),
}

/// A source of example sentences used when the local corpus has none.
pub trait FallbackLookup {
    fn lookup(&mut self, word: &str) -> LookupOutcome;
}

impl<T: FallbackLookup + ?Sized> FallbackLookup for &mut T {
    fn lookup(&mut self, word: &str) -> LookupOutcome {
        (**self).lookup(word)
    }
}

impl<T: FallbackLookup + ?Sized> FallbackLookup for Box<T> {
    fn lookup(&mut self, word: &str) -> LookupOutcome {
        (**self).lookup(word)
    }
}

/// Missing structure in a details page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("page has no {0} element")]
    MissingElement(&'static str),
    #[error("page element {0} is empty")]
    EmptyElement(&'static str),
}

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)\b[^>]*?(/?)>").unwrap());
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static RUBY_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(?P<tag>ruby)\b[^>]*\bclass="[^"]*\bmainsc\b[^"]*"[^>]*>"#).unwrap()
});
static DEFINITION_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<(?P<tag>div)\b[^>]*\bclass="en py-2"[^>]*>"#).unwrap());
static SENTENCE_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(?P<tag>[a-zA-Z][a-zA-Z0-9]*)\b[^>]*\bid="sen1"[^>]*>"#).unwrap()
});
static TRANSLATION_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(?P<tag>[a-zA-Z][a-zA-Z0-9]*)\b[^>]*\bid="ensen1"[^>]*>"#).unwrap()
});
static PINYIN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<[a-zA-Z]+\b[^>]*\bid="ppysen1"[^>]*>"#).unwrap());
static VALUE_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bvalue="([^"]*)""#).unwrap());

static RT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<rt\b[^>]*>(.*?)</rt>").unwrap());
static RP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<rp\b[^>]*>.*?</rp>").unwrap());
static ANCHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<a\b[^>]*>(.*?)</a>").unwrap());
static CNCHAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<span\b[^>]*\bclass="cnchar"[^>]*>(.*?)</span>"#).unwrap()
});

/// Inner HTML of the first element whose opening tag matches `open`.
///
/// `open` must capture the tag name as `tag`. Nested elements with the same
/// name are balanced; an unclosed element runs to the end of the document.
fn element_inner<'a>(html: &'a str, open: &Regex) -> Option<&'a str> {
    let caps = open.captures(html)?;
    let name = caps.name("tag")?.as_str().to_ascii_lowercase();
    let start = caps.get(0)?.end();

    let mut depth = 1usize;
    for tag in TAG.captures_iter(&html[start..]) {
        if !tag[2].eq_ignore_ascii_case(&name) || !tag[3].is_empty() {
            continue;
        }
        if tag[1].is_empty() {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                let end = start + tag.get(0)?.start();
                return Some(&html[start..end]);
            }
        }
    }
    Some(&html[start..])
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Visible text of an HTML fragment with whitespace collapsed.
fn text_of(fragment: &str) -> String {
    let stripped = ANY_TAG.replace_all(fragment, " ");
    let decoded = decode_entities(&stripped);
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

/// Concatenate the trimmed text of every capture group 1 match.
fn joined_text(fragment: &str, re: &Regex) -> String {
    re.captures_iter(fragment)
        .map(|c| text_of(&c[1]))
        .collect::<String>()
}

/// Parse a dictionary details page.
///
/// The headword block and the first example sentence are required; the
/// definition, translation and example pinyin default to empty strings.
pub fn parse_details_page(html: &str) -> Result<RemoteRecord, PageError> {
    let ruby = element_inner(html, &RUBY_OPEN).ok_or(PageError::MissingElement("headword"))?;
    let pinyin = joined_text(ruby, &RT);
    let without_rt = RT.replace_all(ruby, "");
    let without_rp = RP.replace_all(&without_rt, "");
    let word = joined_text(&without_rp, &ANCHOR);
    if word.is_empty() {
        return Err(PageError::EmptyElement("headword"));
    }

    let definition = element_inner(html, &DEFINITION_OPEN)
        .map(text_of)
        .unwrap_or_default();

    let sentence_block =
        element_inner(html, &SENTENCE_OPEN).ok_or(PageError::MissingElement("example sentence"))?;
    let sentence = joined_text(sentence_block, &CNCHAR);
    if sentence.is_empty() {
        return Err(PageError::EmptyElement("example sentence"));
    }

    let translation = element_inner(html, &TRANSLATION_OPEN)
        .map(text_of)
        .unwrap_or_default();

    let sentence_pinyin = PINYIN_TAG
        .find(html)
        .and_then(|tag| VALUE_ATTR.captures(tag.as_str()))
        .map(|c| decode_remote_pinyin(&decode_entities(&c[1])))
        .unwrap_or_default();

    Ok(RemoteRecord {
        word,
        pinyin,
        definition,
        example: ExampleSentence::new(sentence, sentence_pinyin, translation),
    })
}

/// Remote dictionary client.
pub struct RemoteDictionary {
    client: reqwest::blocking::Client,
    url_template: String,
}

impl RemoteDictionary {
    /// Build a client from the fallback settings.
    pub fn new(config: &FallbackConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            url_template: config.url_template.clone(),
        })
    }

    /// Details page URL for a word; `{word}` in the template is replaced by
    /// the percent-encoded word.
    pub fn url_for(&self, word: &str) -> String {
        expand_template(&self.url_template, word)
    }

    fn fetch(&self, url: &str) -> Result<String, String> {
        let response = self.client.get(url).send().map_err(|e| e.to_string())?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP status {}", status));
        }
        response.text().map_err(|e| e.to_string())
    }
}

fn expand_template(template: &str, word: &str) -> String {
    template.replace("{word}", &urlencoding::encode(word))
}

impl FallbackLookup for RemoteDictionary {
    fn lookup(&mut self, word: &str) -> LookupOutcome {
        let url = self.url_for(word);
        debug!(%word, %url, "fetching dictionary page");

        let html = match self.fetch(&url) {
            Ok(html) => html,
            Err(reason) => {
                warn!(%word, %reason, "dictionary request failed");
                return LookupOutcome::Failed(reason);
            }
        };

        match parse_details_page(&html) {
            Ok(record) => LookupOutcome::Found(record),
            Err(e) => {
                warn!(%word, error = %e, "dictionary page not usable");
                LookupOutcome::NotFound(e.to_string())
            }
        }
    }
}
