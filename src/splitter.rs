//! Splitting file names into sequence parts
//!
//! A [`NameSplitter`] turns one file name into a [`NameRecord`] by trying an
//! ordered list of [`Grammar`]s against the file name's stem. The first
//! grammar that matches wins, so the list order is a policy: names such as
//! `v105-name` and `name-v105` are simply too similar for any single regex to
//! tell apart, and the built-in order favours the more common layouts.
//!
//! ## Built-in grammars
//!
//! | # | Layout | Example | Order |
//! |---|--------|---------|-------|
//! | 1 | index, then bare name | `01 Shot.png` | Reverse |
//! | 2 | one marker char, index, bare name | `v002_Write.png` | Reverse |
//! | 3 | bare name, index, optional trailing fragment | `image.001.png` | Normal |
//!
//! ## Custom grammars
//!
//! Grammars are Rust regexes with named captures `bare` and `index`
//! (required) and `secondary` (optional). Every grammar is matched against the
//! whole stem. A single custom grammar must come with a [`Template`] that says
//! how to reassemble a name from those captures:
//!
//! ```rust
//! use fileseq::splitter::NameSplitter;
//!
//! # fn main() -> fileseq::Result<()> {
//! let splitter = NameSplitter::with_custom(r"(?P<index>\d+)_(?P<bare>\w+)", "{index}_{bare}")?;
//! let record = splitter.split("0001_shot.exr").unwrap();
//! assert_eq!(record.index, "0001");
//! assert_eq!(record.bare_name, "shot");
//! assert_eq!(splitter.template().unwrap().render(&record, "0002"), "0002_shot.exr");
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SeqError};
use crate::types::{NameRecord, Order};
use crate::utils;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::trace;

/// Capture holding the bare name
pub const BARE: &str = "bare";
/// Capture holding the numeric index
pub const INDEX: &str = "index";
/// Capture holding the optional secondary fragment
pub const SECONDARY: &str = "secondary";

/// Built-in grammars in priority order
pub const DEFAULT_GRAMMARS: &[(&str, Order)] = &[
    (r"^(?P<index>\d+)(?P<bare>\D.*)$", Order::Reverse),
    (r"^(?P<secondary>\D)(?P<index>\d+)(?P<bare>.*)$", Order::Reverse),
    (r"^(?P<bare>\D.*?)(?P<index>\d+)(?P<secondary>\D*)$", Order::Normal),
];

static DEFAULTS: OnceLock<Vec<Grammar>> = OnceLock::new();

fn default_grammars() -> &'static [Grammar] {
    DEFAULTS.get_or_init(|| {
        DEFAULT_GRAMMARS
            .iter()
            .map(|(pattern, order)| Grammar::new(pattern, *order).expect("built-in grammar compiles"))
            .collect()
    })
}

/// One candidate pattern together with the part order it implies
#[derive(Debug, Clone)]
pub struct Grammar {
    source: String,
    regex: Regex,
    order: Order,
}

impl Grammar {
    /// Compile a grammar with an explicit order
    ///
    /// A single pair of quotes wrapped around the pattern is removed first.
    ///
    /// # Errors
    ///
    /// - [`SeqError::InvalidPattern`] if the regex does not compile
    /// - [`SeqError::Configuration`] if the pattern is empty, lacks a `bare`
    ///   or `index` capture, or names a capture fileseq does not know
    pub fn new(pattern: &str, order: Order) -> Result<Self> {
        let (source, regex) = compile(pattern)?;
        Ok(Self { source, regex, order })
    }

    /// Compile a grammar, inferring the order from which of `bare` and
    /// `index` is captured first
    pub fn inferred(pattern: &str) -> Result<Self> {
        let (source, regex) = compile(pattern)?;
        let order = match regex
            .capture_names()
            .flatten()
            .find(|name| *name == BARE || *name == INDEX)
        {
            Some(INDEX) => Order::Reverse,
            _ => Order::Normal,
        };
        Ok(Self { source, regex, order })
    }

    /// Pattern as supplied, after quote stripping
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Part order of names matched by this grammar
    pub fn order(&self) -> Order {
        self.order
    }

    /// Names of the captures this grammar defines
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.regex.capture_names().flatten()
    }

    /// Match the stem; empty `bare` or `index` captures count as no match
    fn split(&self, stem: &str, extension: &str) -> Option<NameRecord> {
        let caps = self.regex.captures(stem)?;
        let bare = caps.name(BARE).map_or("", |m| m.as_str());
        let index = caps.name(INDEX).map_or("", |m| m.as_str());
        if bare.is_empty() || index.is_empty() {
            return None;
        }
        let secondary = caps
            .name(SECONDARY)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Some(NameRecord {
            bare_name: bare.to_string(),
            index: index.to_string(),
            extension: extension.to_string(),
            order: self.order,
            secondary_name: secondary,
        })
    }
}

fn compile(pattern: &str) -> Result<(String, Regex)> {
    let pattern = utils::strip_wrapping_quotes(pattern);
    if pattern.is_empty() {
        return Err(SeqError::config("pattern string is empty"));
    }
    let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| SeqError::pattern(pattern, e))?;

    let mut has_bare = false;
    let mut has_index = false;
    for name in regex.capture_names().flatten() {
        match name {
            BARE => has_bare = true,
            INDEX => has_index = true,
            SECONDARY => {}
            other => {
                return Err(SeqError::config(format!(
                    "pattern '{}' has unknown group '{}' (expected '{}', '{}' or '{}')",
                    pattern, other, BARE, INDEX, SECONDARY
                )))
            }
        }
    }
    if !has_bare {
        return Err(SeqError::config(format!("pattern '{}' doesn't include a '{}' group", pattern, BARE)));
    }
    if !has_index {
        return Err(SeqError::config(format!("pattern '{}' doesn't include a '{}' group", pattern, INDEX)));
    }
    Ok((pattern.to_string(), regex))
}

/// A named slot in a [`Template`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `{bare}`
    Bare,
    /// `{index}`, zero-padded when reconstructing a missing name
    Index,
    /// `{secondary}`, empty when the name has none
    Secondary,
    /// `{ext}`, including the leading dot
    Extension,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            BARE => Some(Field::Bare),
            INDEX => Some(Field::Index),
            SECONDARY => Some(Field::Secondary),
            "ext" => Some(Field::Extension),
            _ => None,
        }
    }

    fn capture(name: &str) -> Option<Self> {
        Self::from_name(name).filter(|f| *f != Field::Extension)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// Format string describing how captured parts reassemble into a file name
///
/// Fields are written `{bare}`, `{index}`, `{secondary}` and `{ext}`; `{{` and
/// `}}` produce literal braces. If `{ext}` is absent the extension is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string
    ///
    /// # Errors
    ///
    /// [`SeqError::Configuration`] on empty templates, unknown fields and
    /// unbalanced braces.
    pub fn parse(source: &str) -> Result<Self> {
        if source.is_empty() {
            return Err(SeqError::config("template string is empty"));
        }
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => name.push(ch),
                            None => {
                                return Err(SeqError::config(format!(
                                    "unclosed '{{' in template '{}'",
                                    source
                                )))
                            }
                        }
                    }
                    let field = Field::from_name(&name).ok_or_else(|| {
                        SeqError::config(format!("unknown field '{{{}}}' in template '{}'", name, source))
                    })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' => {
                    return Err(SeqError::config(format!("unmatched '}}' in template '{}'", source)));
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Template as supplied
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if the template contains `field`
    pub fn references(&self, field: Field) -> bool {
        self.segments.contains(&Segment::Field(field))
    }

    /// Fill the template from `record`, substituting `index` for its index
    pub fn render(&self, record: &NameRecord, index: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Field::Bare) => out.push_str(&record.bare_name),
                Segment::Field(Field::Index) => out.push_str(index),
                Segment::Field(Field::Secondary) => {
                    out.push_str(record.secondary_name.as_deref().unwrap_or(""))
                }
                Segment::Field(Field::Extension) => out.push_str(&record.extension),
            }
        }
        if !self.references(Field::Extension) {
            out.push_str(&record.extension);
        }
        out
    }
}

impl FromStr for Template {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[derive(Debug, Clone)]
enum Patterns {
    Ordered(Vec<Grammar>),
    Custom { grammar: Grammar, template: Template },
}

/// Splits file names into [`NameRecord`]s
#[derive(Debug, Clone)]
pub struct NameSplitter {
    patterns: Patterns,
}

impl NameSplitter {
    /// Splitter using the built-in grammars
    pub fn new() -> Self {
        Self {
            patterns: Patterns::Ordered(default_grammars().to_vec()),
        }
    }

    /// Splitter using a full replacement list, tried in order
    ///
    /// Missing names are rebuilt from each record's order, so anything a
    /// grammar matches outside its captures is not reproduced.
    pub fn with_grammars(grammars: Vec<Grammar>) -> Result<Self> {
        if grammars.is_empty() {
            return Err(SeqError::config("grammar list is empty"));
        }
        Ok(Self {
            patterns: Patterns::Ordered(grammars),
        })
    }

    /// Splitter using one custom grammar and its reconstruction template
    ///
    /// # Errors
    ///
    /// Everything [`Grammar::new`] and [`Template::parse`] reject, plus a
    /// [`SeqError::Configuration`] if the template does not reference every
    /// capture of the pattern.
    pub fn with_custom(pattern: &str, template: &str) -> Result<Self> {
        let grammar = Grammar::inferred(pattern)?;
        let template = Template::parse(template)?;
        for name in grammar.capture_names() {
            let covered = Field::capture(name).is_some_and(|f| template.references(f));
            if !covered {
                return Err(SeqError::config(format!(
                    "key '{}' not found in template ({})",
                    name, template
                )));
            }
        }
        Ok(Self {
            patterns: Patterns::Custom { grammar, template },
        })
    }

    /// Reconstruction template, present only for a single custom grammar
    pub fn template(&self) -> Option<&Template> {
        match &self.patterns {
            Patterns::Ordered(_) => None,
            Patterns::Custom { template, .. } => Some(template),
        }
    }

    /// True if the built-in grammars are in use
    pub fn is_default(&self) -> bool {
        match &self.patterns {
            Patterns::Ordered(grammars) => {
                grammars.len() == DEFAULT_GRAMMARS.len()
                    && grammars
                        .iter()
                        .zip(DEFAULT_GRAMMARS)
                        .all(|(g, (p, o))| g.pattern() == *p && g.order() == *o)
            }
            Patterns::Custom { .. } => false,
        }
    }

    /// Split one file name, or `None` if no grammar accepts it
    ///
    /// When the stem has no digits but the extension does (`name.01001`),
    /// the whole name is matched and the extension is left empty.
    pub fn split(&self, file_name: &str) -> Option<NameRecord> {
        let (mut stem, mut extension) = utils::split_extension(file_name);
        if !utils::has_digit(stem) {
            if !utils::has_digit(extension) {
                trace!("{:?} has no digits, skipping", file_name);
                return None;
            }
            stem = file_name;
            extension = "";
        }

        let record = match &self.patterns {
            Patterns::Ordered(grammars) => grammars.iter().enumerate().find_map(|(i, grammar)| {
                let record = grammar.split(stem, extension);
                if record.is_some() {
                    trace!("{:?} matched {} grammar {} of {}", file_name, grammar.order(), i + 1, grammars.len());
                }
                record
            }),
            Patterns::Custom { grammar, .. } => grammar.split(stem, extension),
        };
        if record.is_none() {
            trace!("no grammar matched {:?}", file_name);
        }
        record
    }
}

impl Default for NameSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NameSplitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.patterns {
            Patterns::Ordered(grammars) if self.is_default() => {
                write!(f, "{} default grammars", grammars.len())
            }
            Patterns::Ordered(grammars) => {
                let list: Vec<String> = grammars
                    .iter()
                    .map(|g| format!("{} ({})", g.pattern(), g.order()))
                    .collect();
                write!(f, "grammars = [{}]", list.join(", "))
            }
            Patterns::Custom { grammar, template } => {
                write!(f, "pattern = {} template = {}", grammar.pattern(), template)
            }
        }
    }
}
