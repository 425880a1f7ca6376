//! Structured version parsing and ordering
//!
//! A raw version string is split into a sequence of [`Component`]s:
//! numeric runs, alphabetic runs and release-stage markers. Parsing never
//! fails; anything unrecognized becomes a [`Component::Text`] token that sorts
//! below every numeric component, so ordering stays total.
//!
//! Every parsed version ends with an implicit [`StageMarker::Final`], which
//! places pre-release tags (`a`, `b`, `rc`, `dev`, ...) before the final
//! release of the same numbers:
//!
//! ```text
//! 1.0.dev1 < 1.0a1 < 1.0b2 < 1.0rc1 < 1.0 == 1.0.0 < 1.0-1 < 1.0post1 < 1.0.1
//! ```

use std::cmp::Ordering;
use std::fmt;

/// Release-stage markers recognized by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageMarker {
    /// `dev` development snapshot
    Dev,
    /// `c`, `rc`, `pre`, `preview` release candidate
    Candidate,
    /// `final`, explicit or implied at the end of every version
    Final,
    /// `-` post-release separator (`1.0-1`)
    PostRelease,
}

impl StageMarker {
    fn label(self) -> &'static str {
        match self {
            StageMarker::Dev => "@",
            StageMarker::Candidate => "c",
            StageMarker::Final => "final",
            StageMarker::PostRelease => "final-",
        }
    }

    /// Whether this marker denotes a final (non pre-release) version
    pub fn is_final(self) -> bool {
        matches!(self, StageMarker::Final | StageMarker::PostRelease)
    }
}

/// A single token of a structured version
#[derive(Debug, Clone, Eq)]
pub enum Component {
    /// Decimal digits without leading zeros; zero is the empty string
    Numeric(String),
    Text(String),
    Stage(StageMarker),
}

impl Component {
    /// Numeric component from a run of ASCII digits of any length
    pub fn number(digits: &str) -> Self {
        Component::Numeric(digits.trim_start_matches('0').to_string())
    }

    /// Sort label for non-numeric components
    fn label(&self) -> Option<&str> {
        match self {
            Component::Numeric(_) => None,
            Component::Text(text) => Some(text.as_str()),
            Component::Stage(marker) => Some(marker.label()),
        }
    }

    fn is_zero(&self) -> bool {
        matches!(self, Component::Numeric(digits) if digits.is_empty())
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Component::Numeric(a), Component::Numeric(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Component::Numeric(_), _) => Ordering::Greater,
            (_, Component::Numeric(_)) => Ordering::Less,
            _ => self.label().cmp(&other.label()),
        }
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Text("c") and Stage(Candidate) share a label, so equality follows the ordering.
impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// Parsed, comparable form of a version string
///
/// Ordering is lexicographic over the components. A sequence that is a prefix
/// of another sorts first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StructuredVersion {
    components: Vec<Component>,
}

impl StructuredVersion {
    /// Parse a raw version string. Never fails.
    pub fn parse(raw: &str) -> Self {
        let mut components = Vec::new();
        for component in tokenize(&raw.to_lowercase()) {
            push_component(&mut components, component);
        }
        push_component(&mut components, Component::Stage(StageMarker::Final));
        Self { components }
    }

    /// Build a version from already tokenized components, verbatim
    pub fn from_components(components: Vec<Component>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// First-marker-wins stability scan.
    ///
    /// Returns true at the first final marker or word starting with `final`,
    /// false at the first other non-numeric component, and false if no marker
    /// is present at all.
    pub fn is_stable(&self) -> bool {
        for component in &self.components {
            match component {
                Component::Numeric(_) => continue,
                Component::Stage(marker) => return marker.is_final(),
                Component::Text(text) => return text.starts_with("final"),
            }
        }
        false
    }
}

impl fmt::Display for StructuredVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .components
            .iter()
            .map(|component| match component {
                Component::Numeric(digits) if digits.is_empty() => "0".to_string(),
                Component::Numeric(digits) => digits.clone(),
                Component::Text(text) => format!("*{text}"),
                Component::Stage(marker) => format!("*{}", marker.label()),
            })
            .collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Append a component, normalizing the tail the way the ordering requires
fn push_component(components: &mut Vec<Component>, component: Component) {
    if !matches!(component, Component::Numeric(_)) {
        if component < Component::Stage(StageMarker::Final) {
            // a pre-release tag cancels a preceding `-`
            while components.last() == Some(&Component::Stage(StageMarker::PostRelease)) {
                components.pop();
            }
        }
        while components.last().is_some_and(Component::is_zero) {
            components.pop();
        }
    }
    components.push(component);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Digit,
    Letter,
    Dot,
    Dash,
    Other,
}

fn classify(c: char) -> CharClass {
    match c {
        '0'..='9' => CharClass::Digit,
        'a'..='z' => CharClass::Letter,
        '.' => CharClass::Dot,
        '-' => CharClass::Dash,
        _ => CharClass::Other,
    }
}

fn tokenize(lowered: &str) -> Vec<Component> {
    let mut tokens = Vec::new();
    let mut chars = lowered.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let class = classify(c);
        match class {
            CharClass::Dot => continue,
            CharClass::Dash => {
                tokens.push(Component::Stage(StageMarker::PostRelease));
                continue;
            }
            _ => {}
        }

        let mut end = start + c.len_utf8();
        while let Some(&(idx, next)) = chars.peek() {
            if classify(next) != class {
                break;
            }
            end = idx + next.len_utf8();
            chars.next();
        }
        let run = &lowered[start..end];

        tokens.push(match class {
            CharClass::Digit => Component::number(run),
            CharClass::Letter => word_component(run),
            _ => Component::Text(run.to_string()),
        });
    }

    tokens
}

fn word_component(word: &str) -> Component {
    match word {
        "pre" | "preview" | "rc" | "c" => Component::Stage(StageMarker::Candidate),
        "dev" => Component::Stage(StageMarker::Dev),
        "final" => Component::Stage(StageMarker::Final),
        _ => Component::Text(word.to_string()),
    }
}
