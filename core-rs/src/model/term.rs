/**
 * term.rs
 * Graph node values: resource identifiers and typed literals
 */

use std::fmt;

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// Resource identifier. Two identifiers are equal iff their strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(String);

impl Iri {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Namespace prefix followed by a local name
    pub fn from_parts(namespace: &str, local: &str) -> Self {
        Self(format!("{}{}", namespace, local))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Local part relative to `namespace`, if the IRI lives in it
    pub fn strip_namespace(&self, namespace: &str) -> Option<&str> {
        self.0.strip_prefix(namespace)
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Literal datatype tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Datatype {
    String,
    Integer,
    Double,
    /// Language-tagged string, tag stored lowercase
    LangString(String),
    Other(String),
}

impl Datatype {
    pub fn from_iri(iri: &str) -> Self {
        match iri {
            XSD_STRING => Datatype::String,
            XSD_INTEGER => Datatype::Integer,
            XSD_DOUBLE => Datatype::Double,
            other => Datatype::Other(other.to_string()),
        }
    }

    pub fn iri(&self) -> &str {
        match self {
            Datatype::String => XSD_STRING,
            Datatype::Integer => XSD_INTEGER,
            Datatype::Double => XSD_DOUBLE,
            Datatype::LangString(_) => RDF_LANG_STRING,
            Datatype::Other(iri) => iri,
        }
    }
}

/// Typed scalar value, stored by lexical form and datatype
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    lexical: String,
    datatype: Datatype,
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Self::typed(value, Datatype::String)
    }

    pub fn integer(value: i64) -> Self {
        Self::typed(value.to_string(), Datatype::Integer)
    }

    pub fn double(value: f64) -> Self {
        let lexical = if value.is_infinite() {
            if value > 0.0 { "INF".to_string() } else { "-INF".to_string() }
        } else {
            value.to_string()
        };
        Self::typed(lexical, Datatype::Double)
    }

    pub fn lang(value: impl Into<String>, language: &str) -> Self {
        Self::typed(value, Datatype::LangString(language.to_ascii_lowercase()))
    }

    pub fn typed(lexical: impl Into<String>, datatype: Datatype) -> Self {
        Self {
            lexical: lexical.into(),
            datatype,
        }
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn datatype(&self) -> &Datatype {
        &self.datatype
    }

    pub fn language(&self) -> Option<&str> {
        match &self.datatype {
            Datatype::LangString(lang) => Some(lang),
            _ => None,
        }
    }

    /// Lexical form read as a number (cast semantics).
    ///
    /// Language-tagged strings never cast. `INF`/`-INF`/`NaN` follow the xsd:double lexical space.
    pub fn as_f64(&self) -> Option<f64> {
        if self.language().is_some() {
            return None;
        }
        match self.lexical.trim() {
            "INF" | "+INF" => Some(f64::INFINITY),
            "-INF" => Some(f64::NEG_INFINITY),
            "NaN" => Some(f64::NAN),
            other => other.parse::<f64>().ok(),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.datatype {
            Datatype::LangString(_) => None,
            _ => self.lexical.trim().parse::<i64>().ok(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.lexical.chars() {
            match c {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                _ => write!(f, "{}", c)?,
            }
        }
        write!(f, "\"")?;
        match &self.datatype {
            Datatype::String => Ok(()),
            Datatype::LangString(lang) => write!(f, "@{}", lang),
            other => write!(f, "^^<{}>", other.iri()),
        }
    }
}

/// Object-position value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Iri(Iri),
    Literal(Literal),
}

impl Term {
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            Term::Iri(_) => None,
        }
    }

    /// Bare value for tabular output: the IRI string or the literal's lexical form
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(iri) => iri.as_str(),
            Term::Literal(literal) => literal.lexical(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => fmt::Display::fmt(iri, f),
            Term::Literal(literal) => fmt::Display::fmt(literal, f),
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}
