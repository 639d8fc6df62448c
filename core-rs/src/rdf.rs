/**
 * rdf.rs
 * Bridge between the store's model and oxigraph's RDF I/O
 *
 * Parsing drops graph names and skolemizes blank nodes into `urn:catalog-graph:genid:` IRIs,
 * since the store only holds IRI subjects.
 */

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model as ox;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::errors::{GraphError, Result};
use crate::model::{Datatype, Iri, Literal, Term, Triple, TripleRef};

/// Prefix for IRIs minted from blank nodes
pub const SKOLEM_PREFIX: &str = "urn:catalog-graph:genid:";

/// Serialization syntaxes supported for schema input and export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdfSyntax {
    #[default]
    Turtle,
    NTriples,
    RdfXml,
}

impl RdfSyntax {
    pub fn format(&self) -> RdfFormat {
        match self {
            RdfSyntax::Turtle => RdfFormat::Turtle,
            RdfSyntax::NTriples => RdfFormat::NTriples,
            RdfSyntax::RdfXml => RdfFormat::RdfXml,
        }
    }

    pub fn media_type(&self) -> &'static str {
        self.format().media_type()
    }

    /// Guess from a file extension (ttl, nt, rdf, owl, xml)
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "ttl" | "turtle" => Some(RdfSyntax::Turtle),
            "nt" => Some(RdfSyntax::NTriples),
            "rdf" | "owl" | "xml" => Some(RdfSyntax::RdfXml),
            _ => None,
        }
    }
}

impl FromStr for RdfSyntax {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(RdfSyntax::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(RdfSyntax::NTriples),
            "rdfxml" | "rdf/xml" | "xml" => Ok(RdfSyntax::RdfXml),
            other => Err(format!("unknown RDF syntax '{}' (expected turtle, ntriples or rdfxml)", other)),
        }
    }
}

impl fmt::Display for RdfSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RdfSyntax::Turtle => "turtle",
            RdfSyntax::NTriples => "ntriples",
            RdfSyntax::RdfXml => "rdfxml",
        };
        write!(f, "{}", name)
    }
}

/// Parse a whole document into triples
pub fn parse_document<R: Read>(reader: R, syntax: RdfSyntax, base_iri: Option<&str>) -> Result<Vec<Triple>> {
    let mut parser = RdfParser::from_format(syntax.format())
        .without_named_graphs()
        .rename_blank_nodes();
    if let Some(base) = base_iri {
        parser = parser
            .with_base_iri(base)
            .map_err(|e| GraphError::InvalidIri(format!("{}: {}", base, e)))?;
    }

    let mut triples = Vec::new();
    for quad in parser.for_reader(reader) {
        let quad = quad.map_err(|e| GraphError::RdfParse(e.to_string()))?;
        triples.push(from_oxigraph(quad.subject, quad.predicate, quad.object)?);
    }
    Ok(triples)
}

fn from_oxigraph(subject: ox::Subject, predicate: ox::NamedNode, object: ox::Term) -> Result<Triple> {
    let subject = match subject {
        ox::Subject::NamedNode(node) => Iri::new(node.into_string()),
        ox::Subject::BlankNode(node) => skolem_iri(&node),
        #[allow(unreachable_patterns)]
        other => return Err(GraphError::RdfParse(format!("unsupported subject {}", other))),
    };
    let object = match object {
        ox::Term::NamedNode(node) => Term::Iri(Iri::new(node.into_string())),
        ox::Term::BlankNode(node) => Term::Iri(skolem_iri(&node)),
        ox::Term::Literal(literal) => Term::Literal(literal_from_oxigraph(&literal)),
        #[allow(unreachable_patterns)]
        other => return Err(GraphError::RdfParse(format!("unsupported object {}", other))),
    };
    Ok(Triple::new(subject, Iri::new(predicate.into_string()), object))
}

fn skolem_iri(node: &ox::BlankNode) -> Iri {
    Iri::new(format!("{}{}", SKOLEM_PREFIX, node.as_str()))
}

fn literal_from_oxigraph(literal: &ox::Literal) -> Literal {
    match literal.language() {
        Some(language) => Literal::lang(literal.value(), language),
        None => Literal::typed(literal.value(), Datatype::from_iri(literal.datatype().as_str())),
    }
}

/// Convert a stored statement for serialization
pub fn to_oxigraph(triple: TripleRef<'_>) -> Result<ox::Triple> {
    let subject = named_node(triple.subject)?;
    let predicate = named_node(triple.predicate)?;
    let object: ox::Term = match triple.object {
        Term::Iri(iri) => named_node(iri)?.into(),
        Term::Literal(literal) => literal_to_oxigraph(literal)?.into(),
    };
    Ok(ox::Triple::new(subject, predicate, object))
}

fn named_node(iri: &Iri) -> Result<ox::NamedNode> {
    ox::NamedNode::new(iri.as_str()).map_err(|e| GraphError::InvalidIri(format!("{}: {}", iri.as_str(), e)))
}

fn literal_to_oxigraph(literal: &Literal) -> Result<ox::Literal> {
    let value = literal.lexical();
    match literal.datatype() {
        Datatype::String => Ok(ox::Literal::new_simple_literal(value)),
        Datatype::LangString(language) => ox::Literal::new_language_tagged_literal(value, language.as_str())
            .map_err(|e| GraphError::Export(format!("invalid language tag '{}': {}", language, e))),
        datatype => {
            let datatype = ox::NamedNode::new(datatype.iri())
                .map_err(|e| GraphError::InvalidIri(format!("{}: {}", datatype.iri(), e)))?;
            Ok(ox::Literal::new_typed_literal(value, datatype))
        }
    }
}
