/**
 * parser.rs
 * SELECT query text -> PreparedQuery
 *
 * Text is parsed by spargebra, then the algebra is lowered onto the prepared query shape.
 * Accepted algebra, outermost first:
 *   Slice (LIMIT, no OFFSET) → Project → OrderBy (one key) → Bgp / Join of Bgps
 *
 * ORDER BY keys: ?v, ASC(?v), DESC(?v), or an xsd numeric cast such as DESC(xsd:double(?v)).
 * Anything else (FILTER, OPTIONAL, DISTINCT, subqueries, FROM, repeated paths) is a `QueryParse`
 * error.
 * Blank nodes in patterns act as variables that are never projected.
 */

use spargebra::algebra::{Expression, Function, GraphPattern, OrderExpression};
use spargebra::term as sp;
use spargebra::Query;
use std::collections::BTreeMap;

use crate::errors::{GraphError, Result};
use crate::model::term::{XSD_DECIMAL, XSD_DOUBLE, XSD_INTEGER};
use crate::model::{Datatype, Iri, Literal, Term};
use crate::vocab::{Vocabulary, RDFS_NS, RDF_NS, XSD_NS};

use super::pattern::{BasicGraphPattern, OrderBy, PreparedQuery, TermPattern, TriplePattern};

const XSD_FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

/// Variable name given to a blank node in a pattern
const BLANK_VARIABLE_PREFIX: &str = "_bnode_";

pub struct QueryParser {
    prefixes: BTreeMap<String, String>,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryParser {
    /// Parser knowing the rdf, rdfs and xsd prefixes
    pub fn new() -> Self {
        let mut prefixes = BTreeMap::new();
        prefixes.insert("rdf".to_string(), RDF_NS.to_string());
        prefixes.insert("rdfs".to_string(), RDFS_NS.to_string());
        prefixes.insert("xsd".to_string(), XSD_NS.to_string());
        Self { prefixes }
    }

    pub fn with_prefix(mut self, prefix: &str, namespace: &str) -> Self {
        self.prefixes.insert(prefix.to_string(), namespace.to_string());
        self
    }

    /// Predeclare every prefix of a vocabulary
    pub fn with_vocabulary(mut self, vocab: &Vocabulary) -> Self {
        for (prefix, namespace) in &vocab.prefixes {
            self.prefixes.insert(prefix.to_string(), namespace.to_string());
        }
        self
    }

    pub fn parse(&self, text: &str) -> Result<PreparedQuery> {
        // Declarations in the query text come later and take precedence
        let mut source = String::new();
        for (prefix, namespace) in &self.prefixes {
            source.push_str(&format!("PREFIX {}: <{}>\n", prefix, namespace));
        }
        source.push_str(text);

        let query = Query::parse(&source, None).map_err(|e| err(e.to_string()))?;
        match query {
            Query::Select { dataset: None, pattern, .. } => lower(&pattern),
            Query::Select { dataset: Some(_), .. } => Err(err("FROM clauses are not supported")),
            _ => Err(err("only SELECT queries are supported")),
        }
    }
}

/// Parse with the default prefixes only
pub fn parse_query(text: &str) -> Result<PreparedQuery> {
    QueryParser::new().parse(text)
}

fn err(msg: impl Into<String>) -> GraphError {
    GraphError::QueryParse(msg.into())
}

#[derive(Default)]
struct Lowered {
    projection: Option<Vec<String>>,
    order: Option<OrderBy>,
    limit: Option<usize>,
}

fn lower(pattern: &GraphPattern) -> Result<PreparedQuery> {
    let mut lowered = Lowered::default();
    let mut current = pattern;

    loop {
        match current {
            GraphPattern::Slice { inner, start, length } => {
                if *start != 0 {
                    return Err(err("OFFSET is not supported"));
                }
                if lowered.projection.is_some() || lowered.order.is_some() || lowered.limit.is_some() {
                    return Err(err("nested LIMIT is not supported"));
                }
                lowered.limit = *length;
                current = inner;
            }
            GraphPattern::Project { inner, variables } => {
                if lowered.projection.is_some() || lowered.order.is_some() {
                    return Err(err("subqueries are not supported"));
                }
                lowered.projection = Some(variables.iter().map(|v| v.as_str().to_string()).collect());
                current = inner;
            }
            GraphPattern::OrderBy { inner, expression } => {
                if lowered.order.is_some() {
                    return Err(err("nested ORDER BY is not supported"));
                }
                lowered.order = Some(order_condition(expression)?);
                current = inner;
            }
            _ => break,
        }
    }

    let mut bgp = BasicGraphPattern::default();
    collect_patterns(current, &mut bgp)?;

    let mut query = PreparedQuery::new(bgp);
    if let Some(projection) = &lowered.projection {
        let refs: Vec<&str> = projection.iter().map(String::as_str).collect();
        query = query.select(&refs);
    }
    if let Some(order) = lowered.order {
        query = query.order_by(order);
    }
    if let Some(limit) = lowered.limit {
        query = query.limit(limit);
    }
    Ok(query)
}

fn collect_patterns(pattern: &GraphPattern, bgp: &mut BasicGraphPattern) -> Result<()> {
    match pattern {
        GraphPattern::Bgp { patterns } => {
            for triple in patterns {
                bgp.push(TriplePattern::new(
                    term_pattern(&triple.subject)?,
                    predicate_pattern(&triple.predicate),
                    term_pattern(&triple.object)?,
                ));
            }
            Ok(())
        }
        GraphPattern::Join { left, right } => {
            collect_patterns(left, bgp)?;
            collect_patterns(right, bgp)
        }
        GraphPattern::Distinct { .. } | GraphPattern::Reduced { .. } => {
            Err(err("DISTINCT and REDUCED are not supported"))
        }
        GraphPattern::Filter { .. } => Err(err("FILTER is not supported")),
        GraphPattern::LeftJoin { .. } => Err(err("OPTIONAL is not supported")),
        GraphPattern::Union { .. } => Err(err("UNION is not supported")),
        GraphPattern::Path { .. } => Err(err("property paths are not supported")),
        other => Err(err(format!("unsupported graph pattern: {}", other))),
    }
}

fn term_pattern(term: &sp::TermPattern) -> Result<TermPattern> {
    match term {
        sp::TermPattern::Variable(var) => Ok(TermPattern::Variable(var.as_str().to_string())),
        sp::TermPattern::NamedNode(node) => Ok(TermPattern::iri(node.as_str())),
        sp::TermPattern::BlankNode(node) => Ok(TermPattern::Variable(format!(
            "{}{}",
            BLANK_VARIABLE_PREFIX,
            node.as_str()
        ))),
        sp::TermPattern::Literal(literal) => Ok(TermPattern::Term(Term::Literal(literal_pattern(literal)))),
        #[allow(unreachable_patterns)]
        other => Err(err(format!("unsupported term {}", other))),
    }
}

fn predicate_pattern(predicate: &sp::NamedNodePattern) -> TermPattern {
    match predicate {
        sp::NamedNodePattern::NamedNode(node) => TermPattern::Term(Term::Iri(Iri::new(node.as_str()))),
        sp::NamedNodePattern::Variable(var) => TermPattern::Variable(var.as_str().to_string()),
    }
}

fn literal_pattern(literal: &sp::Literal) -> Literal {
    match literal.language() {
        Some(language) => Literal::lang(literal.value(), language),
        None => Literal::typed(literal.value(), Datatype::from_iri(literal.datatype().as_str())),
    }
}

fn order_condition(expressions: &[OrderExpression]) -> Result<OrderBy> {
    let [expression] = expressions else {
        return Err(err("ORDER BY takes exactly one key"));
    };

    let (key, descending) = match expression {
        OrderExpression::Asc(key) => (key, false),
        OrderExpression::Desc(key) => (key, true),
    };
    let (variable, numeric) = order_key(key)?;

    let order = if descending { OrderBy::desc(variable) } else { OrderBy::asc(variable) };
    Ok(if numeric { order.numeric() } else { order })
}

/// `?v` or a numeric cast of `?v`
fn order_key(key: &Expression) -> Result<(&str, bool)> {
    match key {
        Expression::Variable(var) => Ok((var.as_str(), false)),
        Expression::FunctionCall(Function::Custom(function), args) => {
            if !matches!(function.as_str(), XSD_DOUBLE | XSD_FLOAT | XSD_DECIMAL | XSD_INTEGER) {
                return Err(err(format!("unsupported ORDER BY function <{}>", function.as_str())));
            }
            match args.as_slice() {
                [Expression::Variable(var)] => Ok((var.as_str(), true)),
                _ => Err(err("numeric cast in ORDER BY must wrap a single variable")),
            }
        }
        other => Err(err(format!("unsupported ORDER BY expression: {}", other))),
    }
}
