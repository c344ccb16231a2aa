use crate::engine::{operators, MAX_FILTER_DEPTH};
use crate::query::Filter;

use quarry_core::{Error, Result};
use serde_json::Value as Json;

/// One segment of a filter path, `name` or `name:scope`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathSegment {
    /// The field name on the parent collection
    pub(crate) field: String,

    /// Target collection scope for polymorphic fields
    pub(crate) scope: Option<String>,
}

impl PathSegment {
    pub(crate) fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((field, scope)) => Self {
                field: field.into(),
                scope: Some(scope.into()),
            },
            None => Self {
                field: raw.into(),
                scope: None,
            },
        }
    }

    /// The alias-map key for this segment: the raw spelling, scope included,
    /// so the same field traversed under two scopes never shares a join.
    pub(crate) fn key(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}:{}", self.field, scope),
            None => self.field.clone(),
        }
    }
}

/// A filter tree after parsing and normalization.
///
/// The JSON wire shape is ambiguous between "nested object" and "operator
/// application"; this tagged form resolves that once, up front, so both
/// compilation passes agree on what they see. Normalization also applies the
/// `_or` short-circuit: a disjunction containing the match-everything `{}`
/// arm vanishes entirely, joins included.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FilterNode {
    And(Vec<FilterNode>),
    Or(Vec<FilterNode>),
    Field {
        segment: PathSegment,
        child: Box<FilterNode>,
    },
    Op {
        op: String,
        value: Json,
    },
}

impl FilterNode {
    /// Parse and normalize a filter tree.
    ///
    /// `None` means the filter matches everything and nothing needs to be
    /// emitted.
    pub(crate) fn parse(filter: &Filter) -> Result<Option<FilterNode>> {
        match &filter.0 {
            Json::Object(map) => parse_object(map, MAX_FILTER_DEPTH),
            _ => Ok(None),
        }
    }

    /// Rewrite every leaf operator across its negation pair, in place.
    ///
    /// Used when a negated relational predicate is realized as a single
    /// `NOT EXISTS` wrapper around the nested filter.
    pub(crate) fn invert(&mut self) {
        match self {
            FilterNode::And(arms) | FilterNode::Or(arms) => {
                for arm in arms {
                    arm.invert();
                }
            }
            FilterNode::Field { child, .. } => child.invert(),
            FilterNode::Op { op, .. } => *op = operators::invert(op),
        }
    }

    /// The terminal operator of a single-key chain, if there is one.
    pub(crate) fn leaf_operator(&self) -> Option<&str> {
        match self {
            FilterNode::Field { child, .. } => child.leaf_operator(),
            FilterNode::Op { op, .. } => Some(op),
            _ => None,
        }
    }
}

fn parse_object(map: &serde_json::Map<String, Json>, budget: usize) -> Result<Option<FilterNode>> {
    if budget == 0 {
        return Err(Error::filter_too_deep(MAX_FILTER_DEPTH));
    }

    let mut nodes = vec![];

    for (key, value) in map {
        match key.as_str() {
            "_and" => {
                if let Some(node) = parse_branches(value, budget, false)? {
                    nodes.push(node);
                }
            }
            "_or" => {
                if let Some(node) = parse_branches(value, budget, true)? {
                    nodes.push(node);
                }
            }
            _ if key.starts_with('_') => {
                nodes.push(FilterNode::Op {
                    op: key.clone(),
                    value: value.clone(),
                });
            }
            _ => {
                if let Some(child) = parse_leaf(value, budget - 1)? {
                    nodes.push(FilterNode::Field {
                        segment: PathSegment::parse(key),
                        child: Box::new(child),
                    });
                }
            }
        }
    }

    Ok(match nodes.len() {
        0 => None,
        1 => nodes.pop(),
        _ => Some(FilterNode::And(nodes)),
    })
}

fn parse_branches(value: &Json, budget: usize, disjunction: bool) -> Result<Option<FilterNode>> {
    let Json::Array(items) = value else {
        return Err(Error::invalid_query(if disjunction {
            "`_or` expects an array of filters"
        } else {
            "`_and` expects an array of filters"
        }));
    };

    // Permission-layer unions: an empty-object arm grants full access, so
    // the entire disjunction vanishes before either compilation pass.
    if disjunction
        && items
            .iter()
            .any(|item| matches!(item, Json::Object(map) if map.is_empty()))
    {
        return Ok(None);
    }

    let mut arms = vec![];

    for item in items {
        let Json::Object(map) = item else {
            return Err(Error::invalid_query("filter branches must be objects"));
        };

        if let Some(node) = parse_object(map, budget - 1)? {
            arms.push(node);
        }
    }

    Ok(match arms.len() {
        0 => None,
        1 => arms.pop(),
        _ => Some(if disjunction {
            FilterNode::Or(arms)
        } else {
            FilterNode::And(arms)
        }),
    })
}

fn parse_leaf(value: &Json, budget: usize) -> Result<Option<FilterNode>> {
    match value {
        Json::Object(map) => parse_object(map, budget),

        // A bare scalar is shorthand for equality
        _ => Ok(Some(FilterNode::Op {
            op: "_eq".into(),
            value: value.clone(),
        })),
    }
}
