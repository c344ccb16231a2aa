use quarry_core::stmt::{Expr, Value};
use quarry_core::{Error, Result};

/// A comparison operator: a symbolic name plus a predicate emitter.
pub(crate) struct Operator {
    pub(crate) name: &'static str,
    apply: fn(Expr, Value) -> Result<Expr>,
}

impl Operator {
    /// Emit the predicate for `column` compared against `value`.
    pub(crate) fn apply(&self, column: Expr, value: Value) -> Result<Expr> {
        (self.apply)(column, value)
    }
}

/// Look up an operator by its symbolic name.
pub(crate) fn get(name: &str) -> Option<&'static Operator> {
    REGISTRY.iter().find(|operator| operator.name == name)
}

static REGISTRY: &[Operator] = &[
    Operator { name: "_eq", apply: eq },
    Operator { name: "_neq", apply: neq },
    Operator { name: "_lt", apply: lt },
    Operator { name: "_nlt", apply: nlt },
    Operator { name: "_lte", apply: lte },
    Operator { name: "_nlte", apply: nlte },
    Operator { name: "_gt", apply: gt },
    Operator { name: "_ngt", apply: ngt },
    Operator { name: "_gte", apply: gte },
    Operator { name: "_ngte", apply: ngte },
    Operator { name: "_in", apply: in_list },
    Operator { name: "_nin", apply: not_in_list },
    Operator { name: "_null", apply: null },
    Operator { name: "_nnull", apply: nnull },
    Operator { name: "_contains", apply: contains },
    Operator { name: "_ncontains", apply: ncontains },
    Operator { name: "_starts_with", apply: starts_with },
    Operator { name: "_nstarts_with", apply: nstarts_with },
    Operator { name: "_ends_with", apply: ends_with },
    Operator { name: "_nends_with", apply: nends_with },
    Operator { name: "_between", apply: between },
    Operator { name: "_nbetween", apply: nbetween },
    Operator { name: "_empty", apply: empty },
    Operator { name: "_nempty", apply: nempty },
];

/// Negation pairs, positive side first.
///
/// An explicit table rather than `_n`-prefix surgery: `_null` begins with
/// `_n` but is not a negation of `_ull`.
const NEGATION_PAIRS: &[(&str, &str)] = &[
    ("_eq", "_neq"),
    ("_lt", "_nlt"),
    ("_lte", "_nlte"),
    ("_gt", "_ngt"),
    ("_gte", "_ngte"),
    ("_in", "_nin"),
    ("_null", "_nnull"),
    ("_contains", "_ncontains"),
    ("_starts_with", "_nstarts_with"),
    ("_ends_with", "_nends_with"),
    ("_between", "_nbetween"),
    ("_empty", "_nempty"),
];

/// True when `op` is the negative side of a negation pair.
pub(crate) fn is_negative(op: &str) -> bool {
    NEGATION_PAIRS.iter().any(|(_, negative)| *negative == op)
}

/// Swap an operator across its negation pair.
///
/// Operators outside the table fall back to toggling the `_n` prefix so
/// that inversion stays an involution.
pub(crate) fn invert(op: &str) -> String {
    for (positive, negative) in NEGATION_PAIRS {
        if op == *positive {
            return (*negative).to_string();
        }
        if op == *negative {
            return (*positive).to_string();
        }
    }

    if let Some(rest) = op.strip_prefix("_n") {
        format!("_{rest}")
    } else if let Some(rest) = op.strip_prefix('_') {
        format!("_n{rest}")
    } else {
        op.to_string()
    }
}

fn eq(column: Expr, value: Value) -> Result<Expr> {
    // Equality against null means IS NULL; databases would otherwise
    // return no rows at all
    Ok(if value.is_null() {
        Expr::is_null(column)
    } else {
        Expr::eq(column, value)
    })
}

fn neq(column: Expr, value: Value) -> Result<Expr> {
    Ok(if value.is_null() {
        Expr::is_not_null(column)
    } else {
        Expr::ne(column, value)
    })
}

fn lt(column: Expr, value: Value) -> Result<Expr> {
    Ok(Expr::lt(column, value))
}

fn nlt(column: Expr, value: Value) -> Result<Expr> {
    Ok(Expr::ge(column, value))
}

fn lte(column: Expr, value: Value) -> Result<Expr> {
    Ok(Expr::le(column, value))
}

fn nlte(column: Expr, value: Value) -> Result<Expr> {
    Ok(Expr::gt(column, value))
}

fn gt(column: Expr, value: Value) -> Result<Expr> {
    Ok(Expr::gt(column, value))
}

fn ngt(column: Expr, value: Value) -> Result<Expr> {
    Ok(Expr::le(column, value))
}

fn gte(column: Expr, value: Value) -> Result<Expr> {
    Ok(Expr::ge(column, value))
}

fn ngte(column: Expr, value: Value) -> Result<Expr> {
    Ok(Expr::lt(column, value))
}

fn in_list(column: Expr, value: Value) -> Result<Expr> {
    let list: Vec<Expr> = value
        .into_elements()
        .into_iter()
        .filter(|value| !value.is_null())
        .map(Expr::from)
        .collect();

    // IN over an empty list matches nothing
    Ok(if list.is_empty() {
        false.into()
    } else {
        Expr::in_list(column, list)
    })
}

fn not_in_list(column: Expr, value: Value) -> Result<Expr> {
    let list: Vec<Expr> = value
        .into_elements()
        .into_iter()
        .filter(|value| !value.is_null())
        .map(Expr::from)
        .collect();

    Ok(if list.is_empty() {
        true.into()
    } else {
        Expr::not_in_list(column, list)
    })
}

fn null(column: Expr, value: Value) -> Result<Expr> {
    Ok(if value.as_bool() == Some(false) {
        Expr::is_not_null(column)
    } else {
        Expr::is_null(column)
    })
}

fn nnull(column: Expr, value: Value) -> Result<Expr> {
    Ok(if value.as_bool() == Some(false) {
        Expr::is_null(column)
    } else {
        Expr::is_not_null(column)
    })
}

fn contains(column: Expr, value: Value) -> Result<Expr> {
    let pattern = like_pattern("_contains", &value, "%", "%")?;
    Ok(Expr::like(column, pattern))
}

fn ncontains(column: Expr, value: Value) -> Result<Expr> {
    let pattern = like_pattern("_ncontains", &value, "%", "%")?;
    Ok(Expr::not_like(column, pattern))
}

fn starts_with(column: Expr, value: Value) -> Result<Expr> {
    let pattern = like_pattern("_starts_with", &value, "", "%")?;
    Ok(Expr::like(column, pattern))
}

fn nstarts_with(column: Expr, value: Value) -> Result<Expr> {
    let pattern = like_pattern("_nstarts_with", &value, "", "%")?;
    Ok(Expr::not_like(column, pattern))
}

fn ends_with(column: Expr, value: Value) -> Result<Expr> {
    let pattern = like_pattern("_ends_with", &value, "%", "")?;
    Ok(Expr::like(column, pattern))
}

fn nends_with(column: Expr, value: Value) -> Result<Expr> {
    let pattern = like_pattern("_nends_with", &value, "%", "")?;
    Ok(Expr::not_like(column, pattern))
}

fn like_pattern(op: &str, value: &Value, prefix: &str, suffix: &str) -> Result<Value> {
    match value.as_str() {
        Some(text) => Ok(Value::from(format!("{prefix}{text}{suffix}"))),
        None => Err(Error::invalid_query(format!("`{op}` expects a string"))),
    }
}

fn between(column: Expr, value: Value) -> Result<Expr> {
    let (low, high) = bounds("_between", value)?;
    Ok(Expr::between(column, low, high))
}

fn nbetween(column: Expr, value: Value) -> Result<Expr> {
    let (low, high) = bounds("_nbetween", value)?;
    Ok(Expr::not_between(column, low, high))
}

fn bounds(op: &str, value: Value) -> Result<(Value, Value)> {
    match <[Value; 2]>::try_from(value.into_elements()) {
        Ok([low, high]) => Ok((low, high)),
        Err(_) => Err(Error::invalid_query(format!(
            "`{op}` expects exactly two values"
        ))),
    }
}

fn empty(column: Expr, _value: Value) -> Result<Expr> {
    Ok(Expr::or(
        Expr::is_null(column.clone()),
        Expr::eq(column, ""),
    ))
}

fn nempty(column: Expr, _value: Value) -> Result<Expr> {
    Ok(Expr::and(
        Expr::is_not_null(column.clone()),
        Expr::ne(column, ""),
    ))
}
