//! Query Module
//!
//! Predicate queries over records: literal equality per field, or an
//! operator mapping such as `{"$gte": 2, "$lt": 10}`.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::error::{Result, StoreError};
use crate::store::value::{compare_values, contains_value, values_equal, Record};

// == Operator ==
/// A single comparison against a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
    Nin(Vec<Value>),
}

impl Operator {
    /// Builds an operator from its `$name` and JSON operand.
    pub fn parse(name: &str, operand: &Value) -> Result<Self> {
        let op = match name {
            "$eq" => Operator::Eq(operand.clone()),
            "$ne" => Operator::Ne(operand.clone()),
            "$gt" => Operator::Gt(operand.clone()),
            "$gte" => Operator::Gte(operand.clone()),
            "$lt" => Operator::Lt(operand.clone()),
            "$lte" => Operator::Lte(operand.clone()),
            "$in" => Operator::In(operand_list(name, operand)?),
            "$nin" => Operator::Nin(operand_list(name, operand)?),
            other => {
                return Err(StoreError::InvalidQuery(format!(
                    "unknown operator '{}'",
                    other
                )))
            }
        };
        Ok(op)
    }

    /// The `$name` this operator is written as.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Eq(_) => "$eq",
            Operator::Ne(_) => "$ne",
            Operator::Gt(_) => "$gt",
            Operator::Gte(_) => "$gte",
            Operator::Lt(_) => "$lt",
            Operator::Lte(_) => "$lte",
            Operator::In(_) => "$in",
            Operator::Nin(_) => "$nin",
        }
    }

    /// Checks `actual` against this operator.
    ///
    /// Ordering operators fail on incomparable pairs.
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Operator::Eq(expected) => values_equal(actual, expected),
            Operator::Ne(expected) => !values_equal(actual, expected),
            Operator::Gt(bound) => compare_values(actual, bound) == Some(Ordering::Greater),
            Operator::Gte(bound) => matches!(
                compare_values(actual, bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::Lt(bound) => compare_values(actual, bound) == Some(Ordering::Less),
            Operator::Lte(bound) => matches!(
                compare_values(actual, bound),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::In(candidates) => contains_value(candidates, actual),
            Operator::Nin(candidates) => !contains_value(candidates, actual),
        }
    }
}

fn operand_list(name: &str, operand: &Value) -> Result<Vec<Value>> {
    match operand {
        Value::Array(items) => Ok(items.clone()),
        _ => Err(StoreError::InvalidQuery(format!(
            "operator '{}' expects an array",
            name
        ))),
    }
}

// == Condition ==
/// What a single query field requires of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field must equal the literal.
    Equals(Value),
    /// Field must pass every operator. An empty list passes any value.
    Operators(Vec<Operator>),
}

impl Condition {
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Condition::Equals(expected) => values_equal(actual, expected),
            Condition::Operators(ops) => ops.iter().all(|op| op.matches(actual)),
        }
    }
}

// == Query ==
/// A conjunction of per-field conditions.
///
/// Fields absent from a record never match. The empty query matches every
/// record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    conditions: Vec<(String, Condition)>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON query document.
    ///
    /// An object value is an operator mapping; any other value is an
    /// equality literal.
    pub fn from_json(doc: &Map<String, Value>) -> Result<Self> {
        let mut conditions = Vec::with_capacity(doc.len());
        for (field, condition_doc) in doc {
            let condition = match condition_doc {
                Value::Object(ops) => Condition::Operators(
                    ops.iter()
                        .map(|(name, operand)| Operator::parse(name, operand))
                        .collect::<Result<Vec<_>>>()?,
                ),
                literal => Condition::Equals(literal.clone()),
            };
            conditions.push((field.clone(), condition));
        }
        Ok(Self { conditions })
    }

    /// Parses any JSON value; `null` is the empty query.
    pub fn from_value(doc: &Value) -> Result<Self> {
        match doc {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Self::from_json(map),
            other => Err(StoreError::InvalidQuery(format!(
                "query must be an object, got {}",
                other
            ))),
        }
    }

    /// Requires `field` to equal `value`.
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions
            .push((field.into(), Condition::Equals(value.into())));
        self
    }

    /// Adds an operator on `field`, joining any operators already on it.
    pub fn with_operator(mut self, field: impl Into<String>, op: Operator) -> Self {
        let field = field.into();
        let existing = self.conditions.iter_mut().find_map(|(name, cond)| match cond {
            Condition::Operators(ops) if *name == field => Some(ops),
            _ => None,
        });
        match existing {
            Some(ops) => ops.push(op),
            None => self.conditions.push((field, Condition::Operators(vec![op]))),
        }
        self
    }

    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_operator(field, Operator::Eq(value.into()))
    }

    pub fn ne(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_operator(field, Operator::Ne(value.into()))
    }

    pub fn gt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_operator(field, Operator::Gt(value.into()))
    }

    pub fn gte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_operator(field, Operator::Gte(value.into()))
    }

    pub fn lt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_operator(field, Operator::Lt(value.into()))
    }

    pub fn lte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_operator(field, Operator::Lte(value.into()))
    }

    pub fn is_in<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.with_operator(field, Operator::In(values))
    }

    pub fn not_in<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.with_operator(field, Operator::Nin(values))
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns true if `record` satisfies every condition.
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|(field, condition)| {
            record
                .get(field)
                .is_some_and(|actual| condition.matches(actual))
        })
    }
}
