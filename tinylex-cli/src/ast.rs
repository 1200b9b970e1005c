//! The expression tree produced by [`crate::parser::parse`] and its
//! evaluator, grounded on `original_source/src/main.py`'s `LAtom` hierarchy.

use std::collections::HashMap;
use std::fmt;

/// A scope maps identifiers to already-evaluated values.
pub type Scope = HashMap<String, LAtom>;

/// A node of the demo language's expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LAtom {
    /// An identifier, or one of the built-in operator names `"+"`/`"++"`.
    Id(String),
    /// A parenthesized list of sub-expressions; a two-element list whose
    /// head evaluates to a lambda or a built-in is a function application.
    List(Vec<LAtom>),
    Num(i64),
    /// `lambda arg: expr`, closing over `context` at the point it is
    /// itself evaluated (so a lambda returned from inside another lambda's
    /// body still sees its defining scope).
    LambdaExpr {
        arg: String,
        expr: Box<LAtom>,
        context: Scope,
    },
}

/// Errors raised while evaluating an already-parsed [`LAtom`] tree.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("undefined identifier {0:?}")]
    UndefinedId(String),
    #[error("cannot add a non-list argument")]
    AddNonList,
    #[error("cannot concatenate a non-list argument")]
    ConcatNonList,
}

impl LAtom {
    pub fn evaluate(&self, scope: &Scope) -> Result<LAtom, EvalError> {
        match self {
            LAtom::Id(id) if id == "+" || id == "++" => Ok(self.clone()),
            LAtom::Id(id) => scope
                .get(id)
                .cloned()
                .ok_or_else(|| EvalError::UndefinedId(id.clone())),
            LAtom::Num(_) => Ok(self.clone()),
            LAtom::LambdaExpr { arg, expr, context } => {
                let mut merged = context.clone();
                merged.extend(scope.clone());
                Ok(LAtom::LambdaExpr {
                    arg: arg.clone(),
                    expr: expr.clone(),
                    context: merged,
                })
            }
            LAtom::List(items) => {
                let evaluated: Vec<LAtom> = items
                    .iter()
                    .map(|item| item.evaluate(scope))
                    .collect::<Result<_, _>>()?;
                if evaluated.len() != 2 {
                    return Ok(LAtom::List(evaluated));
                }
                apply(&evaluated[0], &evaluated[1])
            }
        }
    }
}

/// Applies `f` to `arg` if `f` is a lambda or a built-in operator; otherwise
/// the pair is just an ordinary two-element list.
fn apply(f: &LAtom, arg: &LAtom) -> Result<LAtom, EvalError> {
    match f {
        LAtom::LambdaExpr { arg: param, expr, context } => {
            let mut call_scope = context.clone();
            call_scope.insert(param.clone(), arg.clone());
            expr.evaluate(&call_scope)
        }
        LAtom::Id(op) if op == "+" => {
            let LAtom::List(items) = arg else {
                return Err(EvalError::AddNonList);
            };
            Ok(LAtom::Num(sum_numbers(items)?))
        }
        LAtom::Id(op) if op == "++" => {
            let LAtom::List(items) = arg else {
                return Err(EvalError::ConcatNonList);
            };
            let mut spliced = Vec::new();
            for item in items {
                match item {
                    LAtom::List(inner) => spliced.extend(inner.iter().cloned()),
                    other => spliced.push(other.clone()),
                }
            }
            Ok(LAtom::List(spliced))
        }
        _ => Ok(LAtom::List(vec![f.clone(), arg.clone()])),
    }
}

/// Recursively sums a (possibly nested) list of numbers, mirroring the
/// reference's `summer`/`toNumber` closures.
fn sum_numbers(items: &[LAtom]) -> Result<i64, EvalError> {
    items
        .iter()
        .map(|item| match item {
            LAtom::Num(n) => Ok(*n),
            LAtom::List(inner) => sum_numbers(inner),
            _ => Err(EvalError::AddNonList),
        })
        .sum()
}

impl fmt::Display for LAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LAtom::Id(id) => write!(f, "{id}"),
            LAtom::Num(n) => write!(f, "{n}"),
            LAtom::LambdaExpr { .. } => write!(f, "<lambda>"),
            LAtom::List(items) => {
                if items.is_empty() {
                    return write!(f, "()");
                }
                write!(f, "( ")?;
                for item in items {
                    write!(f, "{item} ")?;
                }
                write!(f, ")")
            }
        }
    }
}
