use crate::{
    error::{AdapterError, Result},
    merge::merge,
    normalize::normalize,
};
use rsql_model::{
    ComparisonOperator, Condition, Entry, Expression, LogicOperator, Operand, Predicate, Selector,
};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Defensive bound on expression-tree depth; a deeper tree fails with
/// `AdapterError::DepthExceeded` instead of overflowing the call stack.
pub const MAX_DEPTH: usize = 64;

/// Compiles a filter expression tree into a disjunctive list of predicate
/// objects. Each object is a conjunction of per-field constraints; the list
/// as a whole reads as OR over its elements.
pub fn compile(expression: &Expression) -> Result<Vec<Predicate>> {
    compile_at(expression, 0)
}

fn compile_at(expression: &Expression, depth: usize) -> Result<Vec<Predicate>> {
    if depth > MAX_DEPTH {
        return Err(AdapterError::DepthExceeded { limit: MAX_DEPTH });
    }

    match expression {
        Expression::Logic {
            operator: LogicOperator::Or,
            left,
            right,
        } => {
            trace!("compiling OR node at depth {}", depth);
            let mut branches = compile_at(left, depth + 1)?;
            branches.extend(compile_at(right, depth + 1)?);
            Ok(branches)
        }
        Expression::Logic {
            operator: LogicOperator::And,
            left,
            right,
        } => {
            trace!("compiling AND node at depth {}", depth);
            compile_and(left, right, depth)
        }
        Expression::Comparison {
            selector,
            operator,
            operand,
        } => compile_comparison(selector, *operator, operand),
    }
}

/// AND: fold both branch lists into one object with the deep merge, then
/// re-install a composite for every selector constrained on both sides,
/// since the plain merge would keep only the right-hand constraint.
fn compile_and(left: &Expression, right: &Expression, depth: usize) -> Result<Vec<Predicate>> {
    let compiled = [compile_at(left, depth + 1)?, compile_at(right, depth + 1)?];

    let mut combined = Predicate::new();
    for object in compiled.iter().flatten() {
        combined = merge(&combined, object);
    }

    let mut left_selectors = BTreeSet::new();
    collect_selectors(left, &mut left_selectors);
    let mut right_selectors = BTreeSet::new();
    collect_selectors(right, &mut right_selectors);

    for selector in left_selectors.intersection(&right_selectors) {
        let mut conditions = Vec::new();
        collect_conditions(left, selector, &mut conditions)?;
        collect_conditions(right, selector, &mut conditions)?;
        debug!(
            "combining {} constraints on '{}' into a composite",
            conditions.len(),
            selector
        );

        let segments: Vec<&str> = selector.split('.').collect();
        install_composite(&mut combined, &segments, Condition::And(conditions));
    }

    Ok(vec![combined])
}

fn compile_comparison(
    selector: &Selector,
    operator: ComparisonOperator,
    operand: &Operand,
) -> Result<Vec<Predicate>> {
    validate_selector(selector)?;

    let segments: Vec<&str> = selector.segments().collect();
    let (relations, leaf) = match segments.split_last() {
        Some((leaf, relations)) => (relations, *leaf),
        None => return Err(AdapterError::EmptySelector),
    };

    let mut object = Predicate::new();
    object.insert(leaf, Entry::Condition(leaf_condition(operator, operand)?));

    // Wrap relation segments innermost to outermost
    for relation in relations.iter().rev() {
        let mut outer = Predicate::new();
        outer.insert(*relation, Entry::Nested(object));
        object = outer;
    }

    Ok(vec![object])
}

/// Builds the operator value for a comparison on its leaf field.
fn leaf_condition(operator: ComparisonOperator, operand: &Operand) -> Result<Condition> {
    match operator {
        ComparisonOperator::Equal => Ok(equality_condition(scalar_operand(operator, operand)?)),
        ComparisonOperator::NotEqual => {
            Ok(equality_condition(scalar_operand(operator, operand)?).negated())
        }
        ComparisonOperator::GreaterThan => Ok(Condition::MoreThan(normalize(scalar_operand(
            operator, operand,
        )?))),
        ComparisonOperator::GreaterOrEqual => Ok(Condition::MoreThanOrEqual(normalize(
            scalar_operand(operator, operand)?,
        ))),
        ComparisonOperator::LessThan => Ok(Condition::LessThan(normalize(scalar_operand(
            operator, operand,
        )?))),
        ComparisonOperator::LessOrEqual => Ok(Condition::LessThanOrEqual(normalize(
            scalar_operand(operator, operand)?,
        ))),
        ComparisonOperator::In => Ok(Condition::In(list_operand(operand))),
        ComparisonOperator::NotIn => Ok(Condition::In(list_operand(operand)).negated()),
    }
}

/// Equality forms: the NULL literal, `*` wildcards at either end, or plain
/// equality on the unmodified text.
fn equality_condition(value: &str) -> Condition {
    if value == "NULL" {
        return Condition::IsNull;
    }

    let leading = value.starts_with('*');
    let trailing = value.ends_with('*');
    if !leading && !trailing {
        return Condition::Equal(value.to_string());
    }

    let mut pattern = value.to_string();
    if leading {
        pattern.replace_range(..1, "%");
    }
    if trailing {
        pattern.truncate(pattern.len() - 1);
        pattern.push('%');
    }
    Condition::ILike(pattern)
}

fn scalar_operand<'a>(operator: ComparisonOperator, operand: &'a Operand) -> Result<&'a str> {
    match operand {
        Operand::Value(value) => Ok(value),
        Operand::List(_) => Err(AdapterError::ScalarOperandExpected { operator }),
    }
}

fn list_operand(operand: &Operand) -> Vec<String> {
    match operand {
        Operand::Value(value) => vec![value.clone()],
        Operand::List(values) => values.clone(),
    }
}

fn validate_selector(selector: &Selector) -> Result<()> {
    if selector.as_str().is_empty() {
        return Err(AdapterError::EmptySelector);
    }
    if selector.segments().any(str::is_empty) {
        return Err(AdapterError::EmptySelectorSegment {
            selector: selector.as_str().to_string(),
        });
    }
    Ok(())
}

/// Full selectors of every comparison in the subtree.
fn collect_selectors<'a>(expression: &'a Expression, into: &mut BTreeSet<&'a str>) {
    match expression {
        Expression::Comparison { selector, .. } => {
            into.insert(selector.as_str());
        }
        Expression::Logic { left, right, .. } => {
            collect_selectors(left, into);
            collect_selectors(right, into);
        }
    }
}

/// Leaf conditions of every comparison on `selector` in the subtree, in
/// left-to-right order.
fn collect_conditions(
    expression: &Expression,
    selector: &str,
    into: &mut Vec<Condition>,
) -> Result<()> {
    match expression {
        Expression::Comparison {
            selector: candidate,
            operator,
            operand,
        } if candidate.as_str() == selector => {
            into.push(leaf_condition(*operator, operand)?);
        }
        Expression::Comparison { .. } => {}
        Expression::Logic { left, right, .. } => {
            collect_conditions(left, selector, into)?;
            collect_conditions(right, selector, into)?;
        }
    }
    Ok(())
}

/// Places a composite condition at the leaf of a (possibly nested) selector
/// path, replacing whatever the plain merge left there.
fn install_composite(object: &mut Predicate, segments: &[&str], condition: Condition) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        object.insert(*head, Entry::Condition(condition));
        return;
    }

    if !matches!(object.get(*head), Some(Entry::Nested(_))) {
        object.insert(*head, Entry::Nested(Predicate::new()));
    }
    match object.get_mut(*head) {
        Some(Entry::Nested(inner)) => install_composite(inner, rest, condition),
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsql_model::Scalar;

    fn eq(selector: &str, value: &str) -> Expression {
        Expression::comparison(selector, ComparisonOperator::Equal, Operand::value(value))
    }

    fn single(result: Vec<Predicate>) -> Predicate {
        assert_eq!(result.len(), 1, "expected one predicate object");
        result.into_iter().next().unwrap()
    }

    #[test]
    fn test_plain_equality() {
        let object = single(compile(&eq("name", "John")).unwrap());
        assert_eq!(
            object.get("name"),
            Some(&Entry::Condition(Condition::Equal("John".to_string())))
        );
    }

    #[test]
    fn test_wildcard_patterns() {
        let cases = [
            ("*John", "%John"),
            ("John*", "John%"),
            ("*John*", "%John%"),
            ("*", "%"),
        ];
        for (value, pattern) in cases {
            let object = single(compile(&eq("name", value)).unwrap());
            assert_eq!(
                object.get("name"),
                Some(&Entry::Condition(Condition::ILike(pattern.to_string()))),
                "value {value:?}"
            );
        }
    }

    #[test]
    fn test_null_literal() {
        let object = single(compile(&eq("id", "NULL")).unwrap());
        assert_eq!(object.get("id"), Some(&Entry::Condition(Condition::IsNull)));
    }

    #[test]
    fn test_not_equal_mirrors_equality_forms() {
        let neq = |value: &str| {
            Expression::comparison("f", ComparisonOperator::NotEqual, Operand::value(value))
        };

        let object = single(compile(&neq("17")).unwrap());
        assert_eq!(
            object.get("f"),
            Some(&Entry::Condition(
                Condition::Equal("17".to_string()).negated()
            ))
        );

        let object = single(compile(&neq("John*")).unwrap());
        assert_eq!(
            object.get("f"),
            Some(&Entry::Condition(
                Condition::ILike("John%".to_string()).negated()
            ))
        );

        let object = single(compile(&neq("NULL")).unwrap());
        assert_eq!(
            object.get("f"),
            Some(&Entry::Condition(Condition::IsNull.negated()))
        );
    }

    #[test]
    fn test_in_accepts_single_value_operand() {
        let expr = Expression::comparison("name", ComparisonOperator::In, Operand::value("John"));
        let object = single(compile(&expr).unwrap());
        assert_eq!(
            object.get("name"),
            Some(&Entry::Condition(Condition::In(vec!["John".to_string()])))
        );
    }

    #[test]
    fn test_list_operand_on_scalar_operator_fails() {
        let expr = Expression::comparison(
            "name",
            ComparisonOperator::Equal,
            Operand::list(["a", "b"]),
        );
        assert_eq!(
            compile(&expr),
            Err(AdapterError::ScalarOperandExpected {
                operator: ComparisonOperator::Equal
            })
        );
    }

    #[test]
    fn test_empty_selector_fails() {
        assert_eq!(compile(&eq("", "x")), Err(AdapterError::EmptySelector));
    }

    #[test]
    fn test_empty_selector_segment_fails() {
        assert_eq!(
            compile(&eq("a..b", "x")),
            Err(AdapterError::EmptySelectorSegment {
                selector: "a..b".to_string()
            })
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut expr = eq("a", "1");
        for _ in 0..=MAX_DEPTH {
            expr = Expression::and(expr, eq("b", "2"));
        }
        assert_eq!(
            compile(&expr),
            Err(AdapterError::DepthExceeded { limit: MAX_DEPTH })
        );
    }

    #[test]
    fn test_shared_field_on_nested_and_still_composites() {
        // amount appears on both sides even though the left side is itself
        // an AND; both amount constraints must end up in one composite.
        let expr = Expression::and(
            Expression::and(
                Expression::comparison(
                    "amount",
                    ComparisonOperator::GreaterThan,
                    Operand::value("0"),
                ),
                eq("name", "Product"),
            ),
            Expression::comparison("amount", ComparisonOperator::LessThan, Operand::value("20")),
        );

        let object = single(compile(&expr).unwrap());
        assert_eq!(
            object.get("amount"),
            Some(&Entry::Condition(Condition::And(vec![
                Condition::MoreThan(Scalar::Text("0".to_string())),
                Condition::LessThan(Scalar::Text("20".to_string())),
            ])))
        );
        assert_eq!(
            object.get("name"),
            Some(&Entry::Condition(Condition::Equal("Product".to_string())))
        );
    }
}
