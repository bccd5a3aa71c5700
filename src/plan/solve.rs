//! Lower the formulated program into the LP backend and run it

use std::collections::BTreeMap;

use good_lp::{constraint, default_solver, variable, variables, Expression, Solution, SolverModel, Variable};

use crate::core::error::{PlanError, Result};
use crate::plan::model::{PlanModel, Relation};

/// Solve the program and return the value of every declared variable.
///
/// This is the only potentially long-running step of the pipeline; it runs
/// as a single blocking call with no timeout. Infeasible, unbounded, and
/// backend failures all surface as `PlanError::Solver` with the backend's
/// diagnostic.
pub fn solve(model: &PlanModel) -> Result<BTreeMap<String, f64>> {
    let mut vars = variables!();
    let mut by_name: BTreeMap<&str, Variable> = BTreeMap::new();
    for name in &model.variables {
        let var = vars.add(variable().min(0.0).name(name.clone()));
        by_name.insert(name.as_str(), var);
    }
    let lookup = |name: &str| -> Result<Variable> {
        by_name.get(name).copied().ok_or_else(|| {
            PlanError::Solver(format!("model references undeclared variable '{name}'"))
        })
    };

    let mut objective = Expression::from(0.0);
    for (name, coeff) in &model.objective {
        objective += *coeff * lookup(name)?;
    }

    let mut problem = vars.minimise(objective).using(default_solver);
    for c in &model.constraints {
        let mut lhs = Expression::from(0.0);
        for (name, coeff) in &c.terms {
            lhs += *coeff * lookup(name)?;
        }
        problem = problem.with(match c.relation {
            Relation::LessEq => constraint::leq(lhs, c.rhs),
            Relation::GreaterEq => constraint::geq(lhs, c.rhs),
            Relation::Eq => constraint::eq(lhs, c.rhs),
        });
    }

    let solution = problem
        .solve()
        .map_err(|e| PlanError::Solver(e.to_string()))?;

    Ok(model
        .variables
        .iter()
        .map(|name| (name.clone(), solution.value(by_name[name.as_str()])))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::model::Constraint;

    fn model(constraints: Vec<Constraint>) -> PlanModel {
        PlanModel {
            variables: vec!["x".to_string(), "y".to_string()],
            objective: vec![("x".to_string(), 1.0), ("y".to_string(), 2.0)],
            constraints,
        }
    }

    #[test]
    fn test_solves_a_small_program() {
        // minimize x + 2y subject to x + y >= 3, x <= 2.
        let assignment = solve(&model(vec![
            Constraint {
                label: "sum".to_string(),
                terms: vec![("x".to_string(), 1.0), ("y".to_string(), 1.0)],
                relation: Relation::GreaterEq,
                rhs: 3.0,
            },
            Constraint {
                label: "cap".to_string(),
                terms: vec![("x".to_string(), 1.0)],
                relation: Relation::LessEq,
                rhs: 2.0,
            },
        ]))
        .unwrap();
        assert!((assignment["x"] - 2.0).abs() < 1e-6);
        assert!((assignment["y"] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_infeasible_program_is_a_solver_error() {
        let err = solve(&model(vec![
            Constraint {
                label: "low".to_string(),
                terms: vec![("x".to_string(), 1.0)],
                relation: Relation::LessEq,
                rhs: 1.0,
            },
            Constraint {
                label: "high".to_string(),
                terms: vec![("x".to_string(), 1.0)],
                relation: Relation::GreaterEq,
                rhs: 2.0,
            },
        ]))
        .unwrap_err();
        assert!(matches!(err, PlanError::Solver(_)));
    }

    #[test]
    fn test_undeclared_variable_is_a_solver_error() {
        let mut bad = model(vec![]);
        bad.objective.push(("ghost".to_string(), 1.0));
        assert!(matches!(solve(&bad), Err(PlanError::Solver(_))));
    }
}
