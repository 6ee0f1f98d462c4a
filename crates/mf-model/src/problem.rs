//! Problems: a model tree plus driver declarations.

use mf_core::MfResult;

use crate::group::Group;
use crate::system::System;

/// A constraint declaration with optional bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintDecl {
    pub path: String,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

/// Optimization-facing declarations referencing dotted variable paths.
///
/// Declarations are recorded unvalidated; paths are checked when the
/// owning problem is set up.
#[derive(Debug, Default)]
pub struct Driver {
    pub(crate) desvars: Vec<String>,
    pub(crate) objectives: Vec<String>,
    pub(crate) constraints: Vec<ConstraintDecl>,
}

impl Driver {
    /// Declare a design variable.
    pub fn add_desvar(&mut self, path: impl Into<String>) {
        self.desvars.push(path.into());
    }

    /// Declare an objective.
    pub fn add_objective(&mut self, path: impl Into<String>) {
        self.objectives.push(path.into());
    }

    /// Declare a constraint with optional lower/upper bounds.
    pub fn add_constraint(
        &mut self,
        path: impl Into<String>,
        lower: Option<f64>,
        upper: Option<f64>,
    ) {
        self.constraints.push(ConstraintDecl {
            path: path.into(),
            lower,
            upper,
        });
    }
}

/// A model tree awaiting setup.
#[derive(Debug, Default)]
pub struct Problem {
    pub root: Group,
    pub driver: Driver,
}

impl Problem {
    pub fn new(root: Group) -> Self {
        Self {
            root,
            driver: Driver::default(),
        }
    }

    /// Validate and freeze the tree into an executable `System`.
    ///
    /// All deferred construction errors surface here: duplicate names,
    /// malformed or unresolvable paths, direction and length mismatches.
    pub fn setup(self) -> MfResult<System> {
        System::compile(self.root, self.driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_records_declarations() {
        let mut driver = Driver::default();
        driver.add_desvar("P.x");
        driver.add_objective("par.G0.C9.c");
        driver.add_constraint("par.G0.C9.d", Some(0.0), None);

        assert_eq!(driver.desvars, ["P.x"]);
        assert_eq!(driver.objectives, ["par.G0.C9.c"]);
        assert_eq!(driver.constraints.len(), 1);
        assert_eq!(driver.constraints[0].lower, Some(0.0));
        assert_eq!(driver.constraints[0].upper, None);
    }

    #[test]
    fn empty_problem_sets_up() {
        let system = Problem::default().setup().unwrap();
        assert_eq!(system.component_count(), 0);
        assert_eq!(system.connection_count(), 0);
    }
}
