//! # Class Registry
//!
//! The classes a module provides, keyed by the names solver configurations
//! use (`cloudbalancing::CloudBalance`). One map per kind of class; a name
//! found under the wrong kind is reported as such rather than as missing.

use std::collections::HashMap;
use std::fmt;

use crate::domain::{Constraint, EasyScoreCalculator, ImportError, PlanningSolution};
use crate::error::SolverError;

// Type aliases for factory functions
pub type SolutionImporter = fn(&[u8]) -> Result<Box<dyn PlanningSolution>, ImportError>;
pub type EasyScoreCalculatorFactory = fn() -> Box<dyn EasyScoreCalculator>;
pub type ConstraintFactory = fn() -> Box<dyn Constraint>;

/// What a configuration can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Solution,
    Entity,
    EasyScoreCalculator,
    Constraint,
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Solution => "solution class",
            Self::Entity => "entity class",
            Self::EasyScoreCalculator => "easy score calculator class",
            Self::Constraint => "constraint class",
        })
    }
}

/// A planning solution class: how to import it and which entity classes
/// it contains.
#[derive(Clone)]
pub struct SolutionClass {
    pub entity_classes: Vec<String>,
    pub importer: SolutionImporter,
}

impl fmt::Debug for SolutionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolutionClass")
            .field("entity_classes", &self.entity_classes)
            .finish_non_exhaustive()
    }
}

/// Registry of every class in a module.
#[derive(Default, Clone)]
pub struct ClassRegistry {
    pub solutions: HashMap<String, SolutionClass>,
    pub entities: HashMap<String, ()>,
    pub easy_score_calculators: HashMap<String, EasyScoreCalculatorFactory>,
    pub constraints: HashMap<String, ConstraintFactory>,
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn names<'a>(m: Vec<&'a String>) -> Vec<&'a str> {
            let mut v: Vec<&str> = m.into_iter().map(String::as_str).collect();
            v.sort_unstable();
            v
        }
        f.debug_struct("ClassRegistry")
            .field("solutions", &names(self.solutions.keys().collect()))
            .field("entities", &names(self.entities.keys().collect()))
            .field(
                "easy_score_calculators",
                &names(self.easy_score_calculators.keys().collect()),
            )
            .field("constraints", &names(self.constraints.keys().collect()))
            .finish()
    }
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a solution class along with the entity classes it contains.
    /// The entity classes are registered too.
    pub fn register_solution(
        &mut self,
        name: impl Into<String>,
        entity_classes: &[&str],
        importer: SolutionImporter,
    ) {
        for entity in entity_classes {
            self.register_entity(*entity);
        }
        self.solutions.insert(
            name.into(),
            SolutionClass {
                entity_classes: entity_classes.iter().map(|e| e.to_string()).collect(),
                importer,
            },
        );
    }

    pub fn register_entity(&mut self, name: impl Into<String>) {
        self.entities.insert(name.into(), ());
    }

    pub fn register_easy_score_calculator(
        &mut self,
        name: impl Into<String>,
        factory: EasyScoreCalculatorFactory,
    ) {
        self.easy_score_calculators.insert(name.into(), factory);
    }

    pub fn register_constraint(&mut self, name: impl Into<String>, factory: ConstraintFactory) {
        self.constraints.insert(name.into(), factory);
    }

    /// The kind a name is registered under, if any.
    pub fn kind_of(&self, name: &str) -> Option<ClassKind> {
        if self.solutions.contains_key(name) {
            Some(ClassKind::Solution)
        } else if self.entities.contains_key(name) {
            Some(ClassKind::Entity)
        } else if self.easy_score_calculators.contains_key(name) {
            Some(ClassKind::EasyScoreCalculator)
        } else if self.constraints.contains_key(name) {
            Some(ClassKind::Constraint)
        } else {
            None
        }
    }

    fn missing(&self, name: &str, expected: ClassKind) -> SolverError {
        match self.kind_of(name) {
            Some(actual) => SolverError::ClassKindMismatch {
                name: name.to_string(),
                expected,
                actual,
            },
            None => SolverError::ClassNotFound {
                kind: expected,
                name: name.to_string(),
            },
        }
    }

    pub fn solution(&self, name: &str) -> Result<&SolutionClass, SolverError> {
        self.solutions
            .get(name)
            .ok_or_else(|| self.missing(name, ClassKind::Solution))
    }

    pub fn entity(&self, name: &str) -> Result<(), SolverError> {
        if self.entities.contains_key(name) {
            Ok(())
        } else {
            Err(self.missing(name, ClassKind::Entity))
        }
    }

    /// Instantiate an easy score calculator.
    pub fn easy_score_calculator(
        &self,
        name: &str,
    ) -> Result<Box<dyn EasyScoreCalculator>, SolverError> {
        self.easy_score_calculators
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| self.missing(name, ClassKind::EasyScoreCalculator))
    }

    /// Instantiate a constraint.
    pub fn constraint(&self, name: &str) -> Result<Box<dyn Constraint>, SolverError> {
        self.constraints
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| self.missing(name, ClassKind::Constraint))
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
            && self.entities.is_empty()
            && self.easy_score_calculators.is_empty()
            && self.constraints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{Slots, SlotsCalculator};

    fn import_slots(_: &[u8]) -> Result<Box<dyn PlanningSolution>, ImportError> {
        Ok(Box::new(Slots::new(2, 2)))
    }

    fn registry() -> ClassRegistry {
        let mut r = ClassRegistry::new();
        r.register_solution("test::Slots", &["test::Item"], import_slots);
        r.register_easy_score_calculator("test::SlotsCalculator", || Box::new(SlotsCalculator));
        r
    }

    #[test]
    fn solution_registers_its_entities() {
        let r = registry();
        assert!(r.entity("test::Item").is_ok());
        assert_eq!(r.solution("test::Slots").unwrap().entity_classes, ["test::Item"]);
    }

    #[test]
    fn debug_lists_sorted_names() {
        let mut r = registry();
        r.register_entity("test::Another");
        let out = format!("{r:?}");
        assert!(out.contains(r#"entities: ["test::Another", "test::Item"]"#), "{out}");
        assert!(out.contains(r#"easy_score_calculators: ["test::SlotsCalculator"]"#));
    }

    #[test]
    fn unknown_name_is_not_found() {
        let err = registry().solution("test::Nope").unwrap_err();
        assert!(matches!(
            err,
            SolverError::ClassNotFound { kind: ClassKind::Solution, ref name } if name == "test::Nope"
        ));
    }

    #[test]
    fn wrong_kind_is_a_mismatch() {
        let err = registry().solution("test::SlotsCalculator").err().unwrap();
        assert!(matches!(
            err,
            SolverError::ClassKindMismatch {
                expected: ClassKind::Solution,
                actual: ClassKind::EasyScoreCalculator,
                ..
            }
        ));
        assert!(err.to_string().contains("easy score calculator class"));
    }

    #[test]
    fn debug_lists_names_only() {
        let text = format!("{:?}", registry());
        assert!(text.contains("test::Slots"));
        assert!(ClassRegistry::new().is_empty());
    }
}
