//! # Solver Factory
//!
//! Parses a solver configuration out of a container and builds solvers from
//! it. Parsing only checks structure; [`SolverFactory::build_solver`] is
//! where names are resolved against the module, so that is where a config
//! that refers to a missing class or session fails.

use swb_config::{PhaseConfig, SolverConfig};

use crate::container::SolverContainer;
use crate::domain::PlanningSolution;
use crate::error::SolverError;
use crate::solver::{ScoreCalculation, Solver, DEFAULT_RANDOM_SEED};
use crate::termination::Termination;

#[derive(Debug)]
pub struct SolverFactory {
    container: SolverContainer,
    resource: String,
    config: SolverConfig,
}

impl SolverFactory {
    /// Read and parse the solver config stored at `resource` in the
    /// container.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` if the container has no such resource and
    /// `Config` if it does not parse.
    pub fn from_container_resource(
        container: SolverContainer,
        resource: &str,
    ) -> Result<Self, SolverError> {
        let bytes = container
            .resource(resource)
            .ok_or_else(|| SolverError::ResourceNotFound(resource.to_string()))?;
        let config = SolverConfig::from_yaml_slice(bytes)?;
        Ok(Self {
            resource: resource.to_string(),
            container,
            config,
        })
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn container(&self) -> &SolverContainer {
        &self.container
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Adjust the configuration before building. Solvers already built are
    /// not affected.
    pub fn config_mut(&mut self) -> &mut SolverConfig {
        &mut self.config
    }

    /// Resolve the configuration against the container and build a solver.
    ///
    /// # Errors
    ///
    /// Any unresolvable name or invalid setting in the configuration.
    pub fn build_solver(&self) -> Result<Solver, SolverError> {
        let config = &self.config;
        let classes = self.container.classes();

        let solution_name = config
            .solution_class
            .as_deref()
            .ok_or(SolverError::MissingField("solution_class"))?;
        let solution = classes.solution(solution_name)?;

        if config.entity_classes.is_empty() {
            return Err(SolverError::MissingField("entity_classes"));
        }
        for entity in &config.entity_classes {
            classes.entity(entity)?;
            if !solution.entity_classes.contains(entity) {
                return Err(SolverError::EntityNotDeclared {
                    entity: entity.clone(),
                    solution: solution_name.to_string(),
                });
            }
        }

        let score_calculation = self.score_calculation()?;

        let termination = match &config.termination {
            Some(t) => Termination::from_config(t)?,
            None => Termination::default(),
        };

        let phases = config.effective_phases();
        let open_ended = phases.iter().any(|p| {
            matches!(p, PhaseConfig::LocalSearch(ls) if ls.step_count_limit.is_none())
        });
        if open_ended && !termination.is_bounded() {
            tracing::warn!(
                resource = %self.resource,
                "solver config has no termination; local search will not stop on its own"
            );
        }

        Ok(Solver {
            score_calculation,
            termination,
            phases,
            random_seed: config.random_seed.unwrap_or(DEFAULT_RANDOM_SEED),
        })
    }

    // Easy score calculator first, then the named session, then the
    // module's default session.
    fn score_calculation(&self) -> Result<ScoreCalculation, SolverError> {
        let classes = self.container.classes();
        let score_director = self.config.score_director.as_ref();

        if let Some(name) = score_director.and_then(|sd| sd.easy_score_calculator_class.as_deref())
        {
            return Ok(ScoreCalculation::Easy(classes.easy_score_calculator(name)?));
        }

        let session_name = self
            .config
            .session_name()
            .or_else(|| self.container.default_session_name())
            .ok_or(SolverError::NoScoreCalculation)?;
        let session = self
            .container
            .module()
            .session(session_name)
            .ok_or_else(|| SolverError::SessionNotFound(session_name.to_string()))?;
        if session.constraints.is_empty() {
            return Err(SolverError::EmptySession(session.name.clone()));
        }
        let constraints = session
            .constraints
            .iter()
            .map(|name| classes.constraint(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScoreCalculation::Session {
            name: session.name.clone(),
            constraints,
        })
    }

    /// Import a problem with the configured solution class's importer.
    ///
    /// # Errors
    ///
    /// `MissingField`/`ClassNotFound` if the solution class does not
    /// resolve, `Import` if the payload is rejected.
    pub fn import_solution(&self, payload: &[u8]) -> Result<Box<dyn PlanningSolution>, SolverError> {
        let name = self
            .config
            .solution_class
            .as_deref()
            .ok_or(SolverError::MissingField("solution_class"))?;
        let class = self.container.classes().solution(name)?;
        Ok((class.importer)(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::container::BuildArtifact;
    use crate::domain::testing::{OneItemPerSlot, PreferLowSlots, Slots, SlotsCalculator};
    use crate::domain::ImportError;
    use crate::registry::{ClassKind, ClassRegistry};
    use swb_config::MODULE_DESCRIPTOR_PATH;

    const CONFIG: &str = "solver/slots.yaml";

    fn import_slots(payload: &[u8]) -> Result<Box<dyn PlanningSolution>, ImportError> {
        let n: usize = std::str::from_utf8(payload)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(|| ImportError::Malformed("expected an item count".into()))?;
        Ok(Box::new(Slots::new(n, n)))
    }

    fn classes() -> Arc<ClassRegistry> {
        let mut r = ClassRegistry::new();
        r.register_solution("test::Slots", &["test::Item"], import_slots);
        r.register_entity("test::Stray");
        r.register_easy_score_calculator("test::SlotsCalculator", || Box::new(SlotsCalculator));
        r.register_constraint("test::OneItemPerSlot", || Box::new(OneItemPerSlot));
        r.register_constraint("test::PreferLowSlots", || Box::new(PreferLowSlots));
        Arc::new(r)
    }

    const MODULE: &str = r#"
sessions:
  - name: slotsSession
    default: true
    constraints: [test::OneItemPerSlot, test::PreferLowSlots]
  - name: hollowSession
  - name: brokenSession
    constraints: [test::Missing]
"#;

    fn factory(config: &str) -> Result<SolverFactory, SolverError> {
        let artifact = BuildArtifact::new(classes())
            .with_resource(MODULE_DESCRIPTOR_PATH, MODULE)
            .with_resource(CONFIG, config);
        SolverFactory::from_container_resource(SolverContainer::new(artifact)?, CONFIG)
    }

    fn build(config: &str) -> Result<Solver, SolverError> {
        factory(config)?.build_solver()
    }

    const BASE: &str = "solution_class: test::Slots\nentity_classes: [test::Item]\n";

    #[test]
    fn missing_resource() {
        let container = SolverContainer::new(BuildArtifact::new(classes())).unwrap();
        let err = SolverFactory::from_container_resource(container, "nope.yaml").unwrap_err();
        assert!(matches!(err, SolverError::ResourceNotFound(ref r) if r == "nope.yaml"));
    }

    #[test]
    fn malformed_config_fails_at_parse() {
        let err = factory("solution_class: [").unwrap_err();
        assert!(matches!(err, SolverError::Config(_)));
    }

    #[test]
    fn default_session_when_nothing_configured() {
        let solver = build(BASE).unwrap();
        assert_eq!(solver.session_name(), Some("slotsSession"));
    }

    #[test]
    fn easy_calculator_takes_precedence() {
        let yaml = format!(
            "{BASE}score_director:\n  easy_score_calculator_class: test::SlotsCalculator\n  session_name: brokenSession\n"
        );
        let solver = build(&yaml).unwrap();
        assert_eq!(solver.session_name(), None);
    }

    #[test]
    fn unresolvable_names_fail_at_build() {
        let cases = [
            ("solution_class: test::Nope\nentity_classes: [test::Item]\n", "test::Nope"),
            ("solution_class: test::Slots\nentity_classes: [test::Ghost]\n", "test::Ghost"),
        ];
        for (yaml, name) in cases {
            let f = factory(yaml).unwrap();
            let err = f.build_solver().unwrap_err();
            assert!(err.to_string().contains(name), "{err}");
        }
    }

    #[test]
    fn entity_outside_solution_is_rejected() {
        let err = build("solution_class: test::Slots\nentity_classes: [test::Stray]\n").unwrap_err();
        assert!(matches!(err, SolverError::EntityNotDeclared { .. }));
    }

    #[test]
    fn missing_fields() {
        assert!(matches!(
            build("entity_classes: [test::Item]\n").unwrap_err(),
            SolverError::MissingField("solution_class")
        ));
        assert!(matches!(
            build("solution_class: test::Slots\n").unwrap_err(),
            SolverError::MissingField("entity_classes")
        ));
    }

    #[test]
    fn session_faults() {
        let with_session = |s: &str| format!("{BASE}score_director:\n  session_name: {s}\n");
        assert!(matches!(
            build(&with_session("nosuchSession")).unwrap_err(),
            SolverError::SessionNotFound(_)
        ));
        assert!(matches!(
            build(&with_session("hollowSession")).unwrap_err(),
            SolverError::EmptySession(_)
        ));
        assert!(matches!(
            build(&with_session("brokenSession")).unwrap_err(),
            SolverError::ClassNotFound {
                kind: ClassKind::Constraint,
                ..
            }
        ));
    }

    #[test]
    fn calculator_name_of_wrong_kind() {
        let yaml = format!(
            "{BASE}score_director:\n  easy_score_calculator_class: test::OneItemPerSlot\n"
        );
        assert!(matches!(
            build(&yaml).unwrap_err(),
            SolverError::ClassKindMismatch { .. }
        ));
    }

    #[test]
    fn no_session_anywhere_is_no_score_calculation() {
        let artifact = BuildArtifact::new(classes()).with_resource(CONFIG, BASE);
        let f = SolverFactory::from_container_resource(SolverContainer::new(artifact).unwrap(), CONFIG)
            .unwrap();
        assert!(matches!(
            f.build_solver().unwrap_err(),
            SolverError::NoScoreCalculation
        ));
    }

    #[test]
    fn config_mut_applies_to_next_build() {
        let mut f = factory(&format!("{BASE}termination:\n  minutes_spent_limit: 10\n")).unwrap();
        f.config_mut()
            .termination_mut()
            .override_time_spent_limit(std::time::Duration::from_millis(3000));
        let solver = f.build_solver().unwrap();
        assert_eq!(
            solver.termination().time_spent_limit(),
            Some(std::time::Duration::from_millis(3000))
        );
    }

    #[test]
    fn import_and_solve() {
        let mut f = factory(BASE).unwrap();
        f.config_mut().termination_mut().step_count_limit = Some(20);
        let problem = f.import_solution(b"3").unwrap();
        let outcome = f.build_solver().unwrap().solve(problem).unwrap();
        assert!(outcome.best_score.is_feasible());
        assert!(matches!(
            f.import_solution(b"three").unwrap_err(),
            SolverError::Import(ImportError::Malformed(_))
        ));
    }
}
