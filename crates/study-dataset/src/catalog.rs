//! Registry of the problems a study can draw on.

use std::collections::HashMap;
use std::sync::Arc;

use study_core::{Error, Result, StudyConfig};
use tracing::debug;

use crate::data::TrainingSet;
use crate::encoding::check_bipolar_encoding;
use crate::problems::{OrXorSingleProblem, TrainingSetFactory};

/// Named training sets, each built once at registration and shared afterwards.
#[derive(Debug, Default)]
pub struct ProblemCatalog {
    sets: Vec<Arc<TrainingSet>>,
    index: HashMap<String, usize>,
}

impl ProblemCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every built-in problem
    pub fn standard() -> Result<Self> {
        let mut catalog = Self::new();
        catalog.register(&OrXorSingleProblem)?;
        Ok(catalog)
    }

    /// Builds the factory's training set and stores it under the factory's name.
    ///
    /// The set must carry the factory's name and use bipolar inputs with
    /// margin targets.
    pub fn register(&mut self, factory: &dyn TrainingSetFactory) -> Result<()> {
        let name = factory.name();
        if self.index.contains_key(name) {
            return Err(Error::AlreadyExists(format!("problem '{name}'")));
        }

        let set = factory.build()?;
        if set.name() != name {
            return Err(Error::Dataset(format!(
                "factory '{}' built a training set named '{}'",
                name,
                set.name()
            )));
        }

        check_bipolar_encoding(set.data()).map_err(|e| match e {
            Error::Dataset(reason) => Error::Dataset(format!("problem '{name}' {reason}")),
            other => other,
        })?;

        debug!("Registered problem '{}' ({} rows)", name, set.data().len());

        self.index.insert(name.to_string(), self.sets.len());
        self.sets.push(Arc::new(set));
        Ok(())
    }

    /// Looks up a training set by problem name.
    pub fn get(&self, name: &str) -> Result<Arc<TrainingSet>> {
        self.index
            .get(name)
            .map(|&i| Arc::clone(&self.sets[i]))
            .ok_or_else(|| Error::NotFound(format!("problem '{name}'")))
    }

    /// Looks up several problems, preserving the requested order.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Arc<TrainingSet>>> {
        names.iter().map(|name| self.get(name.as_ref())).collect()
    }

    /// The training sets a study configuration asks for.
    pub fn for_study(&self, config: &StudyConfig) -> Result<Vec<Arc<TrainingSet>>> {
        config.validate()?;
        self.resolve(&config.problems)
    }

    /// Registered problem names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sets.iter().map(|set| set.name())
    }

    /// Number of registered problems
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether no problems are registered
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
