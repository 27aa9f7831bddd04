//! Generation → processor lookup, one function per artifact family.
//!
//! Every table is closed: `Unknown` is rejected instead of falling back to
//! some default shape.

use super::class_meta::ClassMetaRules;
use super::{
    ConfigProcessor, ConfigShape, ControllerProcessor, DatabaseProcessor, DatabaseShape,
    ModelProcessor, RouteProcessor,
};
use crate::core::errors::{Error, Result};
use crate::core::generation::Generation;

pub fn config_processor(generation: Generation) -> Result<ConfigProcessor> {
    let shape = match generation {
        Generation::Ci2 | Generation::Ci3 => ConfigShape::ArrayAssignment { variable: "config" },
        Generation::Ci4 => ConfigShape::ClassProperty,
        Generation::Unknown => return Err(Error::UnsupportedGeneration(generation)),
    };
    Ok(ConfigProcessor::new(shape))
}

pub fn database_processor(generation: Generation) -> Result<DatabaseProcessor> {
    let shape = match generation {
        Generation::Ci2 | Generation::Ci3 => DatabaseShape::NestedSubscript {
            variable: "db",
            group: "default",
        },
        Generation::Ci4 => DatabaseShape::ClassProperty { name: "default" },
        Generation::Unknown => return Err(Error::UnsupportedGeneration(generation)),
    };
    Ok(DatabaseProcessor::new(shape))
}

fn class_rules(generation: Generation) -> Result<ClassMetaRules> {
    match generation {
        Generation::Ci2 | Generation::Ci3 => Ok(ClassMetaRules::loader()),
        Generation::Ci4 => Ok(ClassMetaRules::loader_and_functions()),
        Generation::Unknown => Err(Error::UnsupportedGeneration(generation)),
    }
}

pub fn controller_processor(generation: Generation) -> Result<ControllerProcessor> {
    class_rules(generation).map(ControllerProcessor::new)
}

pub fn model_processor(generation: Generation) -> Result<ModelProcessor> {
    class_rules(generation).map(ModelProcessor::new)
}

pub fn route_processor(generation: Generation) -> Result<RouteProcessor> {
    match generation {
        Generation::Ci2 | Generation::Ci3 | Generation::Ci4 => Ok(RouteProcessor::new()),
        Generation::Unknown => Err(Error::UnsupportedGeneration(generation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::class_meta::DependencyRule;

    #[test]
    fn test_unknown_is_rejected_everywhere() {
        let g = Generation::Unknown;
        assert!(matches!(config_processor(g), Err(Error::UnsupportedGeneration(_))));
        assert!(matches!(database_processor(g), Err(Error::UnsupportedGeneration(_))));
        assert!(matches!(controller_processor(g), Err(Error::UnsupportedGeneration(_))));
        assert!(matches!(model_processor(g), Err(Error::UnsupportedGeneration(_))));
        assert!(matches!(route_processor(g), Err(Error::UnsupportedGeneration(_))));
    }

    #[test]
    fn test_shapes_per_generation() {
        assert_eq!(
            config_processor(Generation::Ci2).unwrap().shape(),
            ConfigShape::ArrayAssignment { variable: "config" }
        );
        assert_eq!(
            config_processor(Generation::Ci4).unwrap().shape(),
            ConfigShape::ClassProperty
        );
    }

    #[test]
    fn test_ci4_controllers_know_global_functions() {
        let rules = controller_processor(Generation::Ci4).unwrap().rules().clone();
        assert!(rules.dependencies.contains(&DependencyRule::GlobalFunction));
        let rules = controller_processor(Generation::Ci3).unwrap().rules().clone();
        assert!(!rules.dependencies.contains(&DependencyRule::GlobalFunction));
        assert!(model_processor(Generation::Ci3).unwrap().rules().tables.is_some());
    }
}
