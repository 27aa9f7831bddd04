use super::{resolve_scalar, string_keyed_items, subscript_of, NodeProcessor};
use crate::core::ast::Node;
use crate::core::values::DatabaseValues;

/// Where a generation declares the default connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseShape {
    /// `$db['default'] = array(...)` or `$db['default']['key'] = literal`.
    NestedSubscript {
        variable: &'static str,
        group: &'static str,
    },
    /// `public array $default = [...]` inside the database config class.
    ClassProperty { name: &'static str },
}

#[derive(Debug, Clone)]
pub struct DatabaseProcessor {
    shape: DatabaseShape,
    values: DatabaseValues,
}

impl DatabaseProcessor {
    pub fn new(shape: DatabaseShape) -> Self {
        Self {
            shape,
            values: DatabaseValues::new(),
        }
    }

    fn merge(&mut self, array: &Node) {
        for (key, value) in string_keyed_items(array) {
            self.values.insert(key, value);
        }
    }
}

impl NodeProcessor for DatabaseProcessor {
    type Output = DatabaseValues;

    fn process(&mut self, node: &Node) {
        match (self.shape, node) {
            (DatabaseShape::NestedSubscript { variable, group }, Node::Assign { target, value }) => {
                if subscript_of(target, variable) == Some(group) {
                    self.merge(value);
                    return;
                }
                if let Node::Subscript {
                    base,
                    key: Some(key),
                } = target.as_ref()
                {
                    let (Some(outer), Some(key)) =
                        (subscript_of(base, variable), key.as_string_literal())
                    else {
                        return;
                    };
                    if outer != group {
                        return;
                    }
                    if let Some(value) = resolve_scalar(value) {
                        self.values.insert(key.to_string(), value);
                    }
                }
            }
            (DatabaseShape::ClassProperty { name }, Node::Property(property)) => {
                for element in property.elements.iter().filter(|e| e.name == name) {
                    if let Some(default) = &element.default {
                        self.merge(default);
                    }
                }
            }
            _ => {}
        }
    }

    fn results(&self) -> DatabaseValues {
        self.values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::values::ScalarValue;
    use crate::processors::test_support::run;
    use indoc::indoc;

    fn legacy() -> DatabaseProcessor {
        DatabaseProcessor::new(DatabaseShape::NestedSubscript {
            variable: "db",
            group: "default",
        })
    }

    #[test]
    fn test_array_form() {
        let source = indoc! {r#"
            <?php
            $active_group = 'default';
            $db['default'] = array(
                'dsn'      => '',
                'hostname' => 'localhost',
                'username' => 'root',
                'password' => '',
                'database' => 'shop',
                'dbdriver' => 'mysqli',
                'pconnect' => FALSE,
                'db_debug' => (ENVIRONMENT !== 'production'),
                'port'     => 3306,
            );
            $db['replica'] = array('hostname' => 'replica.local');
        "#};
        let values = run(legacy(), source).results();
        assert_eq!(values["hostname"], ScalarValue::from("localhost"));
        assert_eq!(values["dbdriver"], ScalarValue::from("mysqli"));
        assert_eq!(values["pconnect"], ScalarValue::Bool(false));
        assert_eq!(values["port"], ScalarValue::Int(3306));
        assert!(!values.contains_key("db_debug"));
        assert_eq!(values.len(), 8);
    }

    #[test]
    fn test_per_key_form() {
        let source = indoc! {r#"
            <?php
            $db['default']['hostname'] = 'db.local';
            $db['default']['dbdriver'] = 'postgre';
            $db['other']['hostname'] = 'ignored';
        "#};
        let values = run(legacy(), source).results();
        assert_eq!(values.len(), 2);
        assert_eq!(values["dbdriver"], ScalarValue::from("postgre"));
    }

    #[test]
    fn test_empty_default_group() {
        let values = run(legacy(), "<?php $db['default'] = array();").results();
        assert!(values.is_empty());
    }

    #[test]
    fn test_class_property_form() {
        let source = indoc! {r#"
            <?php
            namespace Config;

            class Database extends \CodeIgniter\Database\Config
            {
                public string $defaultGroup = 'default';

                public array $default = [
                    'hostname' => 'localhost',
                    'username' => 'app',
                    'DBDriver' => 'MySQLi',
                    'DBPrefix' => '',
                    'port'     => 3306,
                ];

                public array $tests = [
                    'hostname' => '127.0.0.1',
                ];
            }
        "#};
        let processor = DatabaseProcessor::new(DatabaseShape::ClassProperty { name: "default" });
        let values = run(processor, source).results();
        assert_eq!(values.len(), 5);
        assert_eq!(values["DBDriver"], ScalarValue::from("MySQLi"));
        assert_eq!(values["hostname"], ScalarValue::from("localhost"));
    }
}
