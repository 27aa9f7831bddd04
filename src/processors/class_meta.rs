//! Shared extraction for controller and model classes.
//!
//! Records the class name and parent, then one [`MethodFact`] per
//! non-constructor method. Dependency loads seen in any method, constructor
//! included, register alias bindings that later `$this->alias` reads resolve
//! against.

use indexmap::{IndexMap, IndexSet};

use super::NodeProcessor;
use crate::core::ast::{MethodDecl, Node};
use crate::core::facts::{ClassFacts, DependencyKind, DependencyUsage, MethodFact};

/// Call shapes that bring a dependency into scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyRule {
    /// `$this->{property}->model('name', 'alias')`, `->library(...)`,
    /// `->helper('a')` or `->helper(['a', 'b'])`.
    LoaderCall { property: &'static str },
    /// Free functions `model('Name')` and `helper('a')`.
    GlobalFunction,
}

/// Call shapes that render a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewRule {
    /// `$this->{property}->view('name')`
    LoaderCall { property: &'static str },
    /// `view('name')`
    GlobalFunction,
}

/// Query-builder calls whose first literal argument names a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRule {
    pub property: &'static str,
    pub methods: &'static [&'static str],
}

impl TableRule {
    pub const QUERY_BUILDER: TableRule = TableRule {
        property: "db",
        methods: &["get", "insert", "get_where"],
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMetaRules {
    pub dependencies: Vec<DependencyRule>,
    pub views: Vec<ViewRule>,
    pub tables: Option<TableRule>,
    /// `$this->x` reads that are framework plumbing, not dependencies.
    pub ignored_properties: Vec<&'static str>,
}

impl ClassMetaRules {
    /// CodeIgniter 2 and 3: everything goes through `$this->load`.
    pub fn loader() -> Self {
        Self {
            dependencies: vec![DependencyRule::LoaderCall { property: "load" }],
            views: vec![ViewRule::LoaderCall { property: "load" }],
            tables: None,
            ignored_properties: vec!["load", "input"],
        }
    }

    /// CodeIgniter 4 adds the global `model()`, `helper()` and `view()`.
    pub fn loader_and_functions() -> Self {
        let mut rules = Self::loader();
        rules.dependencies.push(DependencyRule::GlobalFunction);
        rules.views.push(ViewRule::GlobalFunction);
        rules
    }

    pub fn with_tables(mut self, rule: TableRule) -> Self {
        self.tables = Some(rule);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    kind: DependencyKind,
    name: String,
}

#[derive(Debug, Clone)]
pub struct ClassMetaProcessor {
    rules: ClassMetaRules,
    class_name: Option<String>,
    parent: Option<String>,
    methods: Vec<MethodFact>,
    bindings: IndexMap<String, Binding>,
    tables: IndexSet<String>,
}

impl ClassMetaProcessor {
    pub fn new(rules: ClassMetaRules) -> Self {
        Self {
            rules,
            class_name: None,
            parent: None,
            methods: Vec::new(),
            bindings: IndexMap::new(),
            tables: IndexSet::new(),
        }
    }

    pub fn rules(&self) -> &ClassMetaRules {
        &self.rules
    }

    fn method_fact(&mut self, method: &MethodDecl) -> MethodFact {
        let dependencies = self.detect_dependencies(&method.body);
        let views = self.detect_views(&method.body);
        let tables = self.detect_tables(&method.body);
        self.tables.extend(tables.iter().cloned());

        MethodFact {
            name: method.name.clone(),
            visibility: method.visibility,
            params: method.params.clone(),
            dependencies,
            views,
            tables,
            summary: method.summary.clone(),
            class: self.class_name.clone(),
            extends: self.parent.clone(),
        }
    }

    fn bind(&mut self, alias: &str, kind: DependencyKind, name: &str) {
        self.bindings.insert(
            alias.to_string(),
            Binding {
                kind,
                name: name.to_string(),
            },
        );
    }

    /// Two passes over the body: register loads, then resolve `$this->x`.
    fn detect_dependencies(&mut self, body: &[Node]) -> Vec<DependencyUsage> {
        let mut used: IndexMap<String, DependencyUsage> = IndexMap::new();

        let mut helpers = Vec::new();
        let mut loads = Vec::new();
        for stmt in body {
            stmt.walk(&mut |node| self.collect_load(node, &mut helpers, &mut loads));
        }
        for (alias, kind, name) in loads {
            self.bind(&alias, kind, &name);
        }
        for helper in helpers {
            self.bind(&helper, DependencyKind::Helper, &helper);
            let usage = DependencyUsage {
                kind: DependencyKind::Helper,
                alias: helper.clone(),
                name: Some(helper),
            };
            used.insert(usage.dedup_key(), usage);
        }

        let mut reads = Vec::new();
        for stmt in body {
            stmt.walk(&mut |node| {
                if let Node::PropertyFetch { object, name } = node {
                    let ignored = self.rules.ignored_properties.iter().any(|p| *p == name.as_str());
                    if object.is_this() && !ignored {
                        reads.push(name.clone());
                    }
                }
            });
        }
        for alias in reads {
            let usage = match self.bindings.get(&alias) {
                Some(binding) => DependencyUsage {
                    kind: binding.kind,
                    alias,
                    name: Some(binding.name.clone()),
                },
                None => DependencyUsage {
                    kind: DependencyKind::Unknown,
                    alias,
                    name: None,
                },
            };
            used.insert(usage.dedup_key(), usage);
        }

        used.into_values().collect()
    }

    fn collect_load(
        &self,
        node: &Node,
        helpers: &mut Vec<String>,
        loads: &mut Vec<(String, DependencyKind, String)>,
    ) {
        for rule in &self.rules.dependencies {
            match (rule, node) {
                (
                    DependencyRule::LoaderCall { property },
                    Node::MethodCall { object, name, args },
                ) if object.is_this_property(property) => {
                    match DependencyKind::from_loader(name) {
                        Some(DependencyKind::Helper) => {
                            helpers.extend(args.first().map(helper_names).unwrap_or_default());
                        }
                        Some(kind) => {
                            let Some(target) = args.first().and_then(Node::as_string_literal)
                            else {
                                continue;
                            };
                            let alias = args
                                .get(1)
                                .and_then(Node::as_string_literal)
                                .unwrap_or(target);
                            loads.push((alias.to_string(), kind, target.to_string()));
                        }
                        None => {}
                    }
                }
                (DependencyRule::GlobalFunction, Node::FunctionCall { name, args }) => {
                    match name.as_str() {
                        "helper" => {
                            helpers.extend(args.first().map(helper_names).unwrap_or_default())
                        }
                        "model" => {
                            if let Some(target) = args.first().and_then(Node::as_string_literal) {
                                loads.push((
                                    short_class_name(target).to_string(),
                                    DependencyKind::Model,
                                    target.to_string(),
                                ));
                            }
                        }
                        _ => {}
                    }
                }
                // `$this->users = model('UserModel')`
                (DependencyRule::GlobalFunction, Node::Assign { target, value }) => {
                    let (Node::PropertyFetch { object, name: alias }, Node::FunctionCall { name, args }) =
                        (target.as_ref(), value.as_ref())
                    else {
                        continue;
                    };
                    if !object.is_this() || name != "model" {
                        continue;
                    }
                    if let Some(model) = args.first().and_then(Node::as_string_literal) {
                        loads.push((alias.clone(), DependencyKind::Model, model.to_string()));
                    }
                }
                _ => {}
            }
        }
    }

    fn detect_views(&self, body: &[Node]) -> Vec<String> {
        let mut views = IndexSet::new();
        for stmt in body {
            stmt.walk(&mut |node| {
                for rule in &self.rules.views {
                    let first = match (rule, node) {
                        (ViewRule::LoaderCall { property }, Node::MethodCall { object, name, args })
                            if name == "view" && object.is_this_property(property) =>
                        {
                            args.first()
                        }
                        (ViewRule::GlobalFunction, Node::FunctionCall { name, args })
                            if name == "view" =>
                        {
                            args.first()
                        }
                        _ => None,
                    };
                    if let Some(view) = first.and_then(Node::as_string_literal) {
                        views.insert(view.to_string());
                    }
                }
            });
        }
        views.into_iter().collect()
    }

    fn detect_tables(&self, body: &[Node]) -> Vec<String> {
        let Some(rule) = self.rules.tables else {
            return Vec::new();
        };
        let mut tables = IndexSet::new();
        for stmt in body {
            stmt.walk(&mut |node| {
                if let Node::MethodCall { object, name, args } = node {
                    let query = rule.methods.iter().any(|m| *m == name.as_str());
                    if query && object.is_this_property(rule.property) {
                        if let Some(table) = args.first().and_then(Node::as_string_literal) {
                            tables.insert(table.to_string());
                        }
                    }
                }
            });
        }
        tables.into_iter().collect()
    }
}

fn helper_names(arg: &Node) -> Vec<String> {
    match arg {
        Node::Array(items) => items
            .iter()
            .filter_map(|item| item.value.as_string_literal())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        other => other
            .as_string_literal()
            .filter(|name| !name.is_empty())
            .map(|name| vec![name.to_string()])
            .unwrap_or_default(),
    }
}

fn short_class_name(name: &str) -> &str {
    name.rsplit('\\').next().unwrap_or(name)
}

pub(crate) fn is_constructor(method: &MethodDecl) -> bool {
    method.name.eq_ignore_ascii_case("__construct")
}

impl NodeProcessor for ClassMetaProcessor {
    type Output = ClassFacts;

    fn process(&mut self, node: &Node) {
        match node {
            Node::Class(class) => {
                self.class_name = Some(class.name.clone());
                self.parent = class.parent.clone();
            }
            Node::Method(method) if is_constructor(method) => {
                self.detect_dependencies(&method.body);
            }
            Node::Method(method) => {
                let fact = self.method_fact(method);
                self.methods.push(fact);
            }
            _ => {}
        }
    }

    fn results(&self) -> ClassFacts {
        ClassFacts {
            name: self.class_name.clone(),
            extends: self.parent.clone(),
            methods: self.methods.clone(),
            tables: self.tables.iter().cloned().collect(),
        }
    }
}
