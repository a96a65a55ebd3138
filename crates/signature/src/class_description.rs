use std::fmt;

use crate::{literal::strip_type_arguments, Modifiers};

// Filed as an implemented interface even when it appears as a class's superclass; the
// compliance checker relies on this.
const ANNOTATION: &str = "java.lang.annotation.Annotation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
}

/// One class or interface from a signature file, complete once it has been yielded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescription {
    package_name: String,
    simple_name: String,
    kind: ClassKind,
    superclass: Option<String>,
    interfaces: Vec<String>,
    modifiers: Modifiers,
    constructors: Vec<Constructor>,
    methods: Vec<Method>,
    fields: Vec<Field>,
}
impl ClassDescription {
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn qualified_name(&self) -> String {
        if self.package_name.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.package_name, self.simple_name)
        }
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// Always `None` for interfaces.
    pub fn superclass(&self) -> Option<&str> {
        self.superclass.as_deref()
    }

    /// In document order.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}
impl fmt::Display for ClassDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub name: String,
    pub modifiers: Modifiers,
    pub parameter_types: Vec<String>,
    pub exception_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub return_type: String,
    pub modifiers: Modifiers,
    pub parameter_types: Vec<String>,
    pub exception_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub field_type: String,
    pub modifiers: Modifiers,
    /// `None` when no value is declared or the value is `null`.
    pub value: Option<String>,
}

#[derive(Debug)]
pub(crate) struct ClassBuilder {
    class: ClassDescription,
}
impl ClassBuilder {
    pub(crate) fn new(
        package_name: &str,
        simple_name: &str,
        kind: ClassKind,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            class: ClassDescription {
                package_name: package_name.to_owned(),
                simple_name: simple_name.to_owned(),
                kind,
                superclass: None,
                interfaces: Vec::new(),
                modifiers,
                constructors: Vec::new(),
                methods: Vec::new(),
                fields: Vec::new(),
            },
        }
    }

    pub(crate) fn simple_name(&self) -> &str {
        &self.class.simple_name
    }

    pub(crate) fn extends(&mut self, name: &str) {
        let name = strip_type_arguments(name);
        match self.class.kind {
            ClassKind::Class if name != ANNOTATION => self.class.superclass = Some(name.to_owned()),
            ClassKind::Class | ClassKind::Interface => self.implements(name),
        }
    }

    pub(crate) fn implements(&mut self, name: &str) {
        self.class
            .interfaces
            .push(strip_type_arguments(name).to_owned());
    }

    pub(crate) fn add_member(&mut self, member: MemberBuilder) {
        match member {
            MemberBuilder::Constructor(c) => self.class.constructors.push(c),
            MemberBuilder::Method(m) => self.class.methods.push(m),
        }
    }

    pub(crate) fn add_field(&mut self, field: Field) {
        self.class.fields.push(field);
    }

    pub(crate) fn build(self) -> ClassDescription {
        self.class
    }
}

/// The constructor or method that parameter and exception tags attach to.
#[derive(Debug)]
pub(crate) enum MemberBuilder {
    Constructor(Constructor),
    Method(Method),
}
impl MemberBuilder {
    pub(crate) fn constructor(name: &str, modifiers: Modifiers) -> Self {
        MemberBuilder::Constructor(Constructor {
            name: name.to_owned(),
            modifiers,
            parameter_types: Vec::new(),
            exception_types: Vec::new(),
        })
    }

    pub(crate) fn method(name: &str, return_type: String, modifiers: Modifiers) -> Self {
        MemberBuilder::Method(Method {
            name: name.to_owned(),
            return_type,
            modifiers,
            parameter_types: Vec::new(),
            exception_types: Vec::new(),
        })
    }

    pub(crate) fn add_parameter(&mut self, parameter_type: String) {
        match self {
            MemberBuilder::Constructor(c) => c.parameter_types.push(parameter_type),
            MemberBuilder::Method(m) => m.parameter_types.push(parameter_type),
        }
    }

    pub(crate) fn add_exception(&mut self, exception_type: String) {
        match self {
            MemberBuilder::Constructor(c) => c.exception_types.push(exception_type),
            MemberBuilder::Method(m) => m.exception_types.push(exception_type),
        }
    }
}
