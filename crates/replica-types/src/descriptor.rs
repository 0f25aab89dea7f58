//! Runtime type descriptors
//!
//! A `TypeDescriptor` is the reflective view of a runtime type: its name, its
//! ancestors, the fields it declares, its no-argument construction path and
//! whether it advertises a self-copy operation. Every object points at its
//! descriptor, so code holding an opaque `Value` can still discover how to
//! build and fill a fresh instance of the same type.

use crate::object::Object;
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// Whether a type can be instantiated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Concrete,
    Abstract,
    Interface,
}

/// Member visibility
///
/// Non-public members are only reachable with an access override.
/// `Sealed` members refuse the override entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
    Sealed,
}

impl Visibility {
    /// Whether a member with this visibility can be used
    pub fn permits(self, access_override: bool) -> bool {
        match self {
            Visibility::Public => true,
            Visibility::Protected | Visibility::Private => access_override,
            Visibility::Sealed => false,
        }
    }
}

/// Declared kind of a field slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Boolean,
    Integer,
    Number,
    Char,
    Text,
    /// Any shared value: arrays, objects, handles
    Reference,
}

impl FieldKind {
    /// Value a slot holds before anything is assigned to it
    pub fn default_value(self) -> Value {
        match self {
            FieldKind::Boolean => Value::Boolean(false),
            FieldKind::Integer => Value::Integer(0),
            FieldKind::Number => Value::Number(0.0),
            FieldKind::Char => Value::Char('\0'),
            FieldKind::Text | FieldKind::Reference => Value::Null,
        }
    }

    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::Boolean, Value::Boolean(_)) => true,
            (FieldKind::Integer, Value::Integer(_)) => true,
            (FieldKind::Number, Value::Number(_)) => true,
            (FieldKind::Char, Value::Char(_)) => true,
            (FieldKind::Text, Value::Text(_) | Value::Null) => true,
            (FieldKind::Reference, v) => !v.is_scalar(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub visibility: Visibility,
}

/// Hook run on a blank instance by the no-argument constructor
pub type InitFn = fn(&mut Object);

/// The no-argument construction path of a type
#[derive(Clone, Copy)]
pub struct Constructor {
    pub visibility: Visibility,
    pub init: Option<InitFn>,
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("visibility", &self.visibility)
            .field("init", &self.init.is_some())
            .finish()
    }
}

/// A type-specific "produce a duplicate of myself" operation
///
/// Returning `Ok(None)` means the operation declined; callers then fall back to
/// their generic strategy. Errors are reported as plain messages.
pub trait SelfCopy {
    fn self_copy(&self, source: &Object) -> Result<Option<Value>, String>;
}

impl<F> SelfCopy for F
where
    F: Fn(&Object) -> Result<Option<Value>, String>,
{
    fn self_copy(&self, source: &Object) -> Result<Option<Value>, String> {
        self(source)
    }
}

/// A declared self-copy operation together with its visibility
#[derive(Clone)]
pub struct SelfCopyCapability {
    pub visibility: Visibility,
    pub op: Rc<dyn SelfCopy>,
}

impl fmt::Debug for SelfCopyCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelfCopyCapability")
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

/// Reflective metadata of a runtime type
#[derive(Debug)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    parent: Option<Rc<TypeDescriptor>>,
    fields: Vec<FieldDescriptor>,
    constructor: Option<Constructor>,
    self_copy: Option<SelfCopyCapability>,
}

impl TypeDescriptor {
    pub fn builder(name: &str) -> TypeBuilder {
        TypeBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Fields introduced by this type itself, in declaration order
    pub fn declared_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    pub fn self_copy(&self) -> Option<&SelfCopyCapability> {
        self.self_copy.as_ref()
    }

    /// Number of slots contributed by ancestors
    pub fn inherited_field_count(&self) -> usize {
        self.parent.as_ref().map_or(0, |p| p.field_count())
    }

    /// Total slots of an instance, ancestors included
    pub fn field_count(&self) -> usize {
        self.inherited_field_count() + self.fields.len()
    }

    /// Slot layout of an instance: root ancestor's fields first, then each
    /// descendant's, ending with this type's own
    pub fn all_fields(&self) -> Vec<&FieldDescriptor> {
        let mut layout = match &self.parent {
            Some(parent) => parent.all_fields(),
            None => Vec::new(),
        };
        layout.extend(self.fields.iter());
        layout
    }

    /// Slot index of a field by name
    /// A field declared lower in the hierarchy shadows one with the same name above it
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        if let Some(pos) = self.fields.iter().position(|f| f.name == name) {
            return Some(self.inherited_field_count() + pos);
        }
        self.parent.as_ref().and_then(|p| p.slot_of(name))
    }
}

/// Fluent builder for `TypeDescriptor`
///
/// Defaults: concrete, no parent, public no-arg constructor without init hook,
/// no self-copy operation.
pub struct TypeBuilder {
    name: String,
    kind: TypeKind,
    parent: Option<Rc<TypeDescriptor>>,
    fields: Vec<FieldDescriptor>,
    constructor: Option<Constructor>,
    self_copy: Option<SelfCopyCapability>,
}

impl TypeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: TypeKind::Concrete,
            parent: None,
            fields: Vec::new(),
            constructor: Some(Constructor {
                visibility: Visibility::Public,
                init: None,
            }),
            self_copy: None,
        }
    }

    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn extends(mut self, parent: Rc<TypeDescriptor>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Declare a public field
    pub fn field(self, name: &str, kind: FieldKind) -> Self {
        self.field_with(name, kind, Visibility::Public)
    }

    pub fn field_with(mut self, name: &str, kind: FieldKind, visibility: Visibility) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.to_string(),
            kind,
            visibility,
        });
        self
    }

    /// Set the visibility of the no-arg constructor, keeping any init hook
    pub fn constructor(mut self, visibility: Visibility) -> Self {
        let init = self.constructor.and_then(|c| c.init);
        self.constructor = Some(Constructor { visibility, init });
        self
    }

    /// Attach an init hook to the no-arg constructor
    pub fn init(mut self, init: InitFn) -> Self {
        let visibility = self
            .constructor
            .map_or(Visibility::Public, |c| c.visibility);
        self.constructor = Some(Constructor {
            visibility,
            init: Some(init),
        });
        self
    }

    /// The type only has constructors that take arguments
    pub fn no_constructor(mut self) -> Self {
        self.constructor = None;
        self
    }

    pub fn self_copy<S>(mut self, visibility: Visibility, op: S) -> Self
    where
        S: SelfCopy + 'static,
    {
        self.self_copy = Some(SelfCopyCapability {
            visibility,
            op: Rc::new(op),
        });
        self
    }

    /// Declare a self-copy operation written as a closure
    pub fn self_copy_fn<F>(self, visibility: Visibility, op: F) -> Self
    where
        F: Fn(&Object) -> Result<Option<Value>, String> + 'static,
    {
        self.self_copy(visibility, op)
    }

    pub fn build(self) -> Rc<TypeDescriptor> {
        Rc::new(TypeDescriptor {
            name: self.name,
            kind: self.kind,
            parent: self.parent,
            fields: self.fields,
            constructor: self.constructor,
            self_copy: self.self_copy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal() -> Rc<TypeDescriptor> {
        TypeDescriptor::builder("Animal")
            .kind(TypeKind::Abstract)
            .field("name", FieldKind::Text)
            .field_with("legs", FieldKind::Integer, Visibility::Private)
            .build()
    }

    #[test]
    fn test_layout_puts_ancestors_first() {
        let dog = TypeDescriptor::builder("Dog")
            .extends(animal())
            .field("breed", FieldKind::Text)
            .build();

        let names: Vec<&str> = dog.all_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "legs", "breed"]);
        assert_eq!(dog.inherited_field_count(), 2);
        assert_eq!(dog.declared_fields().len(), 1);
        assert_eq!(dog.slot_of("breed"), Some(2));
        assert_eq!(dog.slot_of("name"), Some(0));
        assert_eq!(dog.slot_of("missing"), None);
    }

    #[test]
    fn test_shadowed_field_resolves_to_descendant() {
        let shadow = TypeDescriptor::builder("Shadow")
            .extends(animal())
            .field("name", FieldKind::Text)
            .build();
        assert_eq!(shadow.slot_of("name"), Some(2));
    }

    #[test]
    fn test_visibility_permits() {
        assert!(Visibility::Public.permits(false));
        assert!(!Visibility::Private.permits(false));
        assert!(Visibility::Private.permits(true));
        assert!(!Visibility::Sealed.permits(true));
    }

    #[test]
    fn test_field_kind_accepts() {
        assert!(FieldKind::Text.accepts(&Value::Null));
        assert!(FieldKind::Text.accepts(&Value::text("x")));
        assert!(!FieldKind::Text.accepts(&Value::Integer(1)));
        assert!(FieldKind::Reference.accepts(&Value::Null));
        assert!(!FieldKind::Reference.accepts(&Value::Boolean(true)));
        assert!(!FieldKind::Integer.accepts(&Value::Number(1.0)));
    }

    #[test]
    fn test_constructor_settings_compose() {
        fn hook(_: &mut Object) {}

        let ty = TypeDescriptor::builder("Hidden")
            .init(hook)
            .constructor(Visibility::Private)
            .build();
        let ctor = ty.constructor().unwrap();
        assert_eq!(ctor.visibility, Visibility::Private);
        assert!(ctor.init.is_some());

        let none = TypeDescriptor::builder("ArgsOnly").no_constructor().build();
        assert!(none.constructor().is_none());
    }
}
