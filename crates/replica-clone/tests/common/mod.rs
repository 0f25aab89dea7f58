//! Shared fixture types for integration tests

#![allow(dead_code)]

use replica_types::{
    FieldKind, Object, ReferenceArray, TypeDescriptor, TypeKind, Value, Visibility,
};
use std::rc::Rc;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `Person { name, about }`, no self-copy
pub fn person_type() -> Rc<TypeDescriptor> {
    TypeDescriptor::builder("Person")
        .field("name", FieldKind::Text)
        .field("about", FieldKind::Text)
        .build()
}

pub fn new_person(name: &str, about: &str) -> Value {
    let obj = Object::blank(person_type())
        .with("name", name)
        .and_then(|o| o.with("about", about))
        .expect("person fixture");
    Value::from(obj)
}

/// `Address { street }`
pub fn address_type() -> Rc<TypeDescriptor> {
    TypeDescriptor::builder("Address")
        .field("street", FieldKind::Text)
        .build()
}

/// `Company { name, address, employees }` with a private constructor
pub fn company_type() -> Rc<TypeDescriptor> {
    TypeDescriptor::builder("Company")
        .field("name", FieldKind::Text)
        .field_with("address", FieldKind::Reference, Visibility::Private)
        .field("employees", FieldKind::Reference)
        .constructor(Visibility::Private)
        .build()
}

pub fn new_company() -> Value {
    let address = Value::from(
        Object::blank(address_type())
            .with("street", "Main Street 1")
            .expect("address fixture"),
    );
    let employees = Value::from(ReferenceArray::from_items(
        "Person",
        vec![new_person("Alice", "engineer"), new_person("Bob", "designer")],
    ));
    let company = Object::blank(company_type())
        .with("name", "Acme")
        .and_then(|o| o.with("address", address))
        .and_then(|o| o.with("employees", employees))
        .expect("company fixture");
    Value::from(company)
}

/// `Vehicle { wheels }` (abstract) and `Car: Vehicle { model }`
///
/// The constructor sets `wheels` to 4, so a clone copying only declared
/// fields still reports four wheels.
pub fn vehicle_type() -> Rc<TypeDescriptor> {
    TypeDescriptor::builder("Vehicle")
        .kind(TypeKind::Abstract)
        .field("wheels", FieldKind::Integer)
        .build()
}

pub fn car_type() -> Rc<TypeDescriptor> {
    fn four_wheels(car: &mut Object) {
        car.set("wheels", Value::Integer(4)).expect("car init");
    }

    TypeDescriptor::builder("Car")
        .extends(vehicle_type())
        .field("model", FieldKind::Text)
        .init(four_wheels)
        .build()
}

/// A type that can only be built with arguments
pub fn money_type() -> Rc<TypeDescriptor> {
    TypeDescriptor::builder("Money")
        .field("amount", FieldKind::Integer)
        .field("currency", FieldKind::Text)
        .no_constructor()
        .build()
}

/// `Matrix { cells }` whose self-copy duplicates its cell array too
pub fn matrix_type() -> Rc<TypeDescriptor> {
    TypeDescriptor::builder("Matrix")
        .field("cells", FieldKind::Reference)
        .self_copy_fn(Visibility::Protected, |src| {
            let dispatcher = replica_clone::ShapeDispatcher::new();
            let cells = src.get("cells").cloned().unwrap_or(Value::Null);
            let cells_copy = dispatcher
                .duplicate(&cells)
                .map_err(|e| e.to_string())?
                .unwrap_or(Value::Null);
            let copy = Object::blank(Rc::clone(src.type_descriptor()))
                .with("cells", cells_copy)
                .map_err(|e| e.to_string())?;
            Ok(Some(Value::from(copy)))
        })
        .build()
}
