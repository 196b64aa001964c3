use bamlgen_core::{Enum, Field, Record, TypeDescriptor as T, TypeName};

use crate::catalog::Catalog;
use crate::docs::{self, DocTable, NoDocs};
use crate::emit::{Config, Emitter};
use crate::Error;

fn names(names: &[&str]) -> Vec<TypeName> {
    names.iter().copied().map(TypeName::from).collect()
}

fn commerce() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.insert_record(
        Record::new("fixtures::ContactInfo")
            .field(Field::new("email", T::string()))
            .field(Field::new("phone", T::optional(T::string()))),
    );
    catalog.insert_record(
        Record::new("fixtures::Category")
            .field(Field::new("name", T::string()))
            .field(Field::new("description", T::string())),
    );
    catalog.insert_record(
        Record::new("fixtures::Vendor")
            .field(Field::new("name", T::string()))
            .field(Field::new("contact", T::record("fixtures::ContactInfo"))),
    );
    catalog.insert_record(
        Record::new("fixtures::Product")
            .field(Field::new("name", T::string()))
            .field(Field::new("category", T::record("fixtures::Category")))
            .field(Field::new("vendor", T::record("fixtures::Vendor"))),
    );
    catalog.insert_record(
        Record::new("fixtures::OrderItem")
            .field(Field::new("product", T::record("fixtures::Product")))
            .field(Field::new("quantity", T::integer()))
            .field(Field::new("price", T::float())),
    );
    catalog
}

fn class_headers(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|line| line.starts_with("class ") || line.starts_with("enum "))
        .collect()
}

#[test]
fn simple_record_without_descriptions() {
    let mut catalog = Catalog::new();
    let user = catalog.insert_record(
        Record::new("app::SimpleUser")
            .field(Field::new("name", T::string()))
            .field(Field::new("age", T::integer())),
    );

    let config = Config::new().include_descriptions(false);
    let output = Emitter::new(&catalog, config).emit(&[user]).unwrap();

    assert_eq!(output, "class SimpleUser {\n  name string\n  age int\n}");
}

#[test]
fn optional_field_line() {
    let mut catalog = Catalog::new();
    let contact = catalog.insert_record(
        Record::new("Contact").field(Field::new("email", T::optional(T::string()))),
    );

    let output = Emitter::new(&catalog, Config::default())
        .emit(&[contact])
        .unwrap();

    assert!(output.lines().any(|line| line.trim() == "email string?"));
}

#[test]
fn empty_record() {
    let catalog = Catalog::new();
    let output = Emitter::new(&catalog, Config::default()).emit_record(&Record::new("m::Empty"));
    insta::assert_snapshot!(output, @r"
    class Empty {
    }
    ");
}

#[test]
fn enum_values_keep_declaration_order() {
    let mut catalog = Catalog::new();
    let status = catalog.insert_enum(
        Enum::new("app::Status")
            .value("pending", "Pending")
            .value("active", "Active")
            .value("inactive", "Inactive"),
    );

    let output = Emitter::new(&catalog, Config::default())
        .emit(&[status])
        .unwrap();

    insta::assert_snapshot!(output, @r#"
    enum Status {
      "pending"
      "active"
      "inactive"
    }
    "#);
}

#[test]
fn dependencies_before_dependents() {
    let catalog = commerce();
    let output = Emitter::new(&catalog, Config::default())
        .emit(&names(&["fixtures::OrderItem"]))
        .unwrap();

    insta::assert_snapshot!(output, @r"
    class Category {
      name string
      description string
    }

    class ContactInfo {
      email string
      phone string?
    }

    class Vendor {
      name string
      contact ContactInfo
    }

    class Product {
      name string
      category Category
      vendor Vendor
    }

    class OrderItem {
      product Product
      quantity int
      price float
    }
    ");
}

#[test]
fn without_dependencies_only_roots() {
    let catalog = commerce();
    let config = Config::new().include_dependencies(false);
    let output = Emitter::new(&catalog, config)
        .emit(&names(&["fixtures::Product"]))
        .unwrap();

    insta::assert_snapshot!(output, @r"
    class Product {
      name string
      category Category
      vendor Vendor
    }
    ");
}

#[test]
fn without_dependencies_keeps_caller_order() {
    let catalog = commerce();
    let config = Config::new().include_dependencies(false);
    let output = Emitter::new(&catalog, config)
        .emit(&names(&[
            "fixtures::Vendor",
            "fixtures::ContactInfo",
            "fixtures::Vendor",
        ]))
        .unwrap();

    assert_eq!(class_headers(&output), ["class Vendor {", "class ContactInfo {"]);
}

#[test]
fn already_sorted_input_keeps_order() {
    let catalog = commerce();
    let output = Emitter::new(&catalog, Config::default())
        .emit(&names(&[
            "fixtures::ContactInfo",
            "fixtures::Category",
            "fixtures::Vendor",
        ]))
        .unwrap();

    assert_eq!(
        class_headers(&output),
        ["class ContactInfo {", "class Category {", "class Vendor {"]
    );
}

#[test]
fn shared_dependency_emitted_once() {
    let mut catalog = Catalog::new();
    catalog.insert_record(Record::new("Address").field(Field::new("city", T::string())));
    catalog.insert_record(Record::new("Home").field(Field::new("address", T::record("Address"))));
    catalog.insert_record(
        Record::new("Office")
            .field(Field::new("address", T::optional(T::record("Address"))))
            .field(Field::new("branches", T::array(T::record("Address")))),
    );

    let output = Emitter::new(&catalog, Config::default())
        .emit(&names(&["Home", "Office"]))
        .unwrap();

    assert_eq!(output.matches("class Address {").count(), 1);
    assert_eq!(
        class_headers(&output),
        ["class Address {", "class Home {", "class Office {"]
    );
}

#[test]
fn diamond() {
    let mut catalog = Catalog::new();
    catalog.insert_record(Record::new("D").field(Field::new("id", T::integer())));
    catalog.insert_record(Record::new("B").field(Field::new("d", T::record("D"))));
    catalog.insert_record(Record::new("C").field(Field::new("d", T::record("D"))));
    catalog.insert_record(
        Record::new("A")
            .field(Field::new("b", T::record("B")))
            .field(Field::new("c", T::record("C"))),
    );

    let output = Emitter::new(&catalog, Config::default())
        .emit(&names(&["A"]))
        .unwrap();

    assert_eq!(
        class_headers(&output),
        ["class D {", "class B {", "class C {", "class A {"]
    );
}

#[test]
fn enums_come_first_in_first_seen_order() {
    let mut catalog = Catalog::new();
    catalog.insert_enum(Enum::new("Priority").value("low", "Low").value("high", "High"));
    catalog.insert_enum(Enum::new("Status").value("open", "Open").value("closed", "Closed"));
    catalog.insert_record(
        Record::new("Assignee")
            .field(Field::new("name", T::string()))
            .field(Field::new("status", T::enumeration("Status"))),
    );
    catalog.insert_record(
        Record::new("Task")
            .field(Field::new("assignee", T::record("Assignee")))
            .field(Field::new("priority", T::enumeration("Priority")))
            .field(Field::new("history", T::array(T::enumeration("Status")))),
    );

    let output = Emitter::new(&catalog, Config::default())
        .emit(&names(&["Task"]))
        .unwrap();

    insta::assert_snapshot!(output, @r#"
    enum Status {
      "open"
      "closed"
    }

    enum Priority {
      "low"
      "high"
    }

    class Assignee {
      name string
      status Status
    }

    class Task {
      assignee Assignee
      priority Priority
      history Status[]
    }
    "#);
}

#[test]
fn enum_roots_and_reached_enums_keep_root_order() {
    let mut catalog = Catalog::new();
    catalog.insert_enum(Enum::new("m::Status").value("open", "Open"));
    catalog.insert_enum(Enum::new("m::Priority").value("low", "Low"));
    catalog.insert_enum(Enum::new("m::Channel").value("email", "Email"));
    catalog.insert_record(
        Record::new("m::Order").field(Field::new("status", T::enumeration("m::Status"))),
    );
    catalog.insert_record(
        Record::new("m::Ticket").field(Field::new("channel", T::enumeration("m::Channel"))),
    );

    let output = Emitter::new(&catalog, Config::default())
        .emit(&names(&["m::Order", "m::Priority", "m::Ticket", "m::Status"]))
        .unwrap();

    assert_eq!(
        class_headers(&output),
        [
            "enum Status {",
            "enum Priority {",
            "enum Channel {",
            "class Order {",
            "class Ticket {",
        ]
    );
}

#[test]
fn enums_inside_maps_and_unions_are_collected() {
    let mut catalog = Catalog::new();
    catalog.insert_enum(Enum::new("Color").value("red", "Red"));
    catalog.insert_enum(Enum::new("Size").value("s", "S"));
    catalog.insert_record(
        Record::new("Swatch")
            .field(Field::new("by_name", T::map(T::string(), T::enumeration("Color"))))
            .field(Field::new(
                "size",
                T::union([T::enumeration("Size"), T::null()]),
            )),
    );

    let output = Emitter::new(&catalog, Config::default())
        .emit(&names(&["Swatch"]))
        .unwrap();

    assert_eq!(
        class_headers(&output),
        ["enum Color {", "enum Size {", "class Swatch {"]
    );
    assert!(output.contains("  by_name map<string, Color>\n"));
    assert!(output.contains("  size Size?\n"));
}

#[test]
fn cycles_terminate_with_forward_reference() {
    let mut catalog = Catalog::new();
    catalog.insert_record(
        Record::new("TreeNode")
            .field(Field::new("value", T::string()))
            .field(Field::new("children", T::array(T::record("TreeNode"))))
            .field(Field::new("owner", T::optional(T::record("Person")))),
    );
    catalog.insert_record(
        Record::new("Person").field(Field::new("garden", T::array(T::record("TreeNode")))),
    );

    let output = Emitter::new(&catalog, Config::default())
        .emit(&names(&["TreeNode"]))
        .unwrap();

    insta::assert_snapshot!(output, @r"
    class Person {
      garden TreeNode[]
    }

    class TreeNode {
      value string
      children TreeNode[]
      owner Person?
    }
    ");
}

#[test]
fn declared_description_wins_over_comment() {
    let mut catalog = Catalog::new();
    let user = catalog.insert_record(
        Record::new("User")
            .field(Field::new("name", T::string()).with_description("Declared name"))
            .field(Field::new("age", T::integer()))
            .field(Field::new("email", T::string())),
    );
    catalog.comments_mut().insert("User", "name", "Commented name");
    catalog.comments_mut().insert("User", "age", "Age in years");

    let output = Emitter::new(&catalog, Config::default())
        .emit(&[user])
        .unwrap();

    assert!(output.contains("Declared name"));
    assert!(!output.contains("Commented name"));
    insta::assert_snapshot!(output, @r#"
    class User {
      name string @description("Declared name")
      age int @description("Age in years")
      email string
    }
    "#);
}

#[test]
fn blank_descriptions_count_as_missing() {
    let mut catalog = Catalog::new();
    let user = catalog.insert_record(
        Record::new("User")
            .field(Field::new("name", T::string()).with_description("   "))
            .field(Field::new("age", T::integer())),
    );
    catalog.comments_mut().insert("User", "name", "From comment");
    catalog.comments_mut().insert("User", "age", "\t");

    let output = Emitter::new(&catalog, Config::default())
        .emit(&[user])
        .unwrap();

    insta::assert_snapshot!(output, @r#"
    class User {
      name string @description("From comment")
      age int
    }
    "#);
}

#[test]
fn descriptions_off_drops_annotations() {
    let mut catalog = Catalog::new();
    let user = catalog.insert_record(
        Record::new("User").field(Field::new("name", T::string()).with_description("Shown?")),
    );

    let config = Config::new().include_descriptions(false);
    let output = Emitter::new(&catalog, config).emit(&[user]).unwrap();

    assert!(!output.contains("@description"));
}

#[test]
fn description_escaping() {
    let mut catalog = Catalog::new();
    let record = catalog.insert_record(
        Record::new("Path").field(
            Field::new("pattern", T::string()).with_description(r#"Matches "C:\dir" paths"#),
        ),
    );

    let output = Emitter::new(&catalog, Config::default())
        .emit(&[record])
        .unwrap();

    assert_eq!(
        output,
        "class Path {\n  pattern string @description(\"Matches \\\"C:\\\\dir\\\" paths\")\n}"
    );
}

#[test]
fn enum_value_descriptions_use_member_name() {
    let mut catalog = Catalog::new();
    let status = catalog.insert_enum(
        Enum::new("models::Status")
            .value("active", "Active")
            .value("deleted", "Deleted"),
    );
    let mut comments = DocTable::new();
    comments.insert("Status", "Active", "Account is active");
    comments.insert("Status", "active", "looked up by value, never used");

    let output = Emitter::new(&catalog, Config::default())
        .with_docs(&comments)
        .emit(&[status])
        .unwrap();

    insta::assert_snapshot!(output, @r#"
    enum Status {
      "active" @description("Account is active")
      "deleted"
    }
    "#);
}

#[test]
fn with_docs_replaces_catalog_comments() {
    let mut catalog = Catalog::new();
    let user = catalog.insert_record(Record::new("User").field(Field::new("name", T::string())));
    catalog.comments_mut().insert("User", "name", "From catalog");

    let output = Emitter::new(&catalog, Config::default())
        .with_docs(&NoDocs)
        .emit(std::slice::from_ref(&user))
        .unwrap();
    assert_eq!(output, "class User {\n  name string\n}");

    let lookup = docs::from_fn(|owner, member| Some(format!("{owner}::{member}")));
    let output = Emitter::new(&catalog, Config::default())
        .with_docs(&lookup)
        .emit(&[user])
        .unwrap();
    assert_eq!(output, "class User {\n  name string @description(\"User::name\")\n}");
}

#[test]
fn custom_indent() {
    let mut catalog = Catalog::new();
    let user = catalog.insert_record(
        Record::new("User")
            .field(Field::new("name", T::string()))
            .field(Field::new("tags", T::array(T::union([T::string(), T::integer()])))),
    );

    let emitter = Emitter::new(&catalog, Config::new().indent_size(4));
    assert_eq!(emitter.config().indent_size, 4);
    let output = emitter.emit(&[user]).unwrap();

    assert_eq!(
        output,
        "class User {\n    name string\n    tags (string | int)[]\n}"
    );
}

#[test]
fn unknown_root_is_an_error() {
    let catalog = commerce();
    let err = Emitter::new(&catalog, Config::default())
        .emit(&names(&["fixtures::Missing"]))
        .unwrap_err();

    assert!(matches!(err, Error::UnknownType(ref name) if name.qualified() == "fixtures::Missing"));
    assert_eq!(err.to_string(), "unknown type `fixtures::Missing`");
}

#[test]
fn missing_reference_renders_but_is_not_emitted() {
    let mut catalog = Catalog::new();
    let order = catalog.insert_record(
        Record::new("Order").field(Field::new("customer", T::record("crm::Customer"))),
    );

    let output = Emitter::new(&catalog, Config::default())
        .emit(&[order])
        .unwrap();

    assert_eq!(output, "class Order {\n  customer Customer\n}");
}

#[test]
fn short_name_collision_is_an_error() {
    let mut catalog = Catalog::new();
    catalog.insert_record(Record::new("billing::Address").field(Field::new("iban", T::string())));
    catalog.insert_record(Record::new("shipping::Address").field(Field::new("street", T::string())));
    catalog.insert_record(
        Record::new("Customer")
            .field(Field::new("billing", T::record("billing::Address")))
            .field(Field::new("shipping", T::record("shipping::Address"))),
    );

    let err = Emitter::new(&catalog, Config::default())
        .emit(&names(&["Customer"]))
        .unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"`billing::Address` and `shipping::Address` both emit as `Address`");
}

#[test]
fn record_and_enum_sharing_a_name_collide() {
    let mut catalog = Catalog::new();
    catalog.insert_enum(Enum::new("a::Kind").value("x", "X"));
    catalog.insert_record(Record::new("b::Kind"));

    let err = Emitter::new(&catalog, Config::default())
        .emit(&names(&["a::Kind", "b::Kind"]))
        .unwrap_err();

    assert!(matches!(err, Error::NameCollision { ref name, .. } if name == "Kind"));
}
