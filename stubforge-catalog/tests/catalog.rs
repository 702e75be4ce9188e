//! Integration tests for catalog parsing and validation.

use std::str::FromStr;

use stubforge_catalog::{BraceStyleSetting, Catalog, CatalogFile, Error, IndentSetting};
use stubforge_types::{Access, MemberDef, MemberFilter, TypeDescriptor, TypeKind};
use tempfile::TempDir;

const SHAPES: &str = r#"
[render]
indent = 2
brace_style = "same-line"
blank_line_between_members = false

[types."Demo.CategoryAttribute"]
base = "System.Attribute"

[types."Demo.Shapes.Shape"]
abstract = true
interfaces = ["System.IDisposable"]

[[types."Demo.Shapes.Shape".properties]]
name = "Name"
type = "string"
get = { abstract = true }
set = { access = "protected", abstract = true }
attributes = [{ type = "Demo.Category", args = ["Identity", 1] }]

[[types."Demo.Shapes.Shape".methods]]
name = "Compute"
access = "protected"
abstract = true
params = [{ name = "x", type = "int" }, { name = "y", type = "int", modifier = "out" }]

[types."Demo.Shapes.Repository"]
kind = "interface"
generics = ["T"]

[[types."Demo.Shapes.Repository".methods]]
name = "Find"
returns = "T[]"
generics = ["TKey"]
params = [{ name = "key", type = "TKey" }]
"#;

fn parse(src: &str) -> Box<Error> {
    Catalog::from_str(src).expect_err("catalog should be rejected")
}

#[test]
fn test_render_settings() {
    let catalog = Catalog::from_str(SHAPES).expect("Failed to parse catalog");
    let render = catalog.render();
    assert_eq!(render.indent, IndentSetting::Spaces(2));
    assert_eq!(render.brace_style, BraceStyleSetting::SameLine);
    assert!(!render.blank_line_between_members);
}

#[test]
fn test_render_defaults() {
    let catalog = Catalog::from_str("").unwrap();
    assert_eq!(catalog.render().indent, IndentSetting::Spaces(4));
    assert_eq!(catalog.render().brace_style, BraceStyleSetting::OwnLine);
    assert!(catalog.render().blank_line_between_members);
}

#[test]
fn test_tab_indent() {
    let catalog = Catalog::from_str("[render]\nindent = \"tab\"\n").unwrap();
    assert_eq!(catalog.render().indent, IndentSetting::Tab);
}

#[test]
fn test_invalid_indent() {
    let err = parse("[render]\nindent = 3\n");
    assert!(matches!(*err, Error::Parse { .. }));
}

#[test]
fn test_shape_definition() {
    let catalog = Catalog::from_str(SHAPES).unwrap();
    assert_eq!(
        catalog.declared_types().collect::<Vec<_>>(),
        vec![
            "Demo.CategoryAttribute",
            "Demo.Shapes.Shape",
            "Demo.Shapes.Repository"
        ]
    );

    let shape = catalog.universe().get("Demo.Shapes.Shape").unwrap();
    assert!(shape.is_abstract);
    assert_eq!(shape.kind, TypeKind::Class);
    assert_eq!(shape.base.as_ref().unwrap().full_name(), "System.Object");
    assert_eq!(shape.interfaces[0].full_name(), "System.IDisposable");

    let MemberDef::Property(name) = &shape.members[0] else {
        panic!("expected a property");
    };
    assert_eq!(name.ty, TypeDescriptor::named("System", "String"));
    assert_eq!(name.getter.unwrap().access, Access::Public);
    assert_eq!(name.setter.unwrap().access, Access::Protected);
    assert!(name.is_abstract());

    // Attribute names resolve with or without the conventional suffix.
    let attribute = &name.attributes[0];
    assert_eq!(attribute.ty.full_name(), "Demo.CategoryAttribute");
    assert_eq!(attribute.args, vec!["\"Identity\"", "1"]);

    let MemberDef::Method(compute) = &shape.members[1] else {
        panic!("expected a method");
    };
    assert_eq!(compute.access, Access::Protected);
    assert!(compute.is_abstract);
    assert!(compute.params[1].is_out);
    assert!(compute.params[1].by_ref);
}

#[test]
fn test_interface_members_default_to_abstract() {
    let catalog = Catalog::from_str(SHAPES).unwrap();
    let repo = catalog.universe().get("Demo.Shapes.Repository").unwrap();
    assert!(repo.is_interface());
    assert_eq!(repo.base, None);

    let MemberDef::Method(find) = &repo.members[0] else {
        panic!("expected a method");
    };
    assert!(find.is_abstract);
    assert_eq!(find.return_type.to_string(), "T[]");
    assert_eq!(find.params[0].ty, TypeDescriptor::param("TKey"));
}

#[test]
fn test_catalog_types_enumerate_members() {
    let catalog = Catalog::from_str(SHAPES).unwrap();
    let shape = TypeDescriptor::named("Demo.Shapes", "Shape");
    let abstract_members: Vec<_> = catalog
        .universe()
        .members(&shape, MemberFilter::INSTANCE)
        .filter(|m| m.member.is_abstract())
        .map(|m| m.member.name().to_string())
        .collect();
    assert_eq!(abstract_members, vec!["Name", "Compute"]);
}

#[test]
fn test_reserved_keyword_member() {
    let err = parse(
        r#"
        [types."Demo.Widget"]
        [[types."Demo.Widget".methods]]
        name = "class"
        "#,
    );
    assert!(matches!(*err, Error::ReservedKeyword { span: Some(_), .. }));
}

#[test]
fn test_invalid_type_name() {
    let err = parse("[types.\"Demo.2D\"]\n");
    assert!(matches!(*err, Error::InvalidIdentifier { .. }));
}

#[test]
fn test_invalid_type_expression_points_into_value() {
    let src = r#"
[types."Demo.Widget"]
[[types."Demo.Widget".properties]]
name = "Size"
type = "List<int"
get = {}
"#;
    let err = parse(src);
    let Error::InvalidTypeExpression { span, .. } = *err else {
        panic!("expected an invalid type error, got {:?}", err);
    };
    let span = span.expect("span should be found");
    let value_start = src.find("List<int").unwrap();
    assert_eq!(span.offset(), value_start + "List<int".len());
}

#[test]
fn test_unknown_access_level() {
    let err = parse(
        r#"
        [types."Demo.Widget"]
        [[types."Demo.Widget".methods]]
        name = "Run"
        access = "friend"
        "#,
    );
    assert!(matches!(*err, Error::InvalidAccess { span: Some(_), .. }));
}

#[test]
fn test_unknown_kind() {
    let err = parse("[types.\"Demo.Widget\"]\nkind = \"record\"\n");
    assert!(matches!(*err, Error::Parse { .. }));
}

#[test]
fn test_duplicate_property() {
    let err = parse(
        r#"
        [types."Demo.Widget"]
        [[types."Demo.Widget".properties]]
        name = "Size"
        type = "int"
        get = {}
        [[types."Demo.Widget".properties]]
        name = "Size"
        type = "long"
        get = {}
        "#,
    );
    assert!(matches!(*err, Error::DuplicateMember { .. }));
}

#[test]
fn test_overloads_are_not_duplicates() {
    let catalog = Catalog::from_str(
        r#"
        [types."Demo.Widget"]
        [[types."Demo.Widget".methods]]
        name = "Resize"
        params = [{ name = "size", type = "int" }]
        [[types."Demo.Widget".methods]]
        name = "Resize"
        params = [{ name = "size", type = "double" }]
        "#,
    )
    .unwrap();
    assert_eq!(
        catalog.universe().get("Demo.Widget").unwrap().members.len(),
        2
    );
}

#[test]
fn test_duplicate_method_signature() {
    let err = parse(
        r#"
        [types."Demo.Widget"]
        [[types."Demo.Widget".methods]]
        name = "Resize"
        params = [{ name = "size", type = "int" }]
        [[types."Demo.Widget".methods]]
        name = "Resize"
        params = [{ name = "other", type = "int" }]
        "#,
    );
    assert!(matches!(*err, Error::DuplicateMember { .. }));
}

#[test]
fn test_generic_parameter_shadowing() {
    let err = parse(
        r#"
        [types."Demo.Box"]
        generics = ["T"]
        [[types."Demo.Box".methods]]
        name = "Map"
        generics = ["T"]
        "#,
    );
    let Error::Validation { message, .. } = *err else {
        panic!("expected a validation error");
    };
    assert!(message.contains("shadows"));
}

#[test]
fn test_interface_as_base() {
    let err = parse(
        r#"
        [types."Demo.Widget"]
        base = "System.IDisposable"
        "#,
    );
    let Error::Validation { message, .. } = *err else {
        panic!("expected a validation error");
    };
    assert!(message.contains("is an interface"));
}

#[test]
fn test_class_as_interface() {
    let err = parse(
        r#"
        [types."Demo.Widget"]
        interfaces = ["System.Exception"]
        "#,
    );
    assert!(matches!(*err, Error::Validation { .. }));
}

#[test]
fn test_base_cycle() {
    let err = parse(
        r#"
        [types."Demo.A"]
        base = "Demo.B"
        [types."Demo.B"]
        base = "Demo.A"
        "#,
    );
    assert!(matches!(
        *err,
        Error::Universe {
            source: stubforge_types::Error::CyclicInheritance(_),
            ..
        }
    ));
}

#[test]
fn test_redefining_builtin() {
    let err = parse("[types.\"System.String\"]\n");
    assert!(matches!(
        *err,
        Error::Universe {
            source: stubforge_types::Error::DuplicateType(_),
            ..
        }
    ));
}

#[test]
fn test_abstract_member_on_concrete_class() {
    let err = parse(
        r#"
        [types."Demo.Widget"]
        [[types."Demo.Widget".methods]]
        name = "Run"
        abstract = true
        "#,
    );
    assert!(matches!(*err, Error::Validation { .. }));
}

#[test]
fn test_property_without_accessors() {
    let err = parse(
        r#"
        [types."Demo.Widget"]
        [[types."Demo.Widget".properties]]
        name = "Size"
        type = "int"
        "#,
    );
    assert!(matches!(*err, Error::Validation { .. }));
}

#[test]
fn test_unqualified_names_resolve_in_declaring_namespace() {
    let catalog = Catalog::from_str(
        r#"
        [types."Demo.Shapes.Shape"]
        abstract = true
        [types."Demo.Shapes.Circle"]
        base = "Shape"
        "#,
    )
    .unwrap();
    let circle = catalog.universe().get("Demo.Shapes.Circle").unwrap();
    assert_eq!(circle.base.as_ref().unwrap().full_name(), "Demo.Shapes.Shape");
}

#[test]
fn test_catalog_file_open() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(temp_dir.path().join("stubforge.toml"), SHAPES).unwrap();

    let file = CatalogFile::open_in(temp_dir.path()).expect("Failed to open catalog");
    assert_eq!(file.content(), SHAPES);
    assert!(file.catalog().declares("Demo.Shapes.Shape"));
    assert!(!file.catalog().declares("System.String"));
}

#[test]
fn test_errors_name_the_file() {
    let err = Catalog::from_str_with_filename("[types.\"Demo.2D\"]\n", "shapes.toml").unwrap_err();
    let Error::InvalidIdentifier { src, span, .. } = *err else {
        panic!("expected an invalid identifier error");
    };
    assert_eq!(src.name(), "shapes.toml");
    assert_eq!(span.map(|s| s.offset()), Some(8));
}

#[test]
fn test_resolve_type_expression() {
    let catalog = Catalog::from_str(SHAPES).unwrap();
    let ty = catalog
        .resolve_type("Repository<Shape>[]", "Demo.Shapes")
        .unwrap();
    assert_eq!(ty.to_string(), "Demo.Shapes.Repository<Demo.Shapes.Shape>[]");

    let ty = catalog.resolve_type("Demo.Shapes.Shape", "").unwrap();
    assert_eq!(ty, TypeDescriptor::named("Demo.Shapes", "Shape"));

    assert!(catalog.resolve_type("Demo.Shapes.Repository", "").is_err());
    assert!(catalog.resolve_type("List<", "").is_err());
}
