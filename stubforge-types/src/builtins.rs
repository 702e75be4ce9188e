//! Built-in types of the output dialect.

use crate::{Access, MethodDef, TypeDef, TypeDescriptor, TypeKind};

/// Root of every class hierarchy.
pub const OBJECT: &str = "System.Object";
/// The textual string type.
pub const STRING: &str = "System.String";
/// The `void` pseudo-type.
pub const VOID: &str = "System.Void";
/// Marker base type for annotations.
pub const ATTRIBUTE: &str = "System.Attribute";
/// Exception thrown by synthesized member bodies.
pub const NOT_IMPLEMENTED_EXCEPTION: &str = "System.NotImplementedException";

/// Suffix stripped from annotation type names at use sites.
pub const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Built-in value types: (simple name in `System`, keyword).
const PRIMITIVES: &[(&str, &str)] = &[
    ("Boolean", "bool"),
    ("Byte", "byte"),
    ("SByte", "sbyte"),
    ("Char", "char"),
    ("Int16", "short"),
    ("UInt16", "ushort"),
    ("Int32", "int"),
    ("UInt32", "uint"),
    ("Int64", "long"),
    ("UInt64", "ulong"),
    ("Single", "float"),
    ("Double", "double"),
    ("Decimal", "decimal"),
    ("IntPtr", "nint"),
    ("UIntPtr", "nuint"),
];

/// Keyword for a built-in type, looked up by fully-qualified name.
pub fn keyword_for(full_name: &str) -> Option<&'static str> {
    match full_name {
        OBJECT => return Some("object"),
        STRING => return Some("string"),
        VOID => return Some("void"),
        _ => {}
    }
    let name = full_name.strip_prefix("System.")?;
    PRIMITIVES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, keyword)| *keyword)
}

/// Descriptor for a keyword alias (`int` → `System.Int32`).
pub fn from_keyword(keyword: &str) -> Option<TypeDescriptor> {
    let name = match keyword {
        "object" => "Object",
        "string" => "String",
        "void" => "Void",
        _ => PRIMITIVES
            .iter()
            .find(|(_, k)| *k == keyword)
            .map(|(n, _)| *n)?,
    };
    Some(TypeDescriptor::named("System", name))
}

/// Definitions every universe starts with.
pub fn definitions() -> Vec<TypeDef> {
    let mut defs = vec![
        TypeDef::new("System", "Object", TypeKind::Class),
        TypeDef::class("System", "String").sealed(),
        TypeDef::new("System", "Void", TypeKind::Void),
        TypeDef::class("System", "Attribute").abstract_(),
        TypeDef::class("System", "Exception"),
        TypeDef::class("System", "NotImplementedException")
            .base(TypeDescriptor::named("System", "Exception")),
        TypeDef::interface("System", "IDisposable").method(
            MethodDef::new("Dispose", TypeDescriptor::named("System", "Void"))
                .access(Access::Public)
                .abstract_(),
        ),
    ];
    defs.extend(
        PRIMITIVES
            .iter()
            .map(|(name, _)| TypeDef::new("System", *name, TypeKind::Primitive)),
    );
    defs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for keyword in ["int", "bool", "string", "object", "void", "decimal"] {
            let ty = from_keyword(keyword).unwrap();
            assert_eq!(keyword_for(&ty.full_name()), Some(keyword));
        }
    }

    #[test]
    fn test_non_builtin_has_no_keyword() {
        assert_eq!(keyword_for("System.Exception"), None);
        assert_eq!(keyword_for("Demo.Int32"), None);
        assert_eq!(from_keyword("Int32"), None);
    }
}
