//! Raw TOML layout of a catalog, before validation.

use indexmap::IndexMap;
use serde::Deserialize;
use stubforge_types::TypeKind;

use super::RenderSettings;

/// Root of a stubforge.toml file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSchema {
    #[serde(default)]
    pub render: RenderSettings,

    /// Type definitions keyed by fully-qualified name, in file order.
    #[serde(default)]
    pub types: IndexMap<String, TypeEntry>,
}

/// `[types."Ns.Name"]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    #[serde(default)]
    pub kind: KindEntry,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default, rename = "sealed")]
    pub is_sealed: bool,

    /// Base class; classes default to `System.Object`.
    pub base: Option<String>,

    #[serde(default)]
    pub interfaces: Vec<String>,

    /// Generic parameter names (`["T"]`).
    #[serde(default)]
    pub generics: Vec<String>,

    #[serde(default)]
    pub attributes: Vec<AttributeEntry>,

    #[serde(default)]
    pub properties: Vec<PropertyEntry>,

    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindEntry {
    #[default]
    Class,
    Interface,
    Struct,
    Enum,
}

impl From<KindEntry> for TypeKind {
    fn from(kind: KindEntry) -> Self {
        match kind {
            KindEntry::Class => TypeKind::Class,
            KindEntry::Interface => TypeKind::Interface,
            KindEntry::Struct => TypeKind::Struct,
            KindEntry::Enum => TypeKind::Enum,
        }
    }
}

/// `[[types."Ns.Name".properties]]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyEntry {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    pub get: Option<AccessorEntry>,

    pub set: Option<AccessorEntry>,

    #[serde(default, rename = "static")]
    pub is_static: bool,

    #[serde(default)]
    pub attributes: Vec<AttributeEntry>,
}

/// `get = { access = "public", abstract = true }`
///
/// Unset fields inherit from the declaring type: members of interfaces are
/// abstract by default, everything is public by default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessorEntry {
    pub access: Option<String>,

    #[serde(rename = "abstract")]
    pub is_abstract: Option<bool>,
}

/// `[[types."Ns.Name".methods]]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodEntry {
    pub name: String,

    #[serde(default = "default_returns")]
    pub returns: String,

    pub access: Option<String>,

    #[serde(rename = "abstract")]
    pub is_abstract: Option<bool>,

    #[serde(default, rename = "static")]
    pub is_static: bool,

    #[serde(default)]
    pub generics: Vec<String>,

    #[serde(default)]
    pub params: Vec<ParamEntry>,

    #[serde(default)]
    pub attributes: Vec<AttributeEntry>,
}

fn default_returns() -> String {
    "void".to_string()
}

/// `{ name = "y", type = "int", modifier = "out" }`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamEntry {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    pub modifier: Option<ParamModifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamModifier {
    In,
    Out,
    Ref,
}

/// `{ type = "Demo.CategoryAttribute", args = ["Identity"] }`
///
/// String arguments become quoted literals; numbers and booleans are
/// emitted as written.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeEntry {
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub args: Vec<toml::Value>,
}
