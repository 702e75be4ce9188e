//! Members operation - abstract member listing.

use eyre::Result;
use stubforge_catalog::Catalog;
use stubforge_types::{
    AttributeUse, MemberDef, MemberFilter, ParameterDef, TypeDescriptor, builtins,
};

use super::parse_type;
use crate::reports::{MemberGroup, MemberInfo, MembersReport};

/// Execute the members operation.
///
/// Lists the abstract members visible on `base`. With a category attribute,
/// members are grouped by the first matching attribute's first argument
/// (or its type name when it has none), in order of first appearance.
pub fn members(catalog: &Catalog, base: &str, category: Option<&str>) -> Result<MembersReport> {
    let universe = catalog.universe();
    let base = parse_type(catalog, base, "")?;
    let category = category
        .map(|expr| attribute_type(catalog, expr))
        .transpose()?;

    let mut groups: Vec<MemberGroup> = Vec::new();
    for declared in universe
        .members(&base, MemberFilter::INSTANCE)
        .filter(|m| m.member.is_abstract())
    {
        let label = category.as_ref().and_then(|attribute| {
            universe
                .find_attribute(declared.member.attributes(), attribute)
                .first()
                .map(category_label)
        });
        let info = MemberInfo {
            name: declared.member.name().to_string(),
            kind: match declared.member {
                MemberDef::Property(_) => "property",
                MemberDef::Method(_) => "method",
            },
            access: declared.member.access(),
            signature: signature(&declared.member),
            declaring_type: declared.declaring_type.to_string(),
        };

        match groups.iter_mut().find(|g| g.category == label) {
            Some(group) => group.members.push(info),
            None => groups.push(MemberGroup {
                category: label,
                members: vec![info],
            }),
        }
    }

    Ok(MembersReport {
        base: base.to_string(),
        groups,
    })
}

/// Resolve an attribute type, accepting the name without its `Attribute`
/// suffix.
fn attribute_type(catalog: &Catalog, expr: &str) -> Result<TypeDescriptor> {
    let suffixed = format!("{}{}", expr, builtins::ATTRIBUTE_SUFFIX);
    if !expr.ends_with(builtins::ATTRIBUTE_SUFFIX)
        && let Ok(ty) = catalog.resolve_type(&suffixed, "")
        && catalog.universe().contains(&ty.full_name())
    {
        return Ok(ty);
    }
    parse_type(catalog, expr, "")
}

fn category_label(attribute: &AttributeUse) -> String {
    match attribute.args.first() {
        Some(arg) => arg.trim_matches('"').to_string(),
        None => {
            let name = attribute.ty.name();
            name.strip_suffix(builtins::ATTRIBUTE_SUFFIX)
                .filter(|stripped| !stripped.is_empty())
                .unwrap_or(&name)
                .to_string()
        }
    }
}

fn signature(member: &MemberDef) -> String {
    match member {
        MemberDef::Property(property) => {
            let accessors: Vec<&str> = [
                property.getter.map(|_| "get;"),
                property.setter.map(|_| "set;"),
            ]
            .into_iter()
            .flatten()
            .collect();
            format!("{} {} {{ {} }}", property.ty, property.name, accessors.join(" "))
        }
        MemberDef::Method(method) => {
            let generics = if method.generic_params.is_empty() {
                String::new()
            } else {
                format!("<{}>", method.generic_params.join(", "))
            };
            let params: Vec<String> = method.params.iter().map(parameter).collect();
            format!(
                "{} {}{}({})",
                method.return_type,
                method.name,
                generics,
                params.join(", ")
            )
        }
    }
}

fn parameter(param: &ParameterDef) -> String {
    let modifier = match (param.by_ref, param.is_in, param.is_out) {
        (false, ..) => "",
        (true, true, _) => "in ",
        (true, _, true) => "out ",
        (true, false, false) => "ref ",
    };
    format!("{}{} {}", modifier, param.ty, param.name)
}
