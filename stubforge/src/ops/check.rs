//! Check operation - catalog validation summary.

use std::path::Path;

use stubforge_catalog::Catalog;
use stubforge_types::{MemberFilter, TypeKind};

use crate::reports::{CheckReport, TypeSummary};

/// Execute the check operation.
///
/// The catalog is already validated by loading it; this summarizes the
/// types it declares.
pub fn check(catalog: &Catalog, config_path: &Path) -> CheckReport {
    let universe = catalog.universe();
    let types = catalog
        .declared_types()
        .filter_map(|name| universe.get(name))
        .map(|def| {
            let kind = match def.kind {
                TypeKind::Class if def.is_abstract => "abstract class".to_string(),
                TypeKind::Class if def.is_sealed => "sealed class".to_string(),
                kind => kind.as_str().to_string(),
            };
            TypeSummary {
                name: def.full_name(),
                kind,
                abstract_members: universe
                    .members(&def.descriptor(), MemberFilter::INSTANCE)
                    .filter(|m| m.member.is_abstract())
                    .count(),
            }
        })
        .collect();

    CheckReport {
        config_path: config_path.to_path_buf(),
        types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ops::fixtures,
        reports::{BufferOutput, Report},
    };

    #[test]
    fn test_check_summary() {
        let report = check(&fixtures::catalog(), Path::new("stubforge.toml"));
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            vec![
                "✓ stubforge.toml is valid",
                "",
                "2 types:",
                "  - Demo.CategoryAttribute (class)",
                "  - Demo.Shapes.Shape (abstract class, 2 abstract members)",
            ]
        );
    }
}
