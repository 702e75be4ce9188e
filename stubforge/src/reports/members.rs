//! Members command report data structures.

use serde::Serialize;
use stubforge_types::Access;

use super::output::{Output, Report};

/// Abstract members of a base type, grouped by category.
#[derive(Debug, Serialize)]
pub struct MembersReport {
    /// The inspected base type.
    pub base: String,
    pub groups: Vec<MemberGroup>,
}

/// Members sharing a category. `category` is `None` for members without
/// the category attribute.
#[derive(Debug, Serialize)]
pub struct MemberGroup {
    pub category: Option<String>,
    pub members: Vec<MemberInfo>,
}

#[derive(Debug, Serialize)]
pub struct MemberInfo {
    pub name: String,
    pub kind: &'static str,
    pub access: Access,
    pub signature: String,
    pub declaring_type: String,
}

impl MembersReport {
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).sum()
    }
}

impl Report for MembersReport {
    fn render(&self, out: &mut dyn Output) {
        let count = self.member_count();
        if count == 0 {
            out.preformatted(&format!("{} has no abstract members", self.base));
            return;
        }

        out.preformatted(&format!(
            "{} abstract member{} on {}",
            count,
            if count == 1 { "" } else { "s" },
            self.base
        ));

        for group in &self.groups {
            out.newline();
            out.section(group.category.as_deref().unwrap_or("Uncategorized"));
            for member in &group.members {
                out.list_item(&format!(
                    "{} {}  [{}]",
                    member.access, member.signature, member.declaring_type
                ));
            }
        }
    }
}
