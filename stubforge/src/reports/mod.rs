//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod members;
mod output;

pub use check::{CheckReport, TypeSummary};
pub use generate::{GenerateOutcome, GenerateReport};
pub use members::{MemberGroup, MemberInfo, MembersReport};
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Report, TerminalOutput};
