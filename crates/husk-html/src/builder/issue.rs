use core::fmt;

use strum_macros::Display;

/// What the tree builder had to recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueKind {
    /// An end tag that did not match the innermost open element. It was ignored.
    #[strum(serialize = "unmatched-end-tag")]
    UnmatchedEndTag,
    /// An element still open at the end of input. It was closed implicitly.
    #[strum(serialize = "unclosed-element")]
    UnclosedElement,
}

/// A recovery action taken while building the tree.
///
/// Issues are informational: the build always completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Kind of recovery.
    pub kind: IssueKind,
    /// Tag name of the offending end tag or unclosed element.
    pub tag_name: String,
    /// Index of the token being processed when the issue was recorded.
    pub token_index: usize,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::UnmatchedEndTag => {
                write!(f, "{}: </{}> at token {}", self.kind, self.tag_name, self.token_index)
            }
            IssueKind::UnclosedElement => {
                write!(f, "{}: <{}> open at end of input", self.kind, self.tag_name)
            }
        }
    }
}
