/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Up to eight spaces; wider values are clamped.
    Spaces(u8),
    Tab,
}

const SPACES: &str = "        ";

impl Indent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(width) => &SPACES[..usize::from(*width).min(SPACES.len())],
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(4)
    }
}
