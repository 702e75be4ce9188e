use std::fmt;

/// A rendered reference to a type at a use site.
///
/// Built by [`TypeResolver`](crate::TypeResolver); the base name is already
/// the text that appears in source (`int`, `Shape`, `Demo.Shapes.Shape`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    pub base_name: String,
    pub type_arguments: Vec<TypeReference>,
    /// Number of `[]` suffixes.
    pub array_rank: usize,
}

impl TypeReference {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            type_arguments: Vec::new(),
            array_rank: 0,
        }
    }

    /// Add generic type arguments.
    pub fn with_arguments(mut self, arguments: Vec<TypeReference>) -> Self {
        self.type_arguments = arguments;
        self
    }

    /// Wrap in `rank` levels of array.
    pub fn with_array_rank(mut self, rank: usize) -> Self {
        self.array_rank = rank;
        self
    }

    pub fn is_array(&self) -> bool {
        self.array_rank > 0
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_name)?;
        if !self.type_arguments.is_empty() {
            let args: Vec<String> = self.type_arguments.iter().map(ToString::to_string).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        for _ in 0..self.array_rank {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let reference = TypeReference::new("Dictionary")
            .with_arguments(vec![
                TypeReference::new("string"),
                TypeReference::new("int").with_array_rank(1),
            ])
            .with_array_rank(2);
        assert_eq!(reference.to_string(), "Dictionary<string, int[]>[][]");
        assert!(reference.is_array());
        assert!(!TypeReference::new("int").is_array());
    }
}
