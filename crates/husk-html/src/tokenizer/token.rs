use core::fmt;

pub use husk_dom::Attribute;

/// A markup event produced by the tokenizer.
///
/// Character data is delivered in runs: every maximal stretch of text
/// between two other tokens becomes a single [`Token::Text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<!DOCTYPE name ...>`
    Doctype {
        /// Lowercased first word after `DOCTYPE`, if any.
        name: Option<String>,
    },

    /// `<name attr=value ...>` or `<name ... />`
    StartTag {
        /// Lowercased tag name.
        name: String,
        /// Set when the tag ended with `/>`.
        self_closing: bool,
        /// Attributes in source order, duplicates included.
        attributes: Vec<Attribute>,
    },

    /// `</name>`. Attributes on end tags are parsed and discarded.
    EndTag {
        /// Lowercased tag name.
        name: String,
    },

    /// `<!-- data -->`, or a bogus comment such as `<?xml ...>`.
    Comment {
        /// Comment body.
        data: String,
    },

    /// Character data with references already decoded.
    Text {
        /// The text, untrimmed.
        data: String,
    },

    /// End of input. Always the last token.
    EndOfFile,
}

impl Token {
    /// A start tag with an empty name and no attributes.
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// An end tag with an empty name.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
        }
    }

    /// A comment with empty data.
    #[must_use]
    pub const fn new_comment() -> Self {
        Self::Comment {
            data: String::new(),
        }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// Tag name of a start or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => Some(name),
            _ => None,
        }
    }

    // Mutation helpers used while a token is being assembled. Calls on the
    // wrong variant are no-ops: attributes on an end tag, for example, are
    // tokenized and then dropped.

    pub(super) fn append_to_tag_name(&mut self, c: char) {
        if let Self::StartTag { name, .. } | Self::EndTag { name } = self {
            name.push(c);
        }
    }

    pub(super) fn set_self_closing(&mut self) {
        if let Self::StartTag { self_closing, .. } = self {
            *self_closing = true;
        }
    }

    pub(super) fn append_to_comment(&mut self, s: &str) {
        if let Self::Comment { data } = self {
            data.push_str(s);
        }
    }

    pub(super) fn start_new_attribute(&mut self) {
        if let Self::StartTag { attributes, .. } = self {
            attributes.push(Attribute::bare(String::new()));
        }
    }

    pub(super) fn append_to_current_attribute_name(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.name.push(c);
        }
    }

    /// Called on `=`: the current attribute now has a (possibly empty) value.
    pub(super) fn begin_current_attribute_value(&mut self) {
        if let Self::StartTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.value = Some(String::new());
        }
    }

    pub(super) fn append_to_current_attribute_value(&mut self, s: &str) {
        if let Self::StartTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.value.get_or_insert_with(String::new).push_str(s);
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { name } => {
                write!(f, "<!DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                write!(f, ">")
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {attr}")?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Text { data } => write!(f, "Text({data:?})"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
