//! Document state — the single shared text.
//!
//! TRADE-OFFS
//! ==========
//! `replace` overwrites unconditionally. Whichever edit is applied last wins;
//! concurrent edits are lost without detection. There is no version, history,
//! or diffing.

#[derive(Debug, Default)]
pub struct Document {
    content: String,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn read(&self) -> &str {
        &self.content
    }

    pub fn replace(&mut self, content: String) {
        self.content = content;
    }

    /// Length in UTF-16 code units, the unit browser clients count in.
    #[must_use]
    pub fn len_utf16(&self) -> usize {
        self.content.encode_utf16().count()
    }
}
