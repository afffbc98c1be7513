//! Unit skeleton and placeholder substitution.
//!
//! A skeleton is plain text with four placeholders:
//!
//! | Placeholder      | Replaced with                           |
//! |------------------|-----------------------------------------|
//! | `${unit_name}`   | generated unit name                     |
//! | `${fields}`      | hoisted constant declarations           |
//! | `${locals}`      | cached local declarations               |
//! | `${expression}`  | rendered final expression               |
//!
//! The skeleton is split into literal text and slots once, when loaded.
//! Rendering only concatenates, so substituted text is never scanned for
//! placeholders again and the result is never re-parsed.

use std::path::Path;

use crate::CodegenError;

const BUILTIN: &str = include_str!("unit.template");

/// A placeholder in the skeleton.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    UnitName,
    Fields,
    Locals,
    Expression,
}

impl Slot {
    const ALL: [Slot; 4] = [Slot::UnitName, Slot::Fields, Slot::Locals, Slot::Expression];

    fn token(self) -> &'static str {
        match self {
            Slot::UnitName => "unit_name",
            Slot::Fields => "fields",
            Slot::Locals => "locals",
            Slot::Expression => "expression",
        }
    }

    fn from_token(token: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.token() == token)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

/// The four blocks substituted into a skeleton.
#[derive(Copy, Clone, Debug)]
pub struct UnitParts<'a> {
    pub unit_name: &'a str,
    pub fields: &'a str,
    pub locals: &'a str,
    pub expression: &'a str,
}

impl UnitParts<'_> {
    fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::UnitName => self.unit_name,
            Slot::Fields => self.fields,
            Slot::Locals => self.locals,
            Slot::Expression => self.expression,
        }
    }
}

/// A parsed unit skeleton. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitTemplate {
    segments: Vec<Segment>,
}

impl UnitTemplate {
    /// The skeleton shipped with this crate.
    pub fn builtin() -> Result<Self, CodegenError> {
        Self::parse(BUILTIN)
    }

    /// Read and parse a skeleton from disk.
    pub fn load(path: &Path) -> Result<Self, CodegenError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CodegenError::resource(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&text)
    }

    /// Parse skeleton text.
    ///
    /// Every placeholder must appear at least once, and no other `${...}`
    /// token may appear.
    pub fn parse(text: &str) -> Result<Self, CodegenError> {
        let mut segments = Vec::new();
        let mut rest = text;

        while let Some(start) = rest.find("${") {
            let after = &rest[start + 2..];
            let Some(len) = after.find('}') else {
                return Err(CodegenError::resource(format!(
                    "unterminated placeholder at byte {}",
                    text.len() - rest.len() + start
                )));
            };
            let token = &after[..len];
            let slot = Slot::from_token(token).ok_or_else(|| {
                CodegenError::resource(format!("unknown placeholder `${{{token}}}`"))
            })?;
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            segments.push(Segment::Slot(slot));
            rest = &after[len + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        for slot in Slot::ALL {
            if !segments.contains(&Segment::Slot(slot)) {
                return Err(CodegenError::resource(format!(
                    "missing placeholder `${{{}}}`",
                    slot.token()
                )));
            }
        }

        Ok(UnitTemplate { segments })
    }

    /// Substitute `parts` into the skeleton.
    pub fn render(&self, parts: &UnitParts<'_>) -> String {
        let mut out = String::with_capacity(1024);
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(parts.get(*slot)),
            }
        }
        out
    }
}
