//! Slot-based statement templates.
//!
//! A template is a fixed sequence of literal text and named slots. Each slot
//! declares the literal that precedes and follows it; when the slot's value
//! is absent or empty, those literals are dropped with it. Optional clauses
//! therefore never leave doubled spaces, dangling commas or empty parens.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Text(&'static str),
    Slot {
        name: &'static str,
        before: &'static str,
        after: &'static str,
    },
}

pub const fn text(s: &'static str) -> Segment {
    Segment::Text(s)
}

/// Slot without surrounding literals.
pub const fn slot(name: &'static str) -> Segment {
    Segment::Slot {
        name,
        before: "",
        after: "",
    }
}

/// Slot whose `before`/`after` literals exist only when it is filled.
pub const fn opt(before: &'static str, name: &'static str, after: &'static str) -> Segment {
    Segment::Slot { name, before, after }
}

#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    segments: &'static [Segment],
}

impl Template {
    pub const fn new(name: &'static str, segments: &'static [Segment]) -> Self {
        Self { name, segments }
    }

    pub fn slots(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot { name, .. } => Some(*name),
            Segment::Text(_) => None,
        })
    }

    pub fn assemble(&self, values: &Values) -> String {
        let mut out = String::new();
        for segment in self.segments {
            match segment {
                Segment::Text(t) => out.push_str(t),
                Segment::Slot { name, before, after } => {
                    if let Some(value) = values.get(name) {
                        out.push_str(before);
                        out.push_str(value);
                        out.push_str(after);
                    }
                }
            }
        }
        out
    }
}

/// Named slot values. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct Values {
    map: HashMap<&'static str, String>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.map.insert(name, value.into());
        self
    }

    pub fn opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    /// Fill `name` with `keyword` only when `on` holds.
    pub fn flag(self, name: &'static str, on: bool, keyword: &'static str) -> Self {
        if on { self.set(name, keyword) } else { self }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Template = Template::new(
        "sample",
        &[
            text("CREATE"),
            opt(" ", "kind", ""),
            text(" THING "),
            slot("name"),
            opt(" (", "args", ")"),
            text(";"),
        ],
    );

    #[test]
    fn test_all_slots_filled() {
        let v = Values::new().set("kind", "BIG").set("name", "x").set("args", "1, 2");
        assert_eq!(SAMPLE.assemble(&v), "CREATE BIG THING x (1, 2);");
    }

    #[test]
    fn test_missing_optional_slots_drop_literals() {
        let v = Values::new().set("name", "x").set("args", "");
        assert_eq!(SAMPLE.assemble(&v), "CREATE THING x;");
    }

    #[test]
    fn test_flag_and_opt() {
        let v = Values::new()
            .flag("kind", false, "BIG")
            .opt("args", None::<String>)
            .set("name", "y");
        assert_eq!(SAMPLE.assemble(&v), "CREATE THING y;");
    }

    #[test]
    fn test_assembly_is_repeatable() {
        let v = Values::new().set("name", "x").set("kind", "SMALL");
        assert_eq!(SAMPLE.assemble(&v), SAMPLE.assemble(&v));
        assert_eq!(SAMPLE.slots().collect::<Vec<_>>(), vec!["kind", "name", "args"]);
    }
}
