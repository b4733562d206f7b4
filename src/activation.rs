//! Rendering of deactivated elements.
//!
//! A deactivated element still appears in the script, as a comment holding
//! its exact text. Leaves (a column, one constraint, one statement) are
//! commented in place. Composites (a table body, a key column list) keep
//! their active members live and move every inactive member into one
//! trailing comment block. Inside an inactive parent nothing is commented,
//! since the parent comments the whole text once.

/// A rendered fragment with its activation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderable {
    pub text: String,
    pub active: bool,
}

impl Renderable {
    pub fn new(text: impl Into<String>, active: bool) -> Self {
        Self {
            text: text.into(),
            active,
        }
    }

    pub fn active(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Leaf rule: the text itself, or the text commented out.
    pub fn render(&self) -> String {
        if self.active {
            self.text.clone()
        } else {
            comment_out(&self.text)
        }
    }

    /// Leaf rule inside a parent; an inactive parent renders children plain.
    pub fn render_in(&self, parent_active: bool) -> String {
        if parent_active { self.render() } else { self.text.clone() }
    }
}

/// Comment a whole statement: `-- ` for one line, a block for several.
pub fn comment_out(text: &str) -> String {
    if text.contains('\n') {
        format!("/*\n{text}\n*/")
    } else {
        format!("-- {text}")
    }
}

/// Comment a fragment that shares a line with live SQL.
pub fn inline_comment(text: &str) -> String {
    format!("/* {text} */")
}

/// Composite rule for statement members separated by `separator`: active
/// members in order, then inactive ones in one trailing comment.
pub fn join_members(members: &[Renderable], separator: &str, parent_active: bool) -> String {
    if !parent_active {
        return members
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join(separator);
    }
    let (active, inactive): (Vec<&Renderable>, Vec<&Renderable>) = members.iter().partition(|m| m.active);
    let live = active.iter().map(|m| m.text.as_str()).collect::<Vec<_>>().join(separator);
    if inactive.is_empty() {
        return live;
    }
    let dead = inactive.iter().map(|m| m.text.as_str()).collect::<Vec<_>>().join(separator);
    // Separator without its comma: the comment holds whatever follows.
    let gap = separator.trim_start_matches(',');
    if live.is_empty() {
        inline_comment(&dead)
    } else {
        format!("{live}{gap}{}", inline_comment(&dead))
    }
}

/// Parenthesised identifier list with the same composite rule, e.g.
/// `("a", "b" /* "c" */)`.
pub fn column_list(columns: &[Renderable], parent_active: bool) -> String {
    let all_inactive = !columns.is_empty() && columns.iter().all(|c| !c.active);
    // A fully inactive list is commented by whoever owns it.
    let inner = join_members(columns, ", ", parent_active && !all_inactive);
    format!("({inner})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_rendering() {
        assert_eq!(Renderable::active("x").render(), "x");
        assert_eq!(Renderable::new("\"a\" NUMBER", false).render(), "-- \"a\" NUMBER");
        assert_eq!(
            Renderable::new("CREATE TABLE t\n(\n\ta\n);", false).render(),
            "/*\nCREATE TABLE t\n(\n\ta\n);\n*/"
        );
    }

    #[test]
    fn test_inactive_parent_renders_children_plain() {
        let r = Renderable::new("x", false);
        assert_eq!(r.render_in(false), "x");
        assert_eq!(r.render_in(true), "-- x");
    }

    #[test]
    fn test_join_moves_inactive_members_to_trailing_block() {
        let members = vec![
            Renderable::active("a"),
            Renderable::new("b", false),
            Renderable::active("c"),
            Renderable::new("d", false),
        ];
        assert_eq!(join_members(&members, ",\n\t", true), "a,\n\tc\n\t/* b,\n\td */");
        assert_eq!(join_members(&members, ",\n\t", false), "a,\n\tb,\n\tc,\n\td");
    }

    #[test]
    fn test_join_all_inactive() {
        let members = vec![Renderable::new("a", false), Renderable::new("b", false)];
        assert_eq!(join_members(&members, ", ", true), "/* a, b */");
    }

    #[test]
    fn test_column_list() {
        let cols = vec![
            Renderable::active("\"a\""),
            Renderable::active("\"b\""),
            Renderable::new("\"c\"", false),
        ];
        assert_eq!(column_list(&cols, true), "(\"a\", \"b\" /* \"c\" */)");
        assert_eq!(column_list(&cols, false), "(\"a\", \"b\", \"c\")");

        let dead = vec![Renderable::new("\"a\"", false), Renderable::new("\"b\"", false)];
        assert_eq!(column_list(&dead, true), "(\"a\", \"b\")");
    }
}
