//! Tag names and markup rendering.

use super::{
    escape::escape_attr,
    types::{ChangeRecord, TagStyle},
};

pub const EDIT: &str = "edit";
pub const DEL: &str = "del";
pub const INS: &str = "ins";

pub const COMMENT: &str = "comment";
pub const REPLACE_WITH: &str = "replace-with";

/// Tag names the scanner recognises, in the order it tries them.
pub const TAG_NAMES: [&str; 3] = [EDIT, DEL, INS];

pub fn open_tag(name: &str) -> String {
    format!("<{name}")
}

pub fn close_tag(name: &str) -> String {
    format!("</{name}>")
}

impl ChangeRecord {
    /// Renders the change as markup in the requested style.
    pub fn to_markup(&self, style: TagStyle) -> String {
        render(
            &self.comment,
            self.deleted.as_deref(),
            self.inserted.as_deref(),
            style,
        )
    }
}

/// Renders a change from its parts.
pub fn render(comment: &str, deleted: Option<&str>, inserted: Option<&str>, style: TagStyle) -> String {
    let comment = escape_attr(comment);
    match style {
        TagStyle::Combined => {
            let mut out = format!(r#"<{EDIT} {COMMENT}="{comment}">"#);
            if let Some(d) = deleted {
                out.push_str(&format!("<{DEL}>{d}</{DEL}>"));
            }
            if let Some(i) = inserted {
                out.push_str(&format!("<{INS}>{i}</{INS}>"));
            }
            out.push_str(&close_tag(EDIT));
            out
        }
        TagStyle::Split => match (deleted, inserted) {
            (Some(d), Some(i)) => format!(
                r#"<{DEL} {COMMENT}="{comment}" {REPLACE_WITH}="{}">{d}</{DEL}>"#,
                escape_attr(i)
            ),
            (None, Some(i)) => format!(r#"<{INS} {COMMENT}="{comment}">{i}</{INS}>"#),
            (d, None) => format!(
                r#"<{DEL} {COMMENT}="{comment}">{}</{DEL}>"#,
                d.unwrap_or_default()
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::replacement(Some("sat"), Some("sits"), r#"<edit comment="tense"><del>sat</del><ins>sits</ins></edit>"#)]
    #[case::deletion(Some("very"), None, r#"<edit comment="tense"><del>very</del></edit>"#)]
    #[case::insertion(None, Some("now"), r#"<edit comment="tense"><ins>now</ins></edit>"#)]
    fn combined_markup(
        #[case] deleted: Option<&str>,
        #[case] inserted: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(render("tense", deleted, inserted, TagStyle::Combined), expected);
    }

    #[rstest]
    #[case::replacement(Some("sat"), Some("sits"), r#"<del comment="tense" replace-with="sits">sat</del>"#)]
    #[case::deletion(Some("very"), None, r#"<del comment="tense">very</del>"#)]
    #[case::insertion(None, Some("now"), r#"<ins comment="tense">now</ins>"#)]
    fn split_markup(
        #[case] deleted: Option<&str>,
        #[case] inserted: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(render("tense", deleted, inserted, TagStyle::Split), expected);
    }

    #[test]
    fn attributes_are_escaped_bodies_are_not() {
        let markup = render(
            r#"say "hi" & go"#,
            Some(r#"<b>"old"</b> & co"#),
            Some("a & b"),
            TagStyle::Split,
        );
        assert_eq!(
            markup,
            r#"<del comment="say &quot;hi&quot; &amp; go" replace-with="a &amp; b"><b>"old"</b> & co</del>"#
        );
    }
}
