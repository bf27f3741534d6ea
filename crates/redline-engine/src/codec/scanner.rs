use std::collections::HashMap;

use crate::rope::Span;

use super::{
    cursor::Cursor,
    escape::unescape_attr,
    markup::{COMMENT, DEL, EDIT, INS, REPLACE_WITH, close_tag, open_tag},
    types::{ChangeRecord, TagStyle, non_empty},
};

/// Scans `text` for change spans.
///
/// Matching is leftmost-first and non-overlapping: at every `<` the scanner
/// tries a combined `<edit>` span, then a `<del>` span (absorbing a directly
/// following `<ins>` sibling), then a standalone `<ins>` span. Anything that
/// does not complete a match is skipped over as literal text.
pub fn scan(text: &str) -> Vec<ChangeRecord> {
    let mut cur = Cursor::new(text);
    let mut out = vec![];

    while let Some(at) = cur.find("<") {
        cur.i = at;
        let parsed = try_parse_edit(&mut cur)
            .or_else(|| try_parse_del(&mut cur))
            .or_else(|| try_parse_ins(&mut cur));

        match parsed {
            Some(found) => {
                let span = Span::new(at, cur.pos());
                out.push(ChangeRecord {
                    index: out.len(),
                    comment: found.comment,
                    deleted: found.deleted,
                    inserted: found.inserted,
                    span,
                    raw: text[span.range()].to_string(),
                    style: found.style,
                });
            }
            None => {
                cur.bump();
            }
        }
    }

    out
}

struct Found {
    comment: String,
    deleted: Option<String>,
    inserted: Option<String>,
    style: TagStyle,
}

type Attrs = HashMap<String, String>;

/// Parses `<name attr="v" ...>` at the cursor.
///
/// On failure the cursor is left where it was.
fn try_open_tag(cur: &mut Cursor<'_>, name: &str) -> Option<Attrs> {
    let saved = cur.clone();
    let attrs = open_tag_inner(cur, name);
    if attrs.is_none() {
        *cur = saved;
    }
    attrs
}

fn open_tag_inner(cur: &mut Cursor<'_>, name: &str) -> Option<Attrs> {
    if !cur.eat(&open_tag(name)) {
        return None;
    }
    // `<del` must not match `<details>`
    match cur.peek() {
        Some(b'>') => {}
        Some(b) if b.is_ascii_whitespace() => {}
        _ => return None,
    }

    let mut attrs = Attrs::new();
    loop {
        cur.skip_whitespace();
        if cur.eat(">") {
            return Some(attrs);
        }
        let key = cur.take_while(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if key.is_empty() {
            return None;
        }
        cur.skip_whitespace();
        if !cur.eat("=") {
            return None;
        }
        cur.skip_whitespace();
        let quote = match cur.bump()? {
            b'"' => "\"",
            b'\'' => "'",
            _ => return None,
        };
        let close = cur.find(quote)?;
        let value = &cur.s[cur.pos()..close];
        cur.i = close + 1;
        attrs.insert(key.to_string(), unescape_attr(value).into_owned());
    }
}

/// Reads a raw body up to `</name>` and consumes the closing tag.
fn take_body<'a>(cur: &mut Cursor<'a>, name: &str) -> Option<&'a str> {
    let close = close_tag(name);
    let end = cur.find(&close)?;
    let body = &cur.s[cur.pos()..end];
    cur.i = end + close.len();
    Some(body)
}

/// `<edit comment=".."> [<del>..</del>] [<ins>..</ins>] </edit>`, sub-spans in either order.
fn try_parse_edit(cur: &mut Cursor<'_>) -> Option<Found> {
    let saved = cur.clone();
    let found = parse_edit_inner(cur);
    if found.is_none() {
        *cur = saved;
    }
    found
}

fn parse_edit_inner(cur: &mut Cursor<'_>) -> Option<Found> {
    let attrs = try_open_tag(cur, EDIT)?;
    let mut deleted = None;
    let mut inserted = None;

    loop {
        cur.skip_whitespace();
        if cur.eat(&close_tag(EDIT)) {
            break;
        }
        if deleted.is_none() && try_open_tag(cur, DEL).is_some() {
            deleted = Some(non_empty(take_body(cur, DEL)?));
            continue;
        }
        if inserted.is_none() && try_open_tag(cur, INS).is_some() {
            inserted = Some(non_empty(take_body(cur, INS)?));
            continue;
        }
        return None;
    }

    Some(Found {
        comment: comment_of(&attrs),
        deleted: deleted.flatten(),
        inserted: inserted.flatten(),
        style: TagStyle::Combined,
    })
}

/// `<del comment=".." [replace-with=".."]>..</del>`, optionally followed
/// directly by an `<ins>` sibling that supplies the replacement.
fn try_parse_del(cur: &mut Cursor<'_>) -> Option<Found> {
    let saved = cur.clone();
    let attrs = try_open_tag(cur, DEL)?;
    let Some(body) = take_body(cur, DEL) else {
        *cur = saved;
        return None;
    };

    let mut comment = comment_of(&attrs);
    let mut inserted = attrs.get(REPLACE_WITH).and_then(|v| non_empty(v));

    if !attrs.contains_key(REPLACE_WITH)
        && let Some(sibling) = try_parse_ins(cur)
    {
        if comment.is_empty() {
            comment = sibling.comment;
        }
        inserted = sibling.inserted;
    }

    Some(Found {
        comment,
        deleted: non_empty(body),
        inserted,
        style: TagStyle::Split,
    })
}

fn try_parse_ins(cur: &mut Cursor<'_>) -> Option<Found> {
    let saved = cur.clone();
    let attrs = try_open_tag(cur, INS)?;
    let Some(body) = take_body(cur, INS) else {
        *cur = saved;
        return None;
    };

    Some(Found {
        comment: comment_of(&attrs),
        deleted: None,
        inserted: non_empty(body),
        style: TagStyle::Split,
    })
}

fn comment_of(attrs: &Attrs) -> String {
    attrs.get(COMMENT).cloned().unwrap_or_default()
}
