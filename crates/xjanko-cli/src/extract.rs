//! Pull the embedded x-janko record out of a saved puzzle page.
//!
//! The pages carry the record in an element like
//! `<script id="data" type="application/x-janko">...</script>`. Matching is
//! ASCII case-insensitive on tag and attribute names and works on the raw
//! text; no HTML parser is involved.

/// MIME type of the embedded record.
pub const DATA_TYPE: &str = "application/x-janko";

/// The element with `id="data"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataElement<'a> {
    /// Value of the `type` attribute, if present.
    pub kind: Option<&'a str>,
    /// Text between the opening and closing tag.
    pub body: &'a str,
}

impl DataElement<'_> {
    pub fn is_x_janko(&self) -> bool {
        self.kind.is_some_and(|k| k.trim().eq_ignore_ascii_case(DATA_TYPE))
    }

    /// Body with line endings normalized to `\n` and a trailing newline.
    pub fn normalized(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 1);
        for line in self.body.lines() {
            out.push_str(line);
            out.push('\n');
        }
        if out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// Find the first element whose `id` attribute is `data`.
pub fn find_data_element(html: &str) -> Option<DataElement<'_>> {
    // ASCII lowercasing keeps byte offsets valid for `html`
    let lc = html.to_ascii_lowercase();
    let mut from = 0;

    while let Some(rel) = lc[from..].find('<') {
        let start = from + rel;
        let open_end = start + lc[start..].find('>')?;
        let tag = &html[start + 1..open_end];
        from = open_end + 1;

        if tag.starts_with('/') || tag.starts_with('!') {
            continue;
        }
        if attr_value(tag, "id").map(str::trim) != Some("data") {
            continue;
        }

        let name = tag
            .split(|c: char| c.is_ascii_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let close = format!("</{}", name);
        let body_end = lc[from..].find(&close).map_or(html.len(), |i| from + i);

        return Some(DataElement {
            kind: attr_value(tag, "type"),
            body: &html[from..body_end],
        });
    }
    None
}

/// Value of attribute `name` inside a tag's text (without the angle
/// brackets). Handles double, single, and unquoted values.
fn attr_value<'t>(tag: &'t str, name: &str) -> Option<&'t str> {
    let bytes = tag.as_bytes();
    let mut i = 0;

    // skip the element name
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
        i += 1;
    }

    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let key_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }
        let key = &tag[key_start..i];

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            // bare attribute
            if key.eq_ignore_ascii_case(name) {
                return Some("");
            }
            if key.is_empty() {
                i += 1;
            }
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let (value_start, value_end) = match bytes.get(i) {
            Some(&q @ (b'"' | b'\'')) => {
                let start = i + 1;
                let end = tag[start..].find(q as char).map_or(tag.len(), |e| start + e);
                i = (end + 1).min(tag.len());
                (start, end)
            }
            _ => {
                let start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                (start, i)
            }
        };

        if key.eq_ignore_ascii_case(name) {
            return Some(&tag[value_start..value_end]);
        }
    }
    None
}
