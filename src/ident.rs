use indexmap::IndexMap;
use smol_str::SmolStr;

/// Table name to alias routing used when rendering column and table references.
#[derive(Debug, Default, Clone)]
pub struct TableAliases(IndexMap<SmolStr, SmolStr>);

impl TableAliases {
    /// Registers or overwrites the alias of `table`.
    pub fn insert<T, A>(&mut self, table: T, alias: A) -> Option<SmolStr>
    where
        T: Into<SmolStr>,
        A: Into<SmolStr>,
    {
        self.0.insert(table.into(), alias.into())
    }

    pub fn get(&self, table: &str) -> Option<&str> {
        self.0.get(table).map(SmolStr::as_str)
    }
}

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Replaces every whole-token occurrence of `name` in `template` with `replacement`.
///
/// A token is whole when the bytes around it are not `[A-Za-z0-9_]`. The
/// start and the end of the template count as boundaries.
pub(crate) fn replace_column_name(template: &str, name: &str, replacement: &str) -> String {
    if name.is_empty() {
        return template.to_owned();
    }

    let hay = template.as_bytes();
    let needle = name.as_bytes();
    let mut out = String::with_capacity(template.len() + replacement.len());
    let mut last = 0;
    let mut index = 0;

    while index + needle.len() <= hay.len() {
        let end = index + needle.len();
        let matched = &hay[index..end] == needle
            && (index == 0 || !is_word_byte(hay[index - 1]))
            && (end == hay.len() || !is_word_byte(hay[end]));

        if matched {
            out.push_str(&template[last..index]);
            out.push_str(replacement);
            last = end;
            index = end;
        } else {
            index += 1;
        }
    }

    out.push_str(&template[last..]);
    out
}
