//! GFF3 attribute field parsing.
//!
//! GFF3 attributes are in the format: `key=value;key=value;...`. Not every
//! key is present on every row.

/// Key holding the gene symbol.
pub const NAME_KEY: &str = "Name";

/// Return the gene name carried by an attributes string.
///
/// The first `;`-separated token that starts with `Name=` wins and
/// everything after the prefix is returned verbatim. Rows without such a
/// token, including malformed ones, yield the empty string.
pub fn gene_name(attributes: &str) -> &str {
    attribute_value(attributes, NAME_KEY).unwrap_or("")
}

/// Look up the value of `key` in an attributes string.
pub fn attribute_value<'a>(attributes: &'a str, key: &str) -> Option<&'a str> {
    attributes.split(';').find_map(|token| {
        token
            .strip_prefix(key)
            .and_then(|rest| rest.strip_prefix('='))
    })
}
