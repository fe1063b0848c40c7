//! Yarn locator strings
//!
//! A locator identifies a resolved package: `name@range`, optionally followed
//! by a resolution suffix such as `::locator=root%40workspace%3A.`.
//! Scoped names (`@scope/name`) start with an `@` of their own.

/// Package name of a locator, scope included
///
/// Everything up to the first `@` that is not the scope marker. A string
/// without such an `@` is taken to be a bare package name.
pub fn package_name(locator: &str) -> &str {
    let start = usize::from(locator.starts_with('@'));
    match locator[start..].find('@') {
        Some(pos) => &locator[..start + pos],
        None => locator,
    }
}
