pub const CATEGORY_SEPARATOR: &str = " > ";
pub const DEFAULT_CATEGORY_NAME: &str = "Outros";

///
/// Splits a composite `"Main > Sub"` category into its main and sub names.
/// Anything past the second segment is ignored. When the composite has no
/// sub segment, `subcategory` is used instead.
/// Returns `None` when no main name was given.
///
pub fn split_category_path<'a>(
    category: Option<&'a str>,
    subcategory: Option<&'a str>,
) -> Option<(&'a str, Option<&'a str>)> {
    let category = category.filter(|c| !c.is_empty())?;
    let mut segs = category.split(CATEGORY_SEPARATOR);
    let main = segs.next().filter(|m| !m.is_empty())?;
    let sub = segs.next()
        .filter(|s| !s.is_empty())
        .or(subcategory.filter(|s| !s.is_empty()));

    Some((main, sub))
}

///
/// Builds the display name of a transaction's category.
///
/// The base is the category name, or [`DEFAULT_CATEGORY_NAME`] when it did not
/// resolve. A resolved subcategory is always appended, even to the default base.
///
pub fn display_category(category: Option<&str>, subcategory: Option<&str>) -> String {
    let base = category.unwrap_or(DEFAULT_CATEGORY_NAME);
    match subcategory {
        Some(sub) => format!("{}{}{}", base, CATEGORY_SEPARATOR, sub),
        None => base.to_string(),
    }
}
