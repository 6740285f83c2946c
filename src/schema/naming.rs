//! Record name derivation

/// Convert a collection or field name to a PascalCase record name.
///
/// Names that already look PascalCase (no separators, leading uppercase)
/// keep their casing. Everything else is title-cased word by word, with
/// `_` and `-` acting as word breaks. Characters that cannot appear in an
/// identifier are dropped.
pub fn to_pascal_case(name: &str) -> String {
    let Some(first) = name.chars().next() else {
        return String::new();
    };

    let has_separator = name.contains([' ', '_', '-']);
    if !has_separator && first.is_uppercase() {
        return name.chars().filter(|c| c.is_alphanumeric()).collect();
    }

    let mut out = String::with_capacity(name.len());
    let mut prev_cased = false;
    for c in name.chars() {
        let c = if c == '_' || c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            if c.is_alphanumeric() {
                out.push(c);
            }
            prev_cased = false;
        }
    }
    out
}

/// Name of the record generated for a nested document under `field`
pub fn nested_record_name(owner: &str, field: &str) -> String {
    format!("{}{}", to_pascal_case(owner), to_pascal_case(field))
}
