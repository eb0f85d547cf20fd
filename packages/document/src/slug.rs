/// Slug reserved for the store home page
pub const HOME_SLUG: &str = "/";

/// URL slug for a page name (`"About Us!"` → `"/about-us"`)
///
/// Names with no usable characters fall back to `/page`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len() + 1);
    let mut pending_dash = false;

    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "/page".to_string()
    } else {
        format!("/{}", slug)
    }
}

/// True when `slug` is `/` or `/segment(/segment)*` of lowercase alphanumerics and dashes
pub fn is_valid_slug(slug: &str) -> bool {
    if slug == HOME_SLUG {
        return true;
    }
    let Some(rest) = slug.strip_prefix('/') else {
        return false;
    };
    !rest.is_empty()
        && rest.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        })
}
