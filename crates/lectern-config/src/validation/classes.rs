//! Class-name and attribute validation.

use crate::schema::LecternConfig;

use super::helpers::validate_token;

pub(crate) fn validate_highlight(errors: &mut Vec<String>, config: &LecternConfig) {
    let h = &config.highlight;
    validate_token(errors, "highlight.css_class", &h.css_class);
    validate_token(errors, "highlight.custom_css_class", &h.custom_css_class);
    validate_token(errors, "highlight.selected_class", &h.selected_class);
    validate_token(errors, "highlight.appended_class", &h.appended_class);

    if h.css_class == h.custom_css_class {
        errors.push(format!(
            "highlight.css_class and highlight.custom_css_class are both {:?}",
            h.css_class
        ));
    }
}

pub(crate) fn validate_accessibility(errors: &mut Vec<String>, config: &LecternConfig) {
    let a = &config.accessibility;
    validate_token(
        errors,
        "accessibility.marked_content_class",
        &a.marked_content_class,
    );
    validate_token(errors, "accessibility.owns_attribute", &a.owns_attribute);
}
