//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Lectern Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[highlight]
# css_class = "highlight"             # primary find controller matches
# custom_css_class = "customHighlight" # secondary find controller matches
# selected_class = "selected"
# appended_class = "appended"

[accessibility]
# enabled = true
# marked_content_class = "markedContent"
# owns_attribute = "aria-owns"

[find]
# case_sensitive = false
# use_regex = false
# highlight_all = true

[logging]
# level = "INFO"         # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
