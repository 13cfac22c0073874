// ==========================================
// BQC Generator - user-facing messages (i18n)
// ==========================================
// rust-i18n, locales/en.yml (default) and locales/hi.yml
// Note: the rust_i18n::i18n! macro is invoked in lib.rs
// ==========================================

pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "hi"];

pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Switch locale; unknown codes fall back to "en"
pub fn set_locale(locale: &str) {
    let locale = locale.trim();
    if SUPPORTED_LOCALES.contains(&locale) {
        rust_i18n::set_locale(locale);
    } else {
        tracing::warn!(locale, "unsupported locale, using en");
        rust_i18n::set_locale("en");
    }
}

/// Translate a key without arguments
///
/// ```no_run
/// use bqc_generator::i18n::t;
/// let msg = t("procurement.saved");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate a key, replacing `%{name}` placeholders
///
/// ```no_run
/// use bqc_generator::i18n::t_with_args;
/// let msg = t_with_args("document.unsupported_format", &[("format", "pdf")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
