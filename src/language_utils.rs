//! Language utilities for provider language codes
//!
//! Codes are ISO 639-1 (2-letter) or ISO 639-2 (3-letter) codes, optionally
//! followed by a region or script subtag as the translation endpoint accepts
//! them (`pt-BR`, `zh-CN`). The source language may also be `auto`.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Source code that asks the provider to detect the language
pub const AUTO_LANGUAGE: &str = "auto";

/// Check whether `code` requests source-language detection
pub fn is_auto(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(AUTO_LANGUAGE)
}

// ISO 639-2/B codes that differ from their 639-2/T form
fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    let terminology = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        _ => return None,
    };
    Some(terminology)
}

/// Primary language subtag of `code`, lowercased (`pt-BR` -> `pt`)
fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Resolve a language code to its isolang entry
pub fn parse_language(code: &str) -> Result<Language> {
    let primary = primary_subtag(code);

    let language = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary).or_else(|| {
            bibliographic_to_terminology(&primary).and_then(Language::from_639_3)
        }),
        _ => None,
    };

    language.ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Validate a target language code
pub fn validate_target_language(code: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(anyhow!("Target language must not be empty"));
    }
    if is_auto(code) {
        return Err(anyhow!("Target language cannot be '{}'", AUTO_LANGUAGE));
    }
    parse_language(code).map(|_| ())
}

/// Validate a source language code; `auto` and empty (detect) are accepted
pub fn validate_source_language(code: &str) -> Result<()> {
    if code.trim().is_empty() || is_auto(code) {
        return Ok(());
    }
    parse_language(code).map(|_| ())
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    Ok(parse_language(code)?.to_639_3().to_string())
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code; `auto` reads as auto-detect
pub fn get_language_name(code: &str) -> Result<String> {
    if is_auto(code) {
        return Ok("Auto-detect".to_string());
    }
    Ok(parse_language(code)?.to_name().to_string())
}
