use crate::error::LineFault;

/// A single classified line of INI text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    Section(&'a str),
    Parameter(&'a str, &'a str),
}

pub fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}

pub fn is_comment_line(line: &str) -> bool {
    line.trim().starts_with('#')
}

/// Checks the raw line for a `[` ... `]` header.
///
/// A line opening with `[` that does not also close with `]` is a fault, not a parameter.
pub fn is_section_line(line: &str) -> Result<bool, LineFault> {
    if !line.starts_with('[') {
        return Ok(false);
    }
    if !line.ends_with(']') {
        return Err(LineFault::UnterminatedSection);
    }
    Ok(true)
}

/// Strips one leading `[` and one trailing `]`. Inner whitespace is kept.
pub fn extract_section_name(line: &str) -> &str {
    let name = line.strip_prefix('[').unwrap_or(line);
    name.strip_suffix(']').unwrap_or(name)
}

pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Splits `key=value` at its only `=`.
pub fn split_parameter(line: &str) -> Result<(&str, &str), LineFault> {
    let (key, value) = line.split_once('=').ok_or(LineFault::MissingDelimiter)?;
    if value.contains('=') {
        return Err(LineFault::ExtraDelimiter);
    }
    Ok((key, value))
}

/// Classifies a line in the order the document builder needs:
/// blank, comment, section header, then parameter.
pub fn classify(line: &str) -> Result<Line<'_>, LineFault> {
    if is_blank_line(line) {
        return Ok(Line::Blank);
    }
    if is_comment_line(line) {
        return Ok(Line::Comment);
    }
    if is_section_line(line)? {
        let name = extract_section_name(line);
        if name.is_empty() {
            return Err(LineFault::EmptySectionName);
        }
        return Ok(Line::Section(name));
    }

    match line.chars().next() {
        Some(c) if is_letter(c) => {
            let (key, value) = split_parameter(line)?;
            Ok(Line::Parameter(key, value))
        }
        _ => Err(LineFault::InvalidParameter),
    }
}
