//! Chart documents: the `chartinfo` XML format and a JSON rendering.
//!
//! The XML layout is fixed by existing stylesheets: two-space indentation,
//! no declaration, attributes in a set order, every element written with an
//! explicit end tag and wrapper elements omitted for empty collections.

use crate::chart::Chart;
use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// Render a chart as a `chartinfo` XML document.
pub fn to_xml(chart: &Chart) -> Result<String, fmt::Error> {
    let request = &chart.request;
    let mut out = String::new();

    write!(
        out,
        "<chartinfo year=\"{}\" month=\"{}\" day=\"{}\" time=\"{}\" lat=\"{}\" lon=\"{}\" name=\"{}\" city=\"{}\" display=\"{}\">",
        request.year,
        request.month,
        request.day,
        format_float(request.time),
        format_float(request.lat),
        format_float(request.lon),
        escape_xml(&request.name),
        escape_xml(&request.city),
        escape_xml(request.display.as_str()),
    )?;

    if !chart.houses.is_empty() {
        write!(out, "\n{INDENT}<houses>")?;
        for house in &chart.houses {
            write!(
                out,
                "\n{INDENT}{INDENT}<House sign_name=\"{}\" degree=\"{}\" number=\"{}\" sign=\"{}\" house=\"{}\" degree_ut=\"{}\"></House>",
                house.sign.name(),
                format_float(house.degree),
                house.label,
                house.sign.index(),
                house.number,
                format_float(house.degree_ut),
            )?;
        }
        write!(out, "\n{INDENT}</houses>")?;
    }

    if !chart.bodies.is_empty() {
        write!(out, "\n{INDENT}<bodies>")?;
        for body in &chart.bodies {
            let name = body.name();
            write!(
                out,
                "\n{INDENT}{INDENT}<{name} sign=\"{}\" sign_name=\"{}\" degree=\"{}\" degree_ut=\"{}\" retrograde=\"{}\" id=\"{}\" dist=\"{}\"></{name}>",
                body.sign.index(),
                body.sign.name(),
                format_float(body.degree),
                format_float(body.degree_ut),
                body.retrograde,
                body.id(),
                body.cluster,
            )?;
        }
        write!(out, "\n{INDENT}</bodies>")?;
    }

    if !chart.marks.is_empty() {
        write!(out, "\n{INDENT}<ascmcs>")?;
        for mark in &chart.marks {
            let name = mark.name();
            write!(
                out,
                "\n{INDENT}{INDENT}<{name} id=\"{}\" sign=\"{}\" sign_name=\"{}\" degree=\"{}\" degree_ut=\"{}\"></{name}>",
                mark.id(),
                mark.sign.index(),
                mark.sign.name(),
                format_float(mark.degree),
                format_float(mark.degree_ut),
            )?;
        }
        write!(out, "\n{INDENT}</ascmcs>")?;
    }

    if !chart.aspects.is_empty() {
        write!(out, "\n{INDENT}<aspects>")?;
        for aspect in &chart.aspects {
            let name = aspect.kind.label();
            write!(
                out,
                "\n{INDENT}{INDENT}<{name} body1=\"{}\" body2=\"{}\" degree1=\"{}\" degree2=\"{}\"></{name}>",
                aspect.body1.name(),
                aspect.body2.name(),
                format_float(aspect.degree1),
                format_float(aspect.degree2),
            )?;
        }
        write!(out, "\n{INDENT}</aspects>")?;
    }

    out.push_str("\n</chartinfo>");
    Ok(out)
}

pub fn to_json(chart: &Chart) -> serde_json::Result<String> {
    serde_json::to_string_pretty(chart)
}

/// Shortest round-trip digits, switching to exponent form when the decimal
/// exponent is below -4 or at least 6 (`1e-05`, `1.5e+06`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if value == 0.0 {
        return value.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return value.to_string(),
    };

    if (-4..6).contains(&exponent) {
        value.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// Escape text for use inside a double-quoted attribute.
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\t' => escaped.push_str("&#x9;"),
            '\n' => escaped.push_str("&#xA;"),
            '\r' => escaped.push_str("&#xD;"),
            // Not representable in XML 1.0
            '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => escaped.push('\u{FFFD}'),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float_fixed() {
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(10.0), "10");
        assert_eq!(format_float(16.083334), "16.083334");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(123456.5), "123456.5");
        assert_eq!(format_float(-2.25), "-2.25");
    }

    #[test]
    fn test_format_float_exponent() {
        assert_eq!(format_float(0.00001), "1e-05");
        assert_eq!(format_float(1.5e6), "1.5e+06");
        assert_eq!(format_float(-2.5e-7), "-2.5e-07");
        assert_eq!(format_float(1e100), "1e+100");
        assert_eq!(format_float(f64::INFINITY), "+Inf");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Lyon & Co"), "Lyon &amp; Co");
        assert_eq!(escape_xml("<\"'>"), "&lt;&#34;&#39;&gt;");
        assert_eq!(escape_xml("a\tb\nc\r"), "a&#x9;b&#xA;c&#xD;");
        assert_eq!(escape_xml("A\u{1}B\u{1F}\u{FFFE}"), "A\u{FFFD}B\u{FFFD}\u{FFFD}");
        assert_eq!(escape_xml("Zürich"), "Zürich");
    }
}
