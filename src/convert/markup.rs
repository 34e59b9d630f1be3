//! Pulling the DMS strings out of the conversion service's result page.
//!
//! The page is a table and the WGS84 result is the 8th cell, which looks like
//! `φ=50°5'10.5"N<br>λ=14°25'3.2"E`. Every change of the page layout
//! breaks the lookup, so all the failures here end up as
//! [`ConversionError::MalformedResponse`].

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::error::ConversionError;

/// Zero-based index of the cell with the WGS84 coordinates
const COORDINATES_CELL: usize = 7;

lazy_static! {
    static ref RE_CELL: Regex =
        Regex::new(r"(?is)<td\b[^>]*>(.*?)</td\s*>").expect("Table cell regex is valid");
    static ref RE_ENTITY: Regex =
        Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").expect("Entity regex is valid");
}

fn malformed(msg: impl Into<String>) -> ConversionError {
    ConversionError::MalformedResponse(msg.into())
}

fn named_entity(name: &str) -> Option<char> {
    let ch = match name {
        "deg" => '°',
        "quot" => '"',
        "apos" => '\'',
        "prime" => '′',
        "Prime" => '″',
        "nbsp" => '\u{a0}',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        _ => return None,
    };
    Some(ch)
}

fn entity_char(entity: &str) -> Option<char> {
    let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse().ok()?
    } else {
        return named_entity(entity);
    };

    char::from_u32(code)
}

/// Replace the character references the way a browser shows them
fn decode_entities(fragment: &str) -> Cow<'_, str> {
    RE_ENTITY.replace_all(fragment, |caps: &Captures<'_>| {
        caps.get(1)
            .and_then(|m| entity_char(m.as_str()))
            .map_or_else(|| caps[0].to_owned(), String::from)
    })
}

/// The latitude and the longitude DMS strings from the result page.
///
/// # Errors
/// The page has no table, the table is too short or the coordinates cell
/// does not contain two `=`-prefixed values.
pub fn extract_dms_pair(html: &str) -> Result<(String, String), ConversionError> {
    let cells: Vec<&str> = RE_CELL
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    if cells.is_empty() {
        return Err(malformed("no table cells in the page"));
    }

    let cell = cells.get(COORDINATES_CELL).ok_or_else(|| {
        malformed(format!(
            "expected at least {} table cells, found {}",
            COORDINATES_CELL + 1,
            cells.len()
        ))
    })?;

    // the value runs from the `=` till the next tag
    let mut values = cell
        .split('=')
        .skip(1)
        .map(|part| part.split('<').next().unwrap_or_default());

    let lat = values
        .next()
        .ok_or_else(|| malformed("no latitude in the coordinates cell"))?;
    let lon = values
        .next()
        .ok_or_else(|| malformed("no longitude in the coordinates cell"))?;

    Ok((
        decode_entities(lat).trim().to_owned(),
        decode_entities(lon).trim().to_owned(),
    ))
}
