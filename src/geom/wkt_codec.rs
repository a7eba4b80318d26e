//! Well-Known Text encoding and decoding.
//!
//! Decoding pads brackets and commas with whitespace, splits on whitespace,
//! and rewrites the token stream as a JSON array literal: `(` and `)` become
//! `[` and `]`, commas pass through, and each pair of consecutive numbers is
//! wrapped as `[x,y]`. The resulting literal is nested exactly as deep as the
//! WKT, so it is then decoded at the depth the geometry type dictates.

use crate::geom::geometry::{Coords, Geometry, GeometryType, Ring, Rings};
use crate::util::error::GeoshiftError;
use crate::util::format::format_g;
use log::debug;
use serde_json::Value;
use std::fmt;

const EMPTY_KEYWORD: &str = "EMPTY";

impl Geometry {
    /// Parses a WKT string such as `POLYGON ((0 0, 0 2, 2 2, 0 0))`.
    ///
    /// The keyword is case-insensitive. `<KEYWORD> EMPTY` yields an empty geometry.
    /// `MULTIPOINT` accepts both `(1 2, 3 4)` and `((1 2), (3 4))`.
    pub fn from_wkt(text: &str) -> Result<Self, GeoshiftError> {
        let padded = text.replace('(', " [ ").replace(')', " ] ").replace(',', " , ");
        let mut tokens = padded.split_whitespace();

        let keyword = tokens
            .next()
            .ok_or_else(|| malformed("input is blank".to_string()))?;
        let geometry_type: GeometryType = keyword
            .parse()
            .inspect_err(|e| debug!("rejecting WKT: {}", e))?;

        let rest: Vec<&str> = tokens.collect();
        if let [word] = rest.as_slice() {
            if word.eq_ignore_ascii_case(EMPTY_KEYWORD) {
                return Ok(Geometry::empty(geometry_type));
            }
        }

        let literal = tokens_to_json(&rest)?;
        let value: Value = serde_json::from_str(&literal)
            .map_err(|e| malformed(format!("unbalanced structure in '{}': {}", text.trim(), e)))?;

        let coords = decode_by_type(geometry_type, value)
            .map_err(|e| malformed(format!("{} coordinates: {}", geometry_type, e)))?;
        Geometry::new(geometry_type, coords).map_err(|e| malformed(e.to_string()))
    }

    /// Renders the geometry as WKT, with ordinates in Go `%g` form.
    ///
    /// Positions within a ring are joined with `", "`; the top-level members
    /// of each keyword are joined with `","`.
    ///
    /// ```
    /// use geoshift::Geometry;
    ///
    /// # fn main() -> Result<(), geoshift::GeoshiftError> {
    /// let poly = Geometry::polygon(vec![vec![[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [0.0, 0.0]]])?;
    /// assert_eq!(poly.to_wkt(), "POLYGON ((0 0, 0 2, 2 2, 0 0))");
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_wkt(&self) -> String {
        let keyword = self.geometry_type.wkt_keyword();
        if self.is_empty() {
            return format!("{} {}", keyword, EMPTY_KEYWORD);
        }

        let body = match self.geometry_type {
            GeometryType::Point => position_text(&self.coords[0][0][0]),
            GeometryType::LineString | GeometryType::MultiPoint => self.coords[0][0]
                .iter()
                .map(position_text)
                .collect::<Vec<_>>()
                .join(","),
            GeometryType::Polygon | GeometryType::MultiLineString => self.coords[0]
                .iter()
                .map(ring_text)
                .collect::<Vec<_>>()
                .join(","),
            GeometryType::MultiPolygon => self
                .coords
                .iter()
                .map(group_text)
                .collect::<Vec<_>>()
                .join(","),
        };
        format!("{} ({})", keyword, body)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wkt())
    }
}

fn malformed(msg: String) -> GeoshiftError {
    debug!("rejecting WKT: {}", msg);
    GeoshiftError::MalformedWkt(msg)
}

/// Rewrites WKT tokens as a JSON array literal.
fn tokens_to_json(tokens: &[&str]) -> Result<String, GeoshiftError> {
    let mut out = String::with_capacity(tokens.len() * 8);
    // Set after an ordinate, until a bracket or comma arrives.
    let mut awaiting_separator = false;

    for &token in tokens {
        match token {
            "[" | "]" | "," => {
                out.push_str(token);
                awaiting_separator = false;
            }
            _ => {
                let ordinate: f64 = token
                    .parse()
                    .map_err(|_| malformed(format!("unexpected token '{}'", token)))?;
                if !ordinate.is_finite() {
                    return Err(malformed(format!("non-finite ordinate '{}'", token)));
                }
                if awaiting_separator {
                    out.push(',');
                    out.push_str(&ordinate.to_string());
                    out.push(']');
                } else {
                    out.push('[');
                    out.push_str(&ordinate.to_string());
                }
                awaiting_separator = true;
            }
        }
    }
    Ok(out)
}

/// A WKT body nests like the GeoJSON coordinates of the same type, except that
/// a Point keeps its parentheses as one extra level.
fn decode_by_type(geometry_type: GeometryType, value: Value) -> serde_json::Result<Coords> {
    match geometry_type {
        GeometryType::Point | GeometryType::LineString => Geometry::coords_at_depth(2, value),
        GeometryType::MultiPoint => match Geometry::coords_at_depth(2, value.clone()) {
            Ok(coords) => Ok(coords),
            Err(flat_err) => {
                let nested = Geometry::coords_at_depth(3, value).map_err(|_| flat_err)?;
                let points: Ring = nested.into_iter().flatten().flatten().collect();
                Ok(vec![vec![points]])
            }
        },
        GeometryType::Polygon | GeometryType::MultiLineString => {
            Geometry::coords_at_depth(3, value)
        }
        GeometryType::MultiPolygon => Geometry::coords_at_depth(4, value),
    }
}

fn position_text(p: &[f64; 2]) -> String {
    format!("{} {}", format_g(p[0]), format_g(p[1]))
}

fn ring_text(ring: &Ring) -> String {
    let points: Vec<String> = ring.iter().map(position_text).collect();
    format!("({})", points.join(", "))
}

fn group_text(rings: &Rings) -> String {
    let rings: Vec<String> = rings.iter().map(ring_text).collect();
    format!("({})", rings.join(", "))
}
