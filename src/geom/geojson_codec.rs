use crate::geom::geometry::{Geometry, GeometryType};
use crate::util::error::GeoshiftError;
use log::debug;
use serde_json::Value;

impl Geometry {
    /// Parses a GeoJSON geometry document `{"type": ..., "coordinates": ...}`.
    ///
    /// The coordinates are decoded at the depth the `type` dictates. A
    /// `Feature` is unwrapped to its `geometry`; a `FeatureCollection` is
    /// rejected. An empty `coordinates` array yields an empty geometry.
    ///
    /// # Example
    /// ```
    /// use geoshift::{Geometry, GeometryType};
    ///
    /// # fn main() -> Result<(), geoshift::GeoshiftError> {
    /// let geom = Geometry::from_geojson(r#"{"type":"LineString","coordinates":[[1,2],[3,4]]}"#)?;
    /// assert_eq!(geom.geometry_type, GeometryType::LineString);
    /// assert_eq!(geom.num_points(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_geojson(text: &str) -> Result<Self, GeoshiftError> {
        let doc: Value = serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;
        Self::from_geojson_value(doc)
    }

    /// Like [`Geometry::from_geojson`], for an already parsed document.
    pub fn from_geojson_value(doc: Value) -> Result<Self, GeoshiftError> {
        let Value::Object(mut object) = doc else {
            return Err(malformed("document is not an object".to_string()));
        };

        let type_name = match object.get("type") {
            Some(Value::String(name)) => name.clone(),
            _ => return Err(malformed("missing \"type\" member".to_string())),
        };

        match type_name.as_str() {
            "Feature" => {
                return match object.remove("geometry") {
                    Some(geometry @ Value::Object(_)) => Self::from_geojson_value(geometry),
                    _ => Err(malformed("Feature has no geometry".to_string())),
                };
            }
            "FeatureCollection" => {
                return Err(malformed(
                    "FeatureCollection not supported, use individual geometries".to_string(),
                ));
            }
            _ => {}
        }

        let geometry_type: GeometryType = type_name
            .parse()
            .inspect_err(|e| debug!("rejecting GeoJSON: {}", e))?;
        let coordinates = object
            .remove("coordinates")
            .ok_or_else(|| malformed(format!("{} has no coordinates", geometry_type)))?;

        if matches!(&coordinates, Value::Array(items) if items.is_empty()) {
            return Ok(Geometry::empty(geometry_type));
        }

        let coords = Geometry::coords_at_depth(geometry_type.nesting_depth(), coordinates)
            .map_err(|e| malformed(format!("{} coordinates: {}", geometry_type, e)))?;
        Geometry::new(geometry_type, coords).map_err(|e| malformed(e.to_string()))
    }

    /// Returns the `coordinates` member: the normalized coordinates cut back
    /// to the nesting depth of the geometry's type.
    pub fn coordinates_value(&self) -> Value {
        if self.is_empty() {
            return Value::Array(Vec::new());
        }
        let coords = &self.coords;
        let value = match self.geometry_type.nesting_depth() {
            1 => serde_json::to_value(coords[0][0][0]),
            2 => serde_json::to_value(&coords[0][0]),
            3 => serde_json::to_value(&coords[0]),
            _ => serde_json::to_value(coords),
        };
        // Plain nested float arrays always serialize.
        value.unwrap_or(Value::Null)
    }

    /// Renders the geometry as a GeoJSON geometry document.
    ///
    /// ```
    /// use geoshift::Geometry;
    ///
    /// let pt = Geometry::point(1.5, 2.0);
    /// assert_eq!(pt.to_geojson(), r#"{"type":"Point","coordinates":[1.5,2.0]}"#);
    /// ```
    pub fn to_geojson(&self) -> String {
        format!(
            r#"{{"type":"{}","coordinates":{}}}"#,
            self.geometry_type,
            self.coordinates_value()
        )
    }
}

fn malformed(msg: String) -> GeoshiftError {
    debug!("rejecting GeoJSON: {}", msg);
    GeoshiftError::MalformedGeoJson(msg)
}
