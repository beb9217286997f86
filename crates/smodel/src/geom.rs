use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

impl Dimension {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Same shape as the serde form: `{ "x": .., "y": .. }`.
impl From<Point> for Value {
    fn from(point: Point) -> Self {
        let mut object = Map::new();
        object.insert("x".to_string(), point.x.into());
        object.insert("y".to_string(), point.y.into());
        Value::Object(object)
    }
}

/// Same shape as the serde form: `{ "width": .., "height": .. }`.
impl From<Dimension> for Value {
    fn from(size: Dimension) -> Self {
        let mut object = Map::new();
        object.insert("width".to_string(), size.width.into());
        object.insert("height".to_string(), size.height.into());
        Value::Object(object)
    }
}
