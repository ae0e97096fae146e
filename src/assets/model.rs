//! Triangle-list model files
//!
//! Plain whitespace-separated text: a header with the triangle count, the
//! number of per-vertex attributes and their names, then the attribute
//! values of every vertex of every triangle in declaration order.
//!
//! ```text
//! 1 2 pos color
//! 0 0 1  255 0 0 255
//! 1 0 1  0 255 0 255
//! 0 1 1  0 0 255 255
//! ```

use std::fs;
use std::path::Path;

use crate::rasterizer::{Model, Triangle, Vec2, Vec4, Vertex};

/// Error type for model loading
#[derive(Debug)]
pub enum ModelError {
    IoError(std::io::Error),
    /// Input ended while `expected` was being read
    UnexpectedEnd { expected: &'static str },
    InvalidNumber(String),
    UnknownAttribute(String),
}

impl From<std::io::Error> for ModelError {
    fn from(e: std::io::Error) -> Self {
        ModelError::IoError(e)
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::IoError(e) => write!(f, "IO error: {}", e),
            ModelError::UnexpectedEnd { expected } => write!(f, "Unexpected end of file, expected {}", expected),
            ModelError::InvalidNumber(token) => write!(f, "Invalid number: {:?}", token),
            ModelError::UnknownAttribute(name) => write!(f, "Unknown vertex attribute: {:?}", name),
        }
    }
}

impl std::error::Error for ModelError {}

/// Per-vertex attribute named in a model header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribute {
    Pos,
    Color,
    Uv,
}

impl Attribute {
    fn parse(name: &str) -> Result<Self, ModelError> {
        match name {
            "pos" => Ok(Attribute::Pos),
            "color" => Ok(Attribute::Color),
            "uv" => Ok(Attribute::Uv),
            other => Err(ModelError::UnknownAttribute(other.to_string())),
        }
    }
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next_str(&mut self, expected: &'static str) -> Result<&'a str, ModelError> {
        self.inner.next().ok_or(ModelError::UnexpectedEnd { expected })
    }

    fn next_f32(&mut self, expected: &'static str) -> Result<f32, ModelError> {
        let token = self.next_str(expected)?;
        token.parse().map_err(|_| ModelError::InvalidNumber(token.to_string()))
    }

    fn next_usize(&mut self, expected: &'static str) -> Result<usize, ModelError> {
        let token = self.next_str(expected)?;
        token.parse().map_err(|_| ModelError::InvalidNumber(token.to_string()))
    }
}

/// Parse a model from its text form
pub fn load_model_from_str(s: &str) -> Result<Model, ModelError> {
    let mut tokens = Tokens { inner: s.split_whitespace() };

    let triangle_count = tokens.next_usize("triangle count")?;
    let attribute_count = tokens.next_usize("attribute count")?;

    let attributes = (0..attribute_count)
        .map(|_| tokens.next_str("attribute name").and_then(Attribute::parse))
        .collect::<Result<Vec<_>, _>>()?;

    let mut triangles = Vec::with_capacity(triangle_count.min(1 << 16));
    for _ in 0..triangle_count {
        let mut vertices = [Vertex::default(); 3];
        for vertex in &mut vertices {
            for attribute in &attributes {
                match attribute {
                    Attribute::Pos => {
                        vertex.pos = Vec4::new(
                            tokens.next_f32("position")?,
                            tokens.next_f32("position")?,
                            tokens.next_f32("position")?,
                            1.0,
                        );
                    }
                    Attribute::Color => {
                        vertex.color = Vec4::new(
                            tokens.next_f32("color")?,
                            tokens.next_f32("color")?,
                            tokens.next_f32("color")?,
                            tokens.next_f32("color")?,
                        );
                    }
                    Attribute::Uv => {
                        vertex.uv = Vec2::new(tokens.next_f32("uv")?, tokens.next_f32("uv")?);
                    }
                }
            }
        }
        let [a, b, c] = vertices;
        triangles.push(Triangle::new(a, b, c));
    }

    Ok(Model::new(triangles))
}

/// Load a model from a text file
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Model, ModelError> {
    let contents = fs::read_to_string(path)?;
    load_model_from_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Color;

    #[test]
    fn test_pos_color_uv() {
        let src = "1 3 pos color uv\n\
                   0 0 1  255 0 0 255  0 0\n\
                   1 0 1  0 255 0 128  1 0\n\
                   0 1 2  0 0 255 255  0 1\n";
        let model = load_model_from_str(src).unwrap();
        assert_eq!(model.len(), 1);

        let [a, b, c] = model.triangles[0].vertices;
        assert_eq!(a.pos, Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(b.color, Vec4::new(0.0, 255.0, 0.0, 128.0));
        assert_eq!(c.uv, Vec2::new(0.0, 1.0));
        assert_eq!(c.pos.z, 2.0);
    }

    #[test]
    fn test_missing_attributes_default() {
        let model = load_model_from_str("2 1 pos  0 0 0 1 0 0 0 1 0  5 5 5 6 5 5 5 6 5").unwrap();
        assert_eq!(model.len(), 2);

        let v = model.triangles[1].vertices[2];
        assert_eq!(v.pos, Vec4::new(5.0, 6.0, 5.0, 1.0));
        assert_eq!(v.color, Color::WHITE.to_vec4());
        assert_eq!(v.uv, Vec2::ZERO);
    }

    #[test]
    fn test_attribute_order_follows_header() {
        let model = load_model_from_str("1 2 uv pos  0.5 0.25 1 2 3  0 0 4 5 6  1 1 7 8 9").unwrap();
        let v = model.triangles[0].vertices[0];
        assert_eq!(v.uv, Vec2::new(0.5, 0.25));
        assert_eq!(v.pos, Vec4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn test_empty_model() {
        let model = load_model_from_str("0 1 pos").unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_truncated() {
        let err = load_model_from_str("1 1 pos 0 0 0 1 0").unwrap_err();
        assert!(matches!(err, ModelError::UnexpectedEnd { expected: "position" }));

        let err = load_model_from_str("").unwrap_err();
        assert!(matches!(err, ModelError::UnexpectedEnd { expected: "triangle count" }));
    }

    #[test]
    fn test_bad_tokens() {
        let err = load_model_from_str("1 1 normal").unwrap_err();
        assert!(matches!(err, ModelError::UnknownAttribute(ref name) if name == "normal"));

        let err = load_model_from_str("1 1 pos 0 zero 0").unwrap_err();
        assert!(matches!(err, ModelError::InvalidNumber(ref t) if t == "zero"));
        assert_eq!(err.to_string(), "Invalid number: \"zero\"");
    }

    #[test]
    fn test_shipped_models() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        for (name, count) in [("floor.txt", 2), ("triangle.txt", 1), ("crate.txt", 12), ("spike.txt", 6)] {
            let model = load_model(dir.join(name)).unwrap();
            assert_eq!(model.len(), count, "{}", name);
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_model("does/not/exist.txt").unwrap_err();
        assert!(matches!(err, ModelError::IoError(_)));
    }
}
