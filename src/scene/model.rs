//! Model loading and saving
//!
//! Two on-disk formats:
//! - Plain text: `<triangles> <attr count> <attr names...>` followed by
//!   the listed attributes for every vertex of every triangle
//! - RON: the serialized `Model`

use std::fs;
use std::path::Path;
use std::str::FromStr;

use glam::{Vec2, Vec4};

use crate::error::{Error, Result};
use crate::rasterizer::{Model, Triangle, Vertex};

/// Per-vertex attribute named in a text model header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// x y z
    Pos,
    /// r g b a, 0..255
    Color,
    /// u v
    Uv,
}

impl FromStr for Attribute {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pos" => Ok(Attribute::Pos),
            "color" => Ok(Attribute::Color),
            "uv" => Ok(Attribute::Uv),
            other => Err(Error::UnknownAttribute(other.to_string())),
        }
    }
}

/// Whitespace-separated tokens that remember their line
struct Tokens<'a> {
    iter: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        let iter = source
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |tok| (i + 1, tok)));
        Self {
            iter: Box::new(iter),
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    fn word(&mut self, what: &str) -> Result<&'a str> {
        match self.iter.next() {
            Some((line, tok)) => {
                self.line = line;
                Ok(tok)
            }
            None => Err(self.error(format!("unexpected end of file, expected {what}"))),
        }
    }

    fn parse<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let tok = self.word(what)?;
        tok.parse()
            .map_err(|_| self.error(format!("expected {what}, found {tok:?}")))
    }

    fn floats<const N: usize>(&mut self, what: &str) -> Result<[f32; N]> {
        let mut out = [0.0; N];
        for value in &mut out {
            *value = self.parse(what)?;
        }
        Ok(out)
    }
}

/// Parse a model from the plain text format
pub fn parse_model(source: &str) -> Result<Model> {
    let mut tokens = Tokens::new(source);

    let triangle_count: usize = tokens.parse("triangle count")?;
    let attr_count: usize = tokens.parse("attribute count")?;

    let mut format = Vec::with_capacity(attr_count);
    for _ in 0..attr_count {
        format.push(tokens.word("attribute name")?.parse::<Attribute>()?);
    }

    if triangle_count == 0 {
        return Err(Error::EmptyModel);
    }

    let mut triangles = Vec::with_capacity(triangle_count);
    for _ in 0..triangle_count {
        let mut vertices = [Vertex::default(); 3];
        for vertex in &mut vertices {
            for attr in &format {
                match attr {
                    Attribute::Pos => {
                        let [x, y, z] = tokens.floats("position")?;
                        vertex.pos = Vec4::new(x, y, z, 1.0);
                    }
                    Attribute::Color => {
                        vertex.color = Vec4::from_array(tokens.floats("color")?);
                    }
                    Attribute::Uv => {
                        vertex.uv = Vec2::from_array(tokens.floats("uv")?);
                    }
                }
            }
        }
        triangles.push(Triangle { vertices });
    }

    if tokens.iter.next().is_some() {
        tracing::warn!("ignoring trailing data after {} triangles", triangle_count);
    }

    Ok(Model::new(triangles))
}

/// Load a model from a RON string
pub fn load_model_from_str(s: &str) -> Result<Model> {
    let model: Model = ron::from_str(s)?;
    if model.is_empty() {
        return Err(Error::EmptyModel);
    }
    Ok(model)
}

/// Load a model, picking the format from the extension (`.ron` or text)
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let is_ron = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("ron"))
        .unwrap_or(false);

    let model = if is_ron {
        load_model_from_str(&contents)?
    } else {
        parse_model(&contents)?
    };

    tracing::info!("loaded model {} ({} triangles)", path.display(), model.len());
    Ok(model)
}

/// Save a model as RON
pub fn save_model<P: AsRef<Path>>(model: &Model, path: P) -> Result<()> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(model, config)?;
    fs::write(path, contents)?;
    Ok(())
}
