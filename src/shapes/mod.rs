//! Particle shape registry
//!
//! Owned by the editor session and passed by reference to whatever needs
//! shape lookups. Texture loading happens elsewhere; a shape here is just an
//! id, a display name and an asset path.

use serde::{Deserialize, Serialize};

/// Index into a [`ShapeRegistry`]
pub type ShapeId = u16;

/// Shapes shipped with the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinShape {
    Disk,
    Rice,
    Star,
    Spark,
    Flower,
}

impl BuiltinShape {
    pub const ALL: [BuiltinShape; 5] = [
        BuiltinShape::Disk,
        BuiltinShape::Rice,
        BuiltinShape::Star,
        BuiltinShape::Spark,
        BuiltinShape::Flower,
    ];

    pub fn id(self) -> ShapeId {
        self as ShapeId
    }

    fn file_stem(self) -> &'static str {
        match self {
            BuiltinShape::Disk => "disk",
            BuiltinShape::Rice => "rice",
            BuiltinShape::Star => "star",
            BuiltinShape::Spark => "spark",
            BuiltinShape::Flower => "flower",
        }
    }
}

/// A registered particle shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Builtin(BuiltinShape),
    /// User image registered by path
    Custom { path: String },
}

impl Shape {
    pub fn asset_path(&self) -> String {
        match self {
            Shape::Builtin(builtin) => format!("../assets/shapes/{}.png", builtin.file_stem()),
            Shape::Custom { path } => path.clone(),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Shape::Builtin(builtin) => format!("{:?}", builtin),
            Shape::Custom { path } => std::path::Path::new(path)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(path.as_str())
                .to_string(),
        }
    }
}

const DEFAULT_SHAPE: Shape = Shape::Builtin(BuiltinShape::Disk);

/// Session-scoped list of shapes; ids are positions in registration order
#[derive(Debug, Clone)]
pub struct ShapeRegistry {
    shapes: Vec<Shape>,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeRegistry {
    /// Registry holding only the built-in shapes
    pub fn new() -> Self {
        Self {
            shapes: BuiltinShape::ALL.iter().copied().map(Shape::Builtin).collect(),
        }
    }

    /// Register a custom shape image, returning the existing id if the path
    /// is already known
    pub fn register_custom(&mut self, path: impl Into<String>) -> ShapeId {
        let path = path.into();

        if let Some(existing) = self
            .shapes
            .iter()
            .position(|shape| matches!(shape, Shape::Custom { path: p } if *p == path))
        {
            return existing as ShapeId;
        }

        let id = self.shapes.len() as ShapeId;
        log::debug!("Registered custom shape {} as id {}", path, id);
        self.shapes.push(Shape::Custom { path });
        id
    }

    /// Shape for `id`, falling back to the default disk
    pub fn shape(&self, id: ShapeId) -> &Shape {
        self.shapes.get(id as usize).unwrap_or(&DEFAULT_SHAPE)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        (id as usize) < self.shapes.len()
    }

    /// Map unknown ids to the default disk
    pub fn sanitize(&self, id: ShapeId) -> ShapeId {
        if self.contains(id) {
            id
        } else {
            BuiltinShape::Disk.id()
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter().enumerate().map(|(i, s)| (i as ShapeId, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids() {
        let registry = ShapeRegistry::new();
        assert_eq!(registry.len(), 5);
        assert_eq!(BuiltinShape::Star.id(), 2);
        assert_eq!(registry.shape(4), &Shape::Builtin(BuiltinShape::Flower));
        assert_eq!(registry.shape(1).asset_path(), "../assets/shapes/rice.png");
    }

    #[test]
    fn test_register_custom_dedupes() {
        let mut registry = ShapeRegistry::new();
        let a = registry.register_custom("textures/heart.png");
        let b = registry.register_custom("textures/heart.png");
        let c = registry.register_custom("textures/moon.png");

        assert_eq!(a, 5);
        assert_eq!(a, b);
        assert_eq!(c, 6);
        assert_eq!(registry.shape(a).display_name(), "heart");
    }

    #[test]
    fn test_unknown_ids_fall_back() {
        let registry = ShapeRegistry::new();
        assert!(!registry.contains(42));
        assert_eq!(registry.sanitize(42), 0);
        assert_eq!(registry.sanitize(3), 3);
        assert_eq!(registry.shape(42), &Shape::Builtin(BuiltinShape::Disk));
    }
}
