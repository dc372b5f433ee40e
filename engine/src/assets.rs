use std::collections::HashMap;

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to a registered model, reused across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelVertex {
    pub position: Vec2,
    pub tex_coords: Vec2,
    pub color: [f32; 4],
}

impl ModelVertex {
    /// Untextured vertex; the texture coordinate stays at the origin.
    pub fn colored(position: Vec2, color: [f32; 4]) -> Self {
        Self {
            position,
            tex_coords: Vec2::ZERO,
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl Model {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("model {name:?} has no vertices")]
    EmptyModel { name: String },
    #[error("model {name:?} has {count} indices, which is not a multiple of 3")]
    RaggedIndices { name: String, count: usize },
    #[error("model {name:?} index {index} is out of bounds ({vertex_count} vertices)")]
    IndexOutOfBounds {
        name: String,
        index: u32,
        vertex_count: usize,
    },
    #[error("model {name:?} is already registered")]
    DuplicateModel { name: String },
}

/// Registry for the mesh models units and bullets draw with.
///
/// Models are registered by name exactly once and shared by every instance
/// that draws them; [`AssetLibrary::get_or_register`] makes the "build on
/// first use" pattern explicit.
#[derive(Debug, Default)]
pub struct AssetLibrary {
    models: Vec<Model>,
    by_name: HashMap<String, ModelId>,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_model(
        &mut self,
        name: &str,
        vertices: Vec<ModelVertex>,
        indices: Vec<u32>,
    ) -> Result<ModelId, AssetError> {
        if self.by_name.contains_key(name) {
            return Err(AssetError::DuplicateModel {
                name: name.to_string(),
            });
        }
        if vertices.is_empty() {
            return Err(AssetError::EmptyModel {
                name: name.to_string(),
            });
        }
        if indices.len() % 3 != 0 {
            return Err(AssetError::RaggedIndices {
                name: name.to_string(),
                count: indices.len(),
            });
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(AssetError::IndexOutOfBounds {
                name: name.to_string(),
                index,
                vertex_count: vertices.len(),
            });
        }

        let id = ModelId(self.models.len() as u32);
        self.models.push(Model { vertices, indices });
        self.by_name.insert(name.to_string(), id);
        debug!("registered model {name:?} as {id:?}");
        Ok(id)
    }

    /// Returns the handle for `name`, building and registering the model on
    /// the first call. Later calls never run the builder again.
    pub fn get_or_register<F>(&mut self, name: &str, build: F) -> Result<ModelId, AssetError>
    where
        F: FnOnce() -> (Vec<ModelVertex>, Vec<u32>),
    {
        if let Some(&id) = self.by_name.get(name) {
            return Ok(id);
        }
        let (vertices, indices) = build();
        self.register_model(name, vertices, indices)
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id.0 as usize)
    }

    pub fn lookup(&self, name: &str) -> Option<ModelId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> (Vec<ModelVertex>, Vec<u32>) {
        let white = [1.0, 1.0, 1.0, 1.0];
        let vertices = vec![
            ModelVertex::colored(Vec2::new(-0.5, -0.5), white),
            ModelVertex::colored(Vec2::new(0.5, -0.5), white),
            ModelVertex::colored(Vec2::new(0.5, 0.5), white),
            ModelVertex::colored(Vec2::new(-0.5, 0.5), white),
        ];
        (vertices, vec![0, 1, 2, 0, 2, 3])
    }

    #[test]
    fn register_and_look_up_a_model() {
        let mut assets = AssetLibrary::new();
        let (vertices, indices) = quad();
        let id = assets.register_model("quad", vertices, indices).unwrap();
        assert_eq!(assets.lookup("quad"), Some(id));
        assert_eq!(assets.model(id).unwrap().triangle_count(), 2);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut assets = AssetLibrary::new();
        let (vertices, indices) = quad();
        assets
            .register_model("quad", vertices.clone(), indices.clone())
            .unwrap();
        let err = assets.register_model("quad", vertices, indices).unwrap_err();
        assert!(matches!(err, AssetError::DuplicateModel { .. }));
    }

    #[test]
    fn out_of_bounds_indices_are_rejected() {
        let mut assets = AssetLibrary::new();
        let (vertices, _) = quad();
        let err = assets
            .register_model("broken", vertices, vec![0, 1, 9])
            .unwrap_err();
        assert!(matches!(err, AssetError::IndexOutOfBounds { index: 9, .. }));
    }

    #[test]
    fn ragged_index_lists_are_rejected() {
        let mut assets = AssetLibrary::new();
        let (vertices, _) = quad();
        let err = assets
            .register_model("broken", vertices, vec![0, 1])
            .unwrap_err();
        assert!(matches!(err, AssetError::RaggedIndices { count: 2, .. }));
    }

    #[test]
    fn get_or_register_builds_exactly_once() {
        let mut assets = AssetLibrary::new();
        let mut builds = 0;
        let mut build = |builds: &mut u32| {
            *builds += 1;
            quad()
        };

        let first = assets.get_or_register("quad", || build(&mut builds)).unwrap();
        let second = assets.get_or_register("quad", || build(&mut builds)).unwrap();

        assert_eq!(first, second);
        assert_eq!(builds, 1, "builder must only run on first registration");
        assert_eq!(assets.len(), 1);
    }
}
