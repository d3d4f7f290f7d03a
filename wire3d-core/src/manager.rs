/// Keyed registry of models and their motions
use std::collections::HashMap;

use nalgebra::Vector3;
use tracing::debug;

use crate::error::{Error, Result};
use crate::linalg::{oriented_basis, Basis};
use crate::model::{Color, Model, ModelSource};
use crate::motion::MotionMap;

/// Controls a set of models and drives them over time.
///
/// Every motion key references a registered model; removing a model also
/// removes its motion.
#[derive(Default)]
pub struct ModelManager {
    models: HashMap<String, Model>,
    motions: HashMap<String, MotionMap>,
}

impl ModelManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new model under a unique key.
    pub fn add_model(&mut self, key: &str, source: ModelSource) -> Result<()> {
        if self.models.contains_key(key) {
            return Err(Error::DuplicateKey(key.to_string()));
        }
        let model = Model::from_source(source)?;
        debug!(key, vertices = model.vertices().len(), "registered model");
        self.models.insert(key.to_string(), model);
        Ok(())
    }

    /// Remove a model, discarding any motion assigned to it.
    pub fn remove_model(&mut self, key: &str) -> Result<Model> {
        let model = self
            .models
            .remove(key)
            .ok_or_else(|| Error::UnknownKey(key.to_string()))?;
        self.motions.remove(key);
        Ok(model)
    }

    /// Assign motion to a model, replacing any existing motion for the key.
    /// Motions never stack. The key must reference a registered model.
    pub fn set_motion(&mut self, key: &str, motion: MotionMap) -> Result<()> {
        if !self.models.contains_key(key) {
            return Err(Error::UnknownKey(key.to_string()));
        }
        self.motions.insert(key.to_string(), motion);
        Ok(())
    }

    pub fn remove_motion(&mut self, key: &str) -> Result<()> {
        self.motions
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| Error::UnknownKey(key.to_string()))
    }

    pub fn has_motion(&self, key: &str) -> bool {
        self.motions.contains_key(key)
    }

    /// Advance every model with a motion to the given time. A present
    /// position or orientation component is written to the model; an absent
    /// component leaves the corresponding state untouched. Iteration order
    /// across keys carries no meaning.
    pub fn advance(&mut self, time: f64) -> Result<()> {
        for (key, motion) in self.motions.iter_mut() {
            let (position, orientation) = motion.get_state(time);
            let model = self
                .models
                .get_mut(key)
                .ok_or_else(|| Error::UnknownKey(key.clone()))?;
            if let Some(position) = position {
                model.set_position(position)?;
            }
            if let Some([yaw, pitch, roll]) = orientation {
                model.set_basis(oriented_basis(yaw, pitch, roll))?;
            }
        }
        Ok(())
    }

    /// Translate a model in the world coordinate system.
    pub fn translate(&mut self, key: &str, translation: Vector3<f64>) -> Result<()> {
        let model = self.model_mut(key)?;
        let position = model.position() + translation;
        model.set_position(position)
    }

    /// Orient a model with respect to the world basis.
    pub fn orient(&mut self, key: &str, yaw: f64, pitch: f64, roll: f64) -> Result<()> {
        self.model_mut(key)?
            .set_basis(oriented_basis(yaw, pitch, roll))
    }

    /// Scale a model about its own origin; its position, orientation, and
    /// the world scale are unchanged.
    pub fn scale(&mut self, key: &str, factor: f64) -> Result<()> {
        self.model_mut(key)?.scale(factor);
        Ok(())
    }

    /// Re-express a model's vertices under a new local coordinate
    /// convention, e.g. to correct a mesh authored with flipped axes.
    pub fn change_local_basis(&mut self, key: &str, basis: Basis) -> Result<()> {
        self.model_mut(key)?.change_local_basis(basis)
    }

    pub fn position(&self, key: &str) -> Result<Vector3<f64>> {
        Ok(self.model(key)?.position())
    }

    pub fn set_position(&mut self, key: &str, position: Vector3<f64>) -> Result<()> {
        self.model_mut(key)?.set_position(position)
    }

    pub fn basis(&self, key: &str) -> Result<Basis> {
        Ok(self.model(key)?.basis())
    }

    pub fn set_basis(&mut self, key: &str, basis: Basis) -> Result<()> {
        self.model_mut(key)?.set_basis(basis)
    }

    pub fn color(&self, key: &str) -> Result<Color> {
        Ok(self.model(key)?.color())
    }

    pub fn set_color(&mut self, key: &str, color: Color) -> Result<()> {
        self.model_mut(key)?.set_color(color);
        Ok(())
    }

    /// A model's vertices, in local or world coordinates.
    pub fn vertices(&self, key: &str, world: bool) -> Result<Vec<Vector3<f64>>> {
        let model = self.model(key)?;
        Ok(if world {
            model.world_vertices()
        } else {
            model.vertices()
        })
    }

    /// A model's faces as vertex index tuples; meaningful only together
    /// with the corresponding vertex list.
    pub fn faces(&self, key: &str) -> Result<&[Vec<usize>]> {
        Ok(self.model(key)?.faces())
    }

    /// Keys of the registered models.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    fn model(&self, key: &str) -> Result<&Model> {
        self.models
            .get(key)
            .ok_or_else(|| Error::UnknownKey(key.to_string()))
    }

    fn model_mut(&mut self, key: &str) -> Result<&mut Model> {
        self.models
            .get_mut(key)
            .ok_or_else(|| Error::UnknownKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::TrackSource;

    fn box_source() -> ModelSource {
        ModelSource::Vertices {
            vertices: vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
                Vector3::new(0.0, 0.0, 1.0),
            ],
            faces: Some(vec![vec![0, 1, 2], vec![0, 1, 3]]),
        }
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut manager = ModelManager::new();
        manager.add_model("cube1", box_source()).unwrap();
        assert!(matches!(
            manager.add_model("cube1", box_source()),
            Err(Error::DuplicateKey(_))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut manager = ModelManager::new();
        assert!(matches!(
            manager.position("ghost"),
            Err(Error::UnknownKey(_))
        ));
        assert!(matches!(
            manager.set_motion("ghost", MotionMap::new(None, None)),
            Err(Error::UnknownKey(_))
        ));
    }

    #[test]
    fn removing_a_model_removes_its_motion() {
        let mut manager = ModelManager::new();
        manager.add_model("cube1", box_source()).unwrap();
        manager
            .set_motion(
                "cube1",
                MotionMap::positions(TrackSource::continuous(|t| [t, 0.0, 0.0])),
            )
            .unwrap();
        manager.remove_model("cube1").unwrap();
        assert!(!manager.has_motion("cube1"));
        assert!(matches!(
            manager.remove_motion("cube1"),
            Err(Error::UnknownKey(_))
        ));
    }

    #[test]
    fn advance_without_motion_leaves_models_untouched() {
        let mut manager = ModelManager::new();
        manager.add_model("cube1", box_source()).unwrap();
        let position = manager.position("cube1").unwrap();
        let basis = manager.basis("cube1").unwrap();
        manager.advance(42.0).unwrap();
        assert_eq!(manager.position("cube1").unwrap(), position);
        assert_eq!(manager.basis("cube1").unwrap(), basis);
    }

    #[test]
    fn advance_applies_position_and_orientation_independently() {
        let mut manager = ModelManager::new();
        manager.add_model("cube1", box_source()).unwrap();
        manager
            .orient("cube1", 0.3, 0.0, 0.0)
            .unwrap();
        manager
            .set_motion(
                "cube1",
                MotionMap::positions(TrackSource::Sampled {
                    times: vec![0.0, 10.0, 20.0],
                    values: vec![[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [5.0, 5.0, 0.0]],
                }),
            )
            .unwrap();
        let basis = manager.basis("cube1").unwrap();

        manager.advance(15.0).unwrap();
        assert_eq!(
            manager.position("cube1").unwrap(),
            Vector3::new(5.0, 0.0, 0.0)
        );
        // No orientation track: the basis set earlier survives.
        assert_eq!(manager.basis("cube1").unwrap(), basis);
    }

    #[test]
    fn replacing_a_motion_discards_the_previous_one() {
        let mut manager = ModelManager::new();
        manager.add_model("cube1", box_source()).unwrap();
        manager
            .set_motion(
                "cube1",
                MotionMap::positions(TrackSource::continuous(|_| [1.0, 0.0, 0.0])),
            )
            .unwrap();
        manager
            .set_motion(
                "cube1",
                MotionMap::positions(TrackSource::continuous(|_| [2.0, 0.0, 0.0])),
            )
            .unwrap();
        manager.advance(0.0).unwrap();
        assert_eq!(
            manager.position("cube1").unwrap(),
            Vector3::new(2.0, 0.0, 0.0)
        );
    }

    #[test]
    fn translate_offsets_the_current_position() {
        let mut manager = ModelManager::new();
        manager.add_model("cube1", box_source()).unwrap();
        manager
            .translate("cube1", Vector3::new(1.0, 2.0, 3.0))
            .unwrap();
        manager
            .translate("cube1", Vector3::new(1.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(
            manager.position("cube1").unwrap(),
            Vector3::new(2.0, 2.0, 3.0)
        );
    }
}
