//! Scene façade used by the render loop.
//!
//! A scene collects primitives, is built once, and is then queried any
//! number of times. Adding to or rebuilding a built scene requires a
//! [`Scene::clear`] first, and querying an unbuilt scene is an error.

use crate::bvh::Bvh;
use crate::error::{AccelError, Result};
use crate::list::PrimitiveList;
use crate::primitive::{Hittable, Primitive};
use crate::settings::BvhSettings;
use crate::{HitRecord, Ray};

/// Capability set shared by the interchangeable scene backends.
pub trait Scene {
    /// Move a primitive into the scene. Fails once the scene is built.
    fn add(&mut self, primitive: Primitive) -> Result<()>;

    /// Prepare the collected primitives for querying. Fails if already built.
    fn build(&mut self) -> Result<()>;

    /// Drop every primitive and derived structure, returning to collection.
    fn clear(&mut self);

    /// Nearest hit with `t` strictly inside `(t_min, t_max)`.
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Result<Option<HitRecord>>;

    /// Number of primitives held.
    fn len(&self) -> usize;

    /// `true` if no primitives are held.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` between a successful `build` and the next `clear`.
    fn is_built(&self) -> bool;
}

#[derive(Debug, Clone)]
enum BvhState {
    Collecting(Vec<Primitive>),
    Built(Bvh),
}

/// Scene backed by a [`Bvh`].
#[derive(Debug, Clone)]
pub struct BvhScene {
    settings: BvhSettings,
    state: BvhState,
}

impl BvhScene {
    /// Empty scene with default build settings.
    pub fn new() -> Self {
        Self {
            settings: BvhSettings::default(),
            state: BvhState::Collecting(Vec::new()),
        }
    }

    /// Empty scene with explicit build settings.
    pub fn with_settings(settings: BvhSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            state: BvhState::Collecting(Vec::new()),
        })
    }

    /// Settings used by [`Scene::build`].
    pub fn settings(&self) -> &BvhSettings {
        &self.settings
    }

    /// The built hierarchy, if any.
    pub fn bvh(&self) -> Option<&Bvh> {
        match &self.state {
            BvhState::Built(bvh) => Some(bvh),
            BvhState::Collecting(_) => None,
        }
    }
}

impl Default for BvhScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for BvhScene {
    fn add(&mut self, primitive: Primitive) -> Result<()> {
        match &mut self.state {
            BvhState::Collecting(primitives) => {
                primitives.push(primitive);
                Ok(())
            }
            BvhState::Built(_) => {
                log::warn!("rejected add on a built scene");
                Err(AccelError::AlreadyBuilt)
            }
        }
    }

    fn build(&mut self) -> Result<()> {
        let primitives = match &mut self.state {
            BvhState::Collecting(primitives) => std::mem::take(primitives),
            BvhState::Built(_) => {
                log::warn!("rejected rebuild of a built scene");
                return Err(AccelError::AlreadyBuilt);
            }
        };
        // `settings` is validated on construction
        self.state = BvhState::Built(Bvh::build_inner(primitives, &self.settings));
        Ok(())
    }

    fn clear(&mut self) {
        log::trace!("clearing scene with {} primitives", self.len());
        self.state = BvhState::Collecting(Vec::new());
    }

    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Result<Option<HitRecord>> {
        match &self.state {
            BvhState::Built(bvh) => Ok(bvh.trace_closest(ray, t_min, t_max)),
            BvhState::Collecting(_) => Err(AccelError::NotBuilt),
        }
    }

    fn len(&self) -> usize {
        match &self.state {
            BvhState::Collecting(primitives) => primitives.len(),
            BvhState::Built(bvh) => bvh.len(),
        }
    }

    fn is_built(&self) -> bool {
        matches!(self.state, BvhState::Built(_))
    }
}

/// Scene backed by a linear scan over a [`PrimitiveList`].
///
/// Building does no work, but the same lifecycle rules as [`BvhScene`]
/// apply so the two backends are interchangeable.
#[derive(Debug, Clone, Default)]
pub struct ListScene {
    list: PrimitiveList,
    built: bool,
}

impl ListScene {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scene for ListScene {
    fn add(&mut self, primitive: Primitive) -> Result<()> {
        if self.built {
            log::warn!("rejected add on a built scene");
            return Err(AccelError::AlreadyBuilt);
        }
        self.list.push(primitive);
        Ok(())
    }

    fn build(&mut self) -> Result<()> {
        if self.built {
            log::warn!("rejected rebuild of a built scene");
            return Err(AccelError::AlreadyBuilt);
        }
        self.built = true;
        Ok(())
    }

    fn clear(&mut self) {
        log::trace!("clearing scene with {} primitives", self.list.len());
        self.list.clear();
        self.built = false;
    }

    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Result<Option<HitRecord>> {
        if !self.built {
            return Err(AccelError::NotBuilt);
        }
        Ok(self.list.hit(ray, t_min, t_max))
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn is_built(&self) -> bool {
        self.built
    }
}
