//! Mine placement by recursive rectangle halving.

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::antiquity::ChunkDescription;
use crate::common::CleaningError;
use crate::config::MineConfig;
use crate::events::Emitter;
use crate::geometry::{Rect, Vec2};

/// Split `root` into exactly `count` non-overlapping regions.
///
/// A random rectangle from the working set is halved along its longer axis
/// and both halves are staged. When the working set runs dry the staged
/// halves become the new working set, which keeps region sizes within a
/// factor of two of each other.
pub fn subdivide<R: Rng>(root: Rect, count: usize, rng: &mut R) -> Result<Vec<Rect>, CleaningError> {
    if count == 0 {
        return Err(CleaningError::InvalidMineCount);
    }
    if !root.is_well_formed() {
        return Err(CleaningError::InvalidRect {
            width: root.width,
            height: root.height,
        });
    }
    let mut large = vec![root];
    let mut staged = Vec::new();
    for _ in 1..count {
        let rect = large.remove(rng.random_range(0..large.len()));
        let (a, b) = rect.halve();
        staged.push(a);
        staged.push(b);
        if large.is_empty() {
            large.append(&mut staged);
        }
    }
    staged.append(&mut large);
    Ok(staged)
}

/// The smallest region `subdivide` can produce for `count`.
///
/// Halving is deterministic per depth and the deepest regions sit at
/// depth `ceil(log2(count))`, so this is the root halved that many times.
pub fn smallest_region(root: Rect, count: usize) -> Rect {
    let depth = usize::BITS - count.saturating_sub(1).leading_zeros();
    (0..depth).fold(root, |rect, _| rect.halve().0)
}

/// Uniform point in `rect` at least `padding` away from every edge.
pub fn random_point_in_rect<R: Rng>(
    rect: &Rect,
    padding: Vec2,
    rng: &mut R,
) -> Result<Vec2, CleaningError> {
    let (x_lo, x_hi) = (rect.x + padding.x, rect.x_max() - padding.x);
    let (y_lo, y_hi) = (rect.y + padding.y, rect.y_max() - padding.y);
    // Negated so NaN padding or a NaN rect is rejected too.
    let bounds_ok = [x_lo, x_hi, y_lo, y_hi].iter().all(|v| v.is_finite());
    if !(bounds_ok && padding.x >= 0.0 && padding.y >= 0.0 && x_lo <= x_hi && y_lo <= y_hi) {
        return Err(CleaningError::PaddingTooLarge {
            width: rect.width,
            height: rect.height,
            padding_x: padding.x,
            padding_y: padding.y,
        });
    }
    Ok(Vec2::new(
        rng.random_range(x_lo..=x_hi),
        rng.random_range(y_lo..=y_hi),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MineStatus {
    Armed,
    Defused,
    Detonated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mine {
    pub id: usize,
    pub name: String,
    pub region: Rect,
    pub position: Vec2,
    /// Chunk layer the mine is buried in.
    pub layer: u32,
    pub status: MineStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MineEvent {
    Defused(usize),
    Detonated(usize),
}

/// Owns the mines buried in the current rock.
pub struct MineManager {
    config: MineConfig,
    mines: Vec<Mine>,
    events: Emitter<MineEvent>,
}

impl MineManager {
    pub fn new(config: MineConfig) -> Self {
        Self {
            config,
            mines: Vec::new(),
            events: Emitter::new(),
        }
    }

    /// Replace the current mines with `config.count` fresh ones around `centre`.
    pub fn initialise<R: Rng>(
        &mut self,
        centre: Vec2,
        chunks: &ChunkDescription,
        rng: &mut R,
    ) -> Result<&[Mine], CleaningError> {
        if self.config.min_layer >= chunks.layers {
            return Err(CleaningError::InvalidLayerRange {
                min_layer: self.config.min_layer,
                layers: chunks.layers,
            });
        }
        let root = Rect::centred(centre, self.config.rect_size);
        let regions = subdivide(root, self.config.count, rng)?;
        let padding = Vec2::new(self.config.mine_size.x / 2.0, self.config.mine_size.y / 2.0);

        let mut mines = Vec::with_capacity(regions.len());
        for (i, region) in regions.into_iter().enumerate() {
            let position = random_point_in_rect(&region, padding, rng)?;
            mines.push(Mine {
                id: i,
                name: format!("Mine {}", i + 1),
                region,
                position,
                layer: rng.random_range(self.config.min_layer..chunks.layers),
                status: MineStatus::Armed,
            });
        }
        debug!("placed {} mines in {}", mines.len(), chunks.name);
        self.mines = mines;
        Ok(&self.mines)
    }

    pub fn mines(&self) -> &[Mine] {
        &self.mines
    }

    pub fn armed(&self) -> impl Iterator<Item = &Mine> {
        self.mines.iter().filter(|m| m.status == MineStatus::Armed)
    }

    pub fn defuse(&mut self, id: usize) -> Result<(), CleaningError> {
        self.resolve(id, MineStatus::Defused)?;
        self.events.emit(MineEvent::Defused(id));
        Ok(())
    }

    pub fn detonate(&mut self, id: usize) -> Result<(), CleaningError> {
        self.resolve(id, MineStatus::Detonated)?;
        self.events.emit(MineEvent::Detonated(id));
        Ok(())
    }

    fn resolve(&mut self, id: usize, status: MineStatus) -> Result<(), CleaningError> {
        let mine = self
            .mines
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(CleaningError::MineNotFound(id))?;
        if mine.status != MineStatus::Armed {
            return Err(CleaningError::MineAlreadyResolved(id));
        }
        mine.status = status;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.mines.clear();
    }

    pub fn config(&self) -> &MineConfig {
        &self.config
    }

    pub fn events_mut(&mut self) -> &mut Emitter<MineEvent> {
        &mut self.events
    }
}
