use std::fmt;

use lectern_common::BlockCell;
use lectern_logger::{LogSeverity, Reporter};
use lectern_nbt::Compound;

use crate::compat::{ArchitectureCraftHook, CarpentersBlocksHook};
use crate::error::TransformError;
use crate::rotation::AxisRotation;

/// Rewrites the orientation-dependent fields of one kind of tile entity.
pub trait BlockTransformHook {
    /// The tile-entity `id` this hook handles.
    fn tile_entity_id(&self) -> &str;

    /// Returns the rotated tree, or `None` when the tree needs no change.
    fn transform(
        &self,
        nbt: &Compound,
        rotation: AxisRotation,
        reporter: &dyn Reporter,
    ) -> Result<Option<Compound>, TransformError>;
}

/// Hooks run in registration order, each seeing the previous hook's output.
#[derive(Default)]
pub struct HookChain {
    hooks: Vec<Box<dyn BlockTransformHook>>,
}

impl HookChain {
    pub fn new() -> Self {
        HookChain::default()
    }

    /// A chain holding the bundled mod compatibility hooks.
    pub fn with_bundled_hooks() -> Self {
        let mut chain = HookChain::new();
        chain
            .register(CarpentersBlocksHook)
            .register(ArchitectureCraftHook);
        chain
    }

    pub fn register(&mut self, hook: impl BlockTransformHook + 'static) -> &mut Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn apply(&self, cell: &BlockCell, rotation: AxisRotation, reporter: &dyn Reporter) -> BlockCell {
        let mut rotated = cell.clone();
        self.apply_in_place(&mut rotated, rotation, reporter);
        rotated
    }

    /// Rotates `cell` in place. If any hook fails, the failure is reported and
    /// the cell is restored to its state before the chain ran.
    pub fn apply_in_place(&self, cell: &mut BlockCell, rotation: AxisRotation, reporter: &dyn Reporter) {
        if rotation.is_identity() || cell.nbt.is_none() {
            return;
        }
        let original = cell.nbt.clone();
        for hook in &self.hooks {
            let Some(nbt) = cell.nbt.as_ref() else {
                return;
            };
            if nbt.get_str("id") != Some(hook.tile_entity_id()) {
                continue;
            }
            match hook.transform(nbt, rotation, reporter) {
                Ok(Some(rotated)) => {
                    log::trace!("{} rotated by {}", hook.tile_entity_id(), rotation);
                    cell.nbt = Some(rotated);
                }
                Ok(None) => {}
                Err(err) => {
                    reporter.report(
                        LogSeverity::Warning,
                        &format!(
                            "Could not rotate {} by {}: {}",
                            hook.tile_entity_id(),
                            rotation,
                            err
                        ),
                    );
                    cell.nbt = original;
                    return;
                }
            }
        }
    }
}

impl fmt::Debug for HookChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|hook| hook.tile_entity_id()))
            .finish()
    }
}
