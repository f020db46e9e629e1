// src/pipeline.rs
use crate::stage::Stage;
use smallvec::SmallVec;
use std::{borrow::Cow, sync::Arc};
use tracing::trace;

/// Ordered list of stages run back to back over one text value.
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: SmallVec<[Arc<dyn Stage>; 4]>,
}

impl Pipeline {
    pub fn new(stages: impl IntoIterator<Item = Arc<dyn Stage>>) -> Self {
        Self {
            stages: stages.into_iter().collect(),
        }
    }

    pub fn push<T: Stage + 'static>(&mut self, stage: T) {
        self.push_shared(Arc::new(stage));
    }

    pub fn push_shared(&mut self, stage: Arc<dyn Stage>) {
        self.stages.push(stage);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|stage| stage.name())
    }

    pub fn process<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        let mut current = text;

        for stage in &self.stages {
            // Fast path: skip if no mutation needed
            if !stage.needs_apply(&current) {
                continue;
            }

            trace!(stage = stage.name(), "applying stage");
            current = stage.apply(current);
        }

        current
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.stage_names()).finish()
    }
}
