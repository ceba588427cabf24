// src/frames/milestones.rs
use super::optional_record_id;
use crate::api::TestRailApi;
use crate::error::TestRailError;
use crate::model::{Record, Table};
use crate::types::MilestoneId;
use serde_json::Value;
use std::collections::HashSet;

/// Milestones and their sub-milestones.
pub struct Milestones<'a> {
    api: &'a dyn TestRailApi,
}

impl<'a> Milestones<'a> {
    pub(super) fn new(api: &'a dyn TestRailApi) -> Self {
        Self { api }
    }

    /// Every descendant of a milestone, depth first, one row each.
    ///
    /// Each sub-milestone is fetched once to discover its own children.
    pub fn sub_milestones(&self, milestone: MilestoneId) -> Result<Table, TestRailError> {
        let mut visited = HashSet::from([milestone]);
        let mut collected = Vec::new();
        self.collect_children(milestone, &mut visited, &mut collected)?;
        Ok(Table::from_records(collected))
    }

    fn collect_children(
        &self,
        milestone: MilestoneId,
        visited: &mut HashSet<MilestoneId>,
        collected: &mut Vec<Record>,
    ) -> Result<(), TestRailError> {
        let record = self.api.get_milestone(milestone)?;
        let children = match record.get("milestones") {
            Some(Value::Array(children)) => children.clone(),
            _ => Vec::new(),
        };

        for child in children {
            let Ok(child) = serde_json::from_value::<Record>(child) else {
                continue;
            };
            let child_id: Option<MilestoneId> = optional_record_id(&child, "id");

            match child_id {
                Some(id) if !visited.insert(id) => {
                    log::debug!("Milestone {} already visited", id);
                }
                Some(id) => {
                    collected.push(child);
                    self.collect_children(id, visited, collected)?;
                }
                None => collected.push(child),
            }
        }
        Ok(())
    }
}
