//! Cohort partitioning by group key.

use surv_ingest::SubjectTable;
use surv_model::{Group, GroupKey, GroupingKey};

/// Subjects split into groups, in first-occurrence order of their keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub groups: Vec<Group>,
}

impl Partition {
    pub fn keys(&self) -> Vec<&GroupKey> {
        self.groups.iter().map(|group| &group.key).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Splits the subjects of `table` by its grouping.
///
/// Keys keep the order in which they first appear; subjects keep input order
/// and their row ids. Without a grouping column all subjects form the single
/// implicit group.
pub fn partition(table: &SubjectTable) -> Partition {
    let groups = match &table.grouping {
        GroupingKey::Implicit => {
            if table.is_empty() {
                Vec::new()
            } else {
                let mut group = Group::new(GroupKey::implicit());
                group.subjects = table.subjects.clone();
                vec![group]
            }
        }
        GroupingKey::Column(_) => {
            let mut groups: Vec<Group> = Vec::new();
            for subject in &table.subjects {
                let index = match groups.iter().position(|group| group.key == subject.group) {
                    Some(index) => index,
                    None => {
                        groups.push(Group::new(subject.group.clone()));
                        groups.len() - 1
                    }
                };
                groups[index].subjects.push(subject.clone());
            }
            groups
        }
    };
    Partition { groups }
}
