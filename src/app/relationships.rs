use crate::app::models::{
    ColumnMetadata, ConstraintDetail, RelationshipInfo, RelationshipKind, TableMetadataResponse,
};
use std::collections::HashMap;

/// Derives the relationship panel for one column.
///
/// Primary-key references (other tables pointing at this column) come first,
/// followed by the foreign keys this column holds. Within each kind the
/// constraint list order is preserved. Returns `None` rather than an empty
/// list when the column takes part in no constraint, so callers can skip
/// the panel entirely.
pub fn resolve(
    column: &ColumnMetadata,
    table_name: &str,
    constraints: &[ConstraintDetail],
) -> Option<Vec<RelationshipInfo>> {
    let mut relationships = Vec::new();

    if column.is_primary_key {
        relationships.extend(
            constraints
                .iter()
                .filter(|c| c.referenced_table == table_name && c.referenced_column == column.name)
                .map(referenced_by),
        );
    }

    relationships.extend(
        constraints
            .iter()
            .filter(|c| c.child_table == table_name && c.child_column == column.name)
            .map(references),
    );

    (!relationships.is_empty()).then_some(relationships)
}

fn referenced_by(constraint: &ConstraintDetail) -> RelationshipInfo {
    RelationshipInfo {
        kind: RelationshipKind::PrimaryKeyRef,
        description: format!(
            "Referenced by {}.{}",
            constraint.child_table, constraint.child_column
        ),
        constraint_name: constraint.constraint_name.clone(),
    }
}

fn references(constraint: &ConstraintDetail) -> RelationshipInfo {
    RelationshipInfo {
        kind: RelationshipKind::ForeignKeyRef,
        description: format!(
            "References {}.{}",
            constraint.referenced_table, constraint.referenced_column
        ),
        constraint_name: constraint.constraint_name.clone(),
    }
}

type ColumnKey = (String, String);

/// Constraint positions grouped by endpoint, built once per scan so the view
/// does not rescan the constraint list for every column it renders.
#[derive(Debug, Default)]
pub struct RelationshipIndex<'a> {
    constraints: &'a [ConstraintDetail],
    by_referenced: HashMap<ColumnKey, Vec<usize>>,
    by_child: HashMap<ColumnKey, Vec<usize>>,
}

impl<'a> RelationshipIndex<'a> {
    pub fn new(constraints: &'a [ConstraintDetail]) -> Self {
        let mut by_referenced: HashMap<ColumnKey, Vec<usize>> = HashMap::new();
        let mut by_child: HashMap<ColumnKey, Vec<usize>> = HashMap::new();

        for (idx, c) in constraints.iter().enumerate() {
            by_referenced
                .entry((c.referenced_table.clone(), c.referenced_column.clone()))
                .or_default()
                .push(idx);
            by_child
                .entry((c.child_table.clone(), c.child_column.clone()))
                .or_default()
                .push(idx);
        }

        Self {
            constraints,
            by_referenced,
            by_child,
        }
    }

    pub fn for_metadata(metadata: &'a TableMetadataResponse) -> Self {
        Self::new(&metadata.constraints)
    }

    /// Same result as [`resolve`] against the indexed constraint list.
    pub fn resolve(&self, column: &ColumnMetadata, table_name: &str) -> Option<Vec<RelationshipInfo>> {
        let key = (table_name.to_string(), column.name.clone());
        let mut relationships = Vec::new();

        if column.is_primary_key {
            if let Some(positions) = self.by_referenced.get(&key) {
                relationships.extend(positions.iter().map(|&i| referenced_by(&self.constraints[i])));
            }
        }

        if let Some(positions) = self.by_child.get(&key) {
            relationships.extend(positions.iter().map(|&i| references(&self.constraints[i])));
        }

        (!relationships.is_empty()).then_some(relationships)
    }
}
