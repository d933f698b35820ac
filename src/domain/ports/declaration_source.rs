use crate::domain::errors::PipelineResult;
use crate::domain::models::DeclarationTable;

/// Source of the static per-environment declaration table.
///
/// Implementations read the table once; the resolver never calls back.
pub trait DeclarationSource {
    fn load(&self) -> PipelineResult<DeclarationTable>;

    /// Human-readable origin, used in log events.
    fn describe(&self) -> String;
}

/// A table already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeclarations {
    table: DeclarationTable,
}

impl InMemoryDeclarations {
    pub const fn new(table: DeclarationTable) -> Self {
        Self { table }
    }
}

impl DeclarationSource for InMemoryDeclarations {
    fn load(&self) -> PipelineResult<DeclarationTable> {
        Ok(self.table.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory table ({} entries)", self.table.len())
    }
}
