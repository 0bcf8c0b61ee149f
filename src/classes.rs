use thiserror::Error;
use uuid::Uuid;

use crate::models::{ClassProgram, ClassProgramPatch, NewClassProgram, OrderAssignment};
use crate::ordering::{DisplayOrdered, move_to_order, resolve_collisions};

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("no class program with id {0}")]
    NotFound(Uuid),
}

impl DisplayOrdered for ClassProgram {
    fn key(&self) -> Uuid {
        self.id
    }
    fn order(&self) -> u32 {
        self.order
    }
    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

/// Catalog of class programs, kept sorted with dense unique display orders.
#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    programs: Vec<ClassProgram>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active programs in display order.
    pub fn list(&self) -> Vec<ClassProgram> {
        self.programs
            .iter()
            .filter(|program| program.is_active)
            .cloned()
            .collect()
    }

    /// Appends at the dense end of the ordering.
    pub fn create(&mut self, new: NewClassProgram) -> ClassProgram {
        let program = ClassProgram {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            level: new.level,
            order: self.programs.len() as u32 + 1,
            is_active: new.is_active,
        };
        self.programs.push(program.clone());
        program
    }

    pub fn update(
        &mut self,
        id: Uuid,
        patch: ClassProgramPatch,
    ) -> Result<ClassProgram, CatalogError> {
        let program = self
            .programs
            .iter_mut()
            .find(|program| program.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        if let Some(name) = patch.name {
            program.name = name;
        }
        if let Some(description) = patch.description {
            program.description = description;
        }
        if let Some(level) = patch.level {
            program.level = level;
        }
        if let Some(is_active) = patch.is_active {
            program.is_active = is_active;
        }
        if let Some(order) = patch.order {
            move_to_order(&mut self.programs, id, order);
        }

        self.programs
            .iter()
            .find(|program| program.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    /// Removes a program and closes the gap it leaves in the ordering.
    pub fn remove(&mut self, id: Uuid) -> Result<(), CatalogError> {
        let position = self
            .programs
            .iter()
            .position(|program| program.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        self.programs.remove(position);
        self.programs = resolve_collisions(std::mem::take(&mut self.programs));
        self.renumber_dense();
        Ok(())
    }

    /// Bulk reorder after a drag-and-drop session. Requested positions are
    /// applied in request order (first occurrence of an id wins), programs
    /// missing from the request keep their current order, and collisions are
    /// resolved by scanning upward for the next free slot.
    pub fn reorder(&mut self, requested: &[OrderAssignment]) -> Vec<ClassProgram> {
        let mut sequence = Vec::with_capacity(self.programs.len());
        let mut taken: Vec<Uuid> = Vec::new();

        for assignment in requested {
            if taken.contains(&assignment.id) {
                continue;
            }
            if let Some(program) = self.programs.iter().find(|p| p.id == assignment.id) {
                let mut program = program.clone();
                program.order = assignment.order;
                sequence.push(program);
                taken.push(assignment.id);
            }
        }
        for program in &self.programs {
            if !taken.contains(&program.id) {
                sequence.push(program.clone());
            }
        }

        self.programs = resolve_collisions(sequence);
        self.renumber_dense();
        self.programs.clone()
    }

    // resolve_collisions guarantees strictly increasing orders; this closes
    // any remaining gaps so orders are always exactly 1..=len.
    fn renumber_dense(&mut self) {
        for (i, program) in self.programs.iter_mut().enumerate() {
            program.order = i as u32 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Level;

    fn program(name: &str) -> NewClassProgram {
        NewClassProgram {
            name: name.to_string(),
            description: format!("{name} classes"),
            level: Level::AllLevels,
            is_active: true,
        }
    }

    fn names(programs: &[ClassProgram]) -> Vec<String> {
        programs.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_create_assigns_dense_orders() {
        let mut catalog = ClassCatalog::new();
        let a = catalog.create(program("Muay Thai"));
        let b = catalog.create(program("Judo"));
        assert_eq!(a.order, 1);
        assert_eq!(b.order, 2);
    }

    #[test]
    fn test_list_active_in_display_order() {
        let mut catalog = ClassCatalog::new();
        catalog.create(program("Muay Thai"));
        let judo = catalog.create(program("Judo"));
        catalog.create(program("Karate"));
        catalog
            .update(
                judo.id,
                ClassProgramPatch {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(names(&catalog.list()), vec!["Muay Thai", "Karate"]);
    }

    #[test]
    fn test_update_order_moves_program() {
        let mut catalog = ClassCatalog::new();
        catalog.create(program("Muay Thai"));
        catalog.create(program("Judo"));
        let karate = catalog.create(program("Karate"));

        let updated = catalog
            .update(
                karate.id,
                ClassProgramPatch {
                    order: Some(1),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.order, 1);
        assert_eq!(names(&catalog.list()), vec!["Karate", "Muay Thai", "Judo"]);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut catalog = ClassCatalog::new();
        let err = catalog
            .update(Uuid::new_v4(), ClassProgramPatch::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_remove_closes_order_gap() {
        let mut catalog = ClassCatalog::new();
        catalog.create(program("Muay Thai"));
        let judo = catalog.create(program("Judo"));
        catalog.create(program("Karate"));

        catalog.remove(judo.id).unwrap();
        let listing = catalog.list();
        assert_eq!(names(&listing), vec!["Muay Thai", "Karate"]);
        assert_eq!(listing[0].order, 1);
        assert_eq!(listing[1].order, 2);
    }

    #[test]
    fn test_reorder_with_colliding_orders() {
        let mut catalog = ClassCatalog::new();
        let a = catalog.create(program("Muay Thai"));
        let b = catalog.create(program("Judo"));
        let c = catalog.create(program("Karate"));

        // Two concurrent edits both claimed position 1.
        let result = catalog.reorder(&[
            OrderAssignment { id: b.id, order: 1 },
            OrderAssignment { id: c.id, order: 1 },
            OrderAssignment { id: a.id, order: 3 },
        ]);
        assert_eq!(names(&result), vec!["Judo", "Karate", "Muay Thai"]);
        assert_eq!(
            result.iter().map(|p| p.order).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_reorder_duplicate_id_first_wins() {
        let mut catalog = ClassCatalog::new();
        let a = catalog.create(program("Muay Thai"));
        let b = catalog.create(program("Judo"));

        // The stale second assignment for the same id is ignored, so Muay
        // Thai lands at position 2 and Judo is bumped past it.
        let result = catalog.reorder(&[
            OrderAssignment { id: a.id, order: 2 },
            OrderAssignment { id: a.id, order: 1 },
        ]);
        assert_eq!(names(&result), vec!["Muay Thai", "Judo"]);
        assert_eq!(result[0].id, a.id);
        assert_eq!(result[1].id, b.id);
    }

    #[test]
    fn test_reorder_with_huge_requested_orders() {
        let mut catalog = ClassCatalog::new();
        let a = catalog.create(program("Muay Thai"));
        let b = catalog.create(program("Judo"));

        let result = catalog.reorder(&[
            OrderAssignment {
                id: a.id,
                order: u32::MAX,
            },
            OrderAssignment {
                id: b.id,
                order: u32::MAX,
            },
        ]);
        assert_eq!(names(&result), vec!["Muay Thai", "Judo"]);
        assert_eq!(
            result.iter().map(|p| p.order).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_reorder_ignores_unknown_ids() {
        let mut catalog = ClassCatalog::new();
        let a = catalog.create(program("Muay Thai"));
        let result = catalog.reorder(&[
            OrderAssignment {
                id: Uuid::new_v4(),
                order: 1,
            },
            OrderAssignment { id: a.id, order: 2 },
        ]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].order, 1);
    }
}
