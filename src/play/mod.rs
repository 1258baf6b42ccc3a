/// Traversal predicate, single steps and the play session
pub mod movement;
