//! Owner of the live enemy and projectile collections.
//!
//! Both collections keep insertion order.  Ids come from one counter and
//! are never reused within a session, so the presenter can key visuals on
//! them safely.

use crate::entities::{Enemy, EnemyId, EnemyKind, Position, Projectile, ProjectileId};

#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) projectiles: Vec<Projectile>,
    next_id: u64,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Adds an enemy at full health for its kind.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Position) -> EnemyId {
        let id = EnemyId(self.allocate_id());
        self.enemies.push(Enemy {
            id,
            kind,
            hp: kind.max_hp(),
            max_hp: kind.max_hp(),
            position,
        });
        id
    }

    pub fn spawn_projectile(&mut self, origin: Position) -> ProjectileId {
        let id = ProjectileId(self.allocate_id());
        self.projectiles.push(Projectile { id, position: origin });
        id
    }

    pub fn remove_enemy(&mut self, id: EnemyId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(index))
    }

    pub fn remove_projectile(&mut self, id: ProjectileId) -> Option<Projectile> {
        let index = self.projectiles.iter().position(|p| p.id == id)?;
        Some(self.projectiles.remove(index))
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }
}
