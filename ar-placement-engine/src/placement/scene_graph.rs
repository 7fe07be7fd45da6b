use crate::error::PlacementError;
use bevy::prelude::*;
use constants::render_settings::MAX_HIERARCHY_DEPTH;

/// Minimal scene-graph capabilities the placement lock depends on.
///
/// Nodes are entities. The world transform of a node is derived from its
/// ancestors' local transforms, so it is valid immediately after a mutation
/// rather than after the next transform propagation pass.
pub trait SceneGraph {
    fn contains(&self, node: Entity) -> bool;

    fn parent(&self, node: Entity) -> Option<Entity>;

    fn local_transform(&self, node: Entity) -> Option<Transform>;

    fn set_local_transform(
        &mut self,
        node: Entity,
        transform: Transform,
    ) -> Result<(), PlacementError>;

    /// Attach `node` to `parent` without touching its local transform.
    fn set_parent(&mut self, node: Entity, parent: Entity) -> Result<(), PlacementError>;

    /// Resolved world pose: the composition of every ancestor's local
    /// transform with the node's own. `None` if the node or an ancestor has
    /// no transform, or the chain exceeds `MAX_HIERARCHY_DEPTH`.
    fn world_transform(&self, node: Entity) -> Option<GlobalTransform> {
        let mut chain = vec![self.local_transform(node)?];
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            if chain.len() > MAX_HIERARCHY_DEPTH {
                return None;
            }
            chain.push(self.local_transform(parent)?);
            current = parent;
        }

        Some(
            chain
                .into_iter()
                .rev()
                .fold(GlobalTransform::IDENTITY, |world, local| {
                    world.mul_transform(local)
                }),
        )
    }

    /// Move `node` under `new_parent` and rewrite its local transform so its
    /// resolved world pose is unchanged. Returns the new local transform.
    fn reparent_preserving_world_transform(
        &mut self,
        node: Entity,
        new_parent: Entity,
    ) -> Result<Transform, PlacementError> {
        let node_world = self
            .world_transform(node)
            .ok_or(PlacementError::MissingHandle("tracked object transform"))?;
        let parent_world = self
            .world_transform(new_parent)
            .ok_or(PlacementError::MissingHandle("new parent transform"))?;

        let local = node_world.reparented_to(&parent_world);
        self.set_parent(node, new_parent)?;
        self.set_local_transform(node, local)?;
        Ok(local)
    }
}

impl SceneGraph for World {
    fn contains(&self, node: Entity) -> bool {
        self.get_entity(node).is_ok()
    }

    fn parent(&self, node: Entity) -> Option<Entity> {
        self.get::<ChildOf>(node).map(|child_of| child_of.parent())
    }

    fn local_transform(&self, node: Entity) -> Option<Transform> {
        self.get::<Transform>(node).copied()
    }

    fn set_local_transform(
        &mut self,
        node: Entity,
        transform: Transform,
    ) -> Result<(), PlacementError> {
        let mut current = self
            .get_mut::<Transform>(node)
            .ok_or(PlacementError::MissingHandle("node transform"))?;
        *current = transform;
        Ok(())
    }

    fn set_parent(&mut self, node: Entity, parent: Entity) -> Result<(), PlacementError> {
        if !self.contains(node) {
            return Err(PlacementError::MissingHandle("child node"));
        }
        let mut parent_entity = self
            .get_entity_mut(parent)
            .map_err(|_| PlacementError::MissingHandle("parent node"))?;
        parent_entity.add_child(node);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn world_transform_composes_ancestors() {
        let mut world = World::new();
        let root = world.spawn(Transform::from_xyz(1.0, 0.0, 0.0)).id();
        let mid = world
            .spawn((
                Transform::from_rotation(Quat::from_rotation_y(FRAC_PI_2)),
                ChildOf(root),
            ))
            .id();
        let leaf = world
            .spawn((Transform::from_xyz(0.0, 0.0, 2.0), ChildOf(mid)))
            .id();

        let resolved = world.world_transform(leaf).unwrap();
        // +Z rotated a quarter turn about Y points along +X.
        assert!(resolved.translation().abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn reparent_keeps_world_pose() {
        let mut world = World::new();
        let a = world
            .spawn(Transform::from_xyz(0.5, 1.0, -2.0).with_rotation(Quat::from_rotation_z(0.4)))
            .id();
        let b = world.spawn(Transform::from_xyz(-3.0, 0.0, 1.0)).id();
        let node = world
            .spawn((Transform::from_xyz(0.2, 0.3, 0.4), ChildOf(a)))
            .id();

        let before = world.world_transform(node).unwrap();
        world.reparent_preserving_world_transform(node, b).unwrap();
        let after = world.world_transform(node).unwrap();

        assert_eq!(world.parent(node), Some(b));
        assert!(before.translation().abs_diff_eq(after.translation(), 1e-5));
        assert!(before.rotation().abs_diff_eq(after.rotation(), 1e-5));
    }

    #[test]
    fn set_parent_rejects_despawned_parent() {
        let mut world = World::new();
        let node = world.spawn(Transform::IDENTITY).id();
        let gone = world.spawn(Transform::IDENTITY).id();
        world.despawn(gone);

        assert_eq!(
            world.set_parent(node, gone),
            Err(PlacementError::MissingHandle("parent node"))
        );
        assert_eq!(world.parent(node), None);
    }
}
