//! Policies for the edge cases of write and rename.

/// What write does with an intermediate that is not an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Replace it with an empty object.
    #[default]
    Vivify,
    /// Fail with `EditError::NotAnObject`.
    Strict,
}

/// What rename does when the new key is already taken by a sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenameCollision {
    /// Drop the sibling; the renamed entry keeps its position and value.
    #[default]
    Overwrite,
    /// Fail with `EditError::KeyExists`.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditOptions {
    pub write_policy: WritePolicy,
    pub rename_collision: RenameCollision,
}

impl EditOptions {
    pub fn new() -> Self {
        EditOptions::default()
    }

    /// Refuses both silent overwrites.
    pub fn strict() -> Self {
        EditOptions {
            write_policy: WritePolicy::Strict,
            rename_collision: RenameCollision::Reject,
        }
    }

    pub fn with_write_policy(mut self, write_policy: WritePolicy) -> Self {
        self.write_policy = write_policy;
        self
    }

    pub fn with_rename_collision(mut self, rename_collision: RenameCollision) -> Self {
        self.rename_collision = rename_collision;
        self
    }
}
