use crate::actor::Actor;

/// Resolves the identity of the current caller.
///
/// The placement core never looks identity up ambiently: transports resolve
/// an [`Actor`] at the boundary and pass it in explicitly. This trait is
/// that boundary; implementations (token validation, session lookup) live
/// outside this workspace.
pub trait IdentityResolver: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn resolve(&self) -> Result<Actor, Self::Error>;
}

/// Identity resolver that always yields the same actor, for tests/dev.
#[derive(Debug, Clone)]
pub struct FixedIdentity {
    actor: Actor,
}

impl FixedIdentity {
    pub fn new(actor: Actor) -> Self {
        Self { actor }
    }
}

impl IdentityResolver for FixedIdentity {
    type Error = core::convert::Infallible;

    fn resolve(&self) -> Result<Actor, Self::Error> {
        Ok(self.actor)
    }
}
