use sproutstand_identity::User;

/// Resolved caller for a request.
///
/// Inserted by the auth middleware after the bearer token has been resolved
/// against the user collection; present on every protected route.
#[derive(Debug, Clone)]
pub struct Caller {
    user: User,
}

impl Caller {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }
}
