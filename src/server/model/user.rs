use uuid::Uuid;

/// Marketplace roles a user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Host,
    Guest,
    Support,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Host => "host",
            Self::Guest => "guest",
            Self::Support => "support",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "host" => Some(Self::Host),
            "guest" => Some(Self::Guest),
            "support" => Some(Self::Support),
            _ => None,
        }
    }
}

/// The authenticated user behind a request.
///
/// Built once per request from the bearer token and passed explicitly to policy checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub roles: Vec<Role>,
}

impl Actor {
    /// Builds an actor from a user's stored role rows, skipping unknown role names.
    pub fn from_entity(user: &entity::user::Model, roles: Vec<entity::user_role::Model>) -> Self {
        Self {
            user_id: user.id,
            roles: roles.iter().filter_map(|r| Role::parse(&r.role)).collect(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}
