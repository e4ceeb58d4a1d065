use serde::Deserialize;

/// Guild member returned by the guild-member lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildMember {
    pub user: MemberUser,
    #[serde(default)]
    pub nick: Option<String>,
    /// Role ids held by the member, excluding `@everyone`.
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberUser {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}
