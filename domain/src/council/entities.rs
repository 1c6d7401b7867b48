//! Council entities

use crate::core::error::DomainError;
use crate::core::provider::Provider;
use crate::council::value_objects::{GenerationOptions, MemberName};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// One configured council member (Entity)
///
/// Immutable once a session starts; safely shared read-only across the
/// concurrent calls of a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilMember {
    /// Unique identity within the council, used for slots and labels
    pub name: MemberName,
    /// Vendor hosting this member
    pub provider: Provider,
    /// Vendor model identifier
    pub model: String,
    /// Generation tuning, including opaque extended-reasoning settings
    #[serde(default)]
    pub options: GenerationOptions,
}

impl CouncilMember {
    pub fn new(
        name: impl Into<MemberName>,
        provider: Provider,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            provider,
            model: model.into(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Transcript label: `name:model`
    pub fn label(&self) -> String {
        format!("{}:{}", self.name, self.model)
    }
}

/// Full configuration of one debate (Entity)
///
/// Enumerates the members in presentation order, the moderator, and the
/// per-call timeout applied to every provider call.
#[derive(Debug, Clone)]
pub struct CouncilConfig {
    /// Members in configured order; this order is the presentation order
    pub members: Vec<CouncilMember>,
    /// Model that synthesizes the final answer
    pub moderator: CouncilMember,
    /// Deadline for each individual provider call
    pub per_call_timeout: Duration,
}

impl CouncilConfig {
    pub fn new(members: Vec<CouncilMember>, moderator: CouncilMember) -> Self {
        Self {
            members,
            moderator,
            per_call_timeout: Duration::from_secs(60),
        }
    }

    pub fn with_per_call_timeout(mut self, timeout: Duration) -> Self {
        self.per_call_timeout = timeout;
        self
    }

    /// Validate the configuration
    ///
    /// A council needs at least one member, and member names must be unique
    /// because they key the per-round slots.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.members.is_empty() {
            return Err(DomainError::NoMembers);
        }
        let mut seen = HashSet::new();
        for member in &self.members {
            if !seen.insert(member.name.as_str()) {
                return Err(DomainError::DuplicateMember(member.name.to_string()));
            }
        }
        Ok(())
    }

    /// Look up a member by name
    pub fn member(&self, name: &MemberName) -> Option<&CouncilMember> {
        self.members.iter().find(|m| &m.name == name)
    }
}
