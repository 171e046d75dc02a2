//! Access-control evaluator.
//!
//! Every authorization decision in the API goes through [`decide`]. It is a
//! pure function of the acting user, the project's ownership/membership
//! ([`ProjectScope`]) and a small closed set of resource and action tags, so
//! the whole policy lives in one table and is tested once.
//!
//! The caller loads the scope (owner id + member ids) and the resource
//! attributes the rules need (task assignee, risk/issue kind, file uploader,
//! member being removed) and renders a [`Decision::Deny`] as a 403.

use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::risk_issue::RiskIssueKind;
use crate::types::DbId;

/// Ownership and membership of one project.
///
/// The owner is always a member: constructing a scope inserts the owner
/// into the member set whether or not a membership row exists for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectScope {
    owner_id: DbId,
    member_ids: BTreeSet<DbId>,
}

impl ProjectScope {
    pub fn new(owner_id: DbId, member_ids: impl IntoIterator<Item = DbId>) -> Self {
        let mut member_ids: BTreeSet<DbId> = member_ids.into_iter().collect();
        member_ids.insert(owner_id);
        Self {
            owner_id,
            member_ids,
        }
    }

    pub fn owner_id(&self) -> DbId {
        self.owner_id
    }

    pub fn is_owner(&self, user_id: DbId) -> bool {
        self.owner_id == user_id
    }

    /// Owner or explicit member.
    pub fn is_member(&self, user_id: DbId) -> bool {
        self.member_ids.contains(&user_id)
    }

    /// Everybody with access to the project, owner included, without
    /// duplicates, in ascending id order.
    pub fn audience(&self) -> impl Iterator<Item = DbId> + '_ {
        self.member_ids.iter().copied()
    }
}

/// The kind of thing being acted on, with the attributes the rules consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Project,
    Task { assigned_to: Option<DbId> },
    Expenditure,
    RiskIssue { kind: RiskIssueKind },
    /// A membership entry for `user_id`.
    Member { user_id: DbId },
    Comment,
    /// A task attachment; `uploaded_by` is `None` when acting on a task's
    /// attachments as a whole.
    File { uploaded_by: Option<DbId> },
}

/// What the actor is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    /// Move a completed task back to a non-completed status.
    RevertCompleted,
}

/// Outcome of [`decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Denied, with a message meant for the end user.
    Deny(String),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Convert into a `Result`, mapping a denial to [`CoreError::Forbidden`].
    pub fn into_result(self) -> Result<(), CoreError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(CoreError::Forbidden(reason)),
        }
    }

    fn allow_if(condition: bool, reason: &str) -> Self {
        if condition {
            Decision::Allow
        } else {
            Decision::Deny(reason.to_string())
        }
    }
}

pub const DENY_PROJECT_READ: &str = "You do not have access to this project.";
pub const DENY_PROJECT_UPDATE: &str = "Only the project owner can perform this action.";
pub const DENY_PROJECT_DELETE: &str = "Only the project owner can delete this project.";
pub const DENY_TASK_CREATE: &str = "Only the project owner can create tasks.";
pub const DENY_TASK_READ: &str = "You do not have access to this task.";
pub const DENY_TASK_UPDATE: &str = "You are not allowed to edit this task.";
pub const DENY_TASK_DELETE: &str = "You are not allowed to delete this task.";
pub const DENY_TASK_REVERT: &str = "Only the project owner can revert a completed task.";
pub const DENY_EXPENDITURE: &str = "Only the project owner can manage expenditures.";
pub const DENY_RISK_CREATE: &str = "Only project owners can add risks.";
pub const DENY_RISK_UPDATE: &str = "Only project owners can update risks.";
pub const DENY_RISK_ISSUE_ACCESS: &str = "Unauthorized access to project risks/issues.";
pub const DENY_RISK_ISSUE_DELETE: &str = "Only the project owner can delete risks or issues.";
pub const DENY_MEMBER_MANAGE: &str = "Only the project owner can manage members.";
pub const DENY_REMOVE_OWNER: &str = "The project creator cannot be removed.";
pub const DENY_COMMENT_MODIFY: &str = "Comments cannot be modified.";
pub const DENY_FILE_DELETE: &str = "You are not allowed to delete this file.";
pub const DENY_FILE_MODIFY: &str = "Files cannot be modified.";
pub const DENY_NOT_APPLICABLE: &str = "This action does not apply to this resource.";

/// Decide whether `actor` may perform `action` on `resource` within `scope`.
pub fn decide(actor: DbId, scope: &ProjectScope, resource: &Resource, action: Action) -> Decision {
    let owner = scope.is_owner(actor);
    let member = scope.is_member(actor);

    match (*resource, action) {
        (Resource::Project, Action::Create) => Decision::Allow,
        (Resource::Project, Action::Read) => Decision::allow_if(member, DENY_PROJECT_READ),
        (Resource::Project, Action::Update) => Decision::allow_if(owner, DENY_PROJECT_UPDATE),
        (Resource::Project, Action::Delete) => Decision::allow_if(owner, DENY_PROJECT_DELETE),

        (Resource::Task { .. }, Action::Create) => Decision::allow_if(owner, DENY_TASK_CREATE),
        (Resource::Task { assigned_to }, Action::Read) => {
            Decision::allow_if(member || assigned_to == Some(actor), DENY_TASK_READ)
        }
        (Resource::Task { assigned_to }, Action::Update) => {
            Decision::allow_if(owner || assigned_to == Some(actor), DENY_TASK_UPDATE)
        }
        (Resource::Task { assigned_to }, Action::Delete) => {
            Decision::allow_if(owner || assigned_to == Some(actor), DENY_TASK_DELETE)
        }
        (Resource::Task { .. }, Action::RevertCompleted) => {
            Decision::allow_if(owner, DENY_TASK_REVERT)
        }
        (_, Action::RevertCompleted) => Decision::Deny(DENY_NOT_APPLICABLE.to_string()),

        (Resource::Expenditure, _) => Decision::allow_if(owner, DENY_EXPENDITURE),

        (Resource::RiskIssue { .. }, Action::Read) => {
            Decision::allow_if(member, DENY_RISK_ISSUE_ACCESS)
        }
        (Resource::RiskIssue { .. }, Action::Delete) => {
            Decision::allow_if(owner, DENY_RISK_ISSUE_DELETE)
        }
        (Resource::RiskIssue { kind }, Action::Create | Action::Update) => {
            if !member {
                Decision::Deny(DENY_RISK_ISSUE_ACCESS.to_string())
            } else if kind == RiskIssueKind::Risk && !owner {
                let reason = if action == Action::Create {
                    DENY_RISK_CREATE
                } else {
                    DENY_RISK_UPDATE
                };
                Decision::Deny(reason.to_string())
            } else {
                Decision::Allow
            }
        }

        (Resource::Member { .. }, Action::Read) => Decision::allow_if(member, DENY_PROJECT_READ),
        (Resource::Member { user_id }, Action::Delete) => {
            if !owner {
                Decision::Deny(DENY_MEMBER_MANAGE.to_string())
            } else if scope.is_owner(user_id) {
                Decision::Deny(DENY_REMOVE_OWNER.to_string())
            } else {
                Decision::Allow
            }
        }
        (Resource::Member { .. }, _) => Decision::allow_if(owner, DENY_MEMBER_MANAGE),

        // Any authenticated user may comment on and attach files to a task.
        (Resource::Comment, Action::Create | Action::Read) => Decision::Allow,
        (Resource::Comment, _) => Decision::Deny(DENY_COMMENT_MODIFY.to_string()),

        (Resource::File { .. }, Action::Create | Action::Read) => Decision::Allow,
        (Resource::File { uploaded_by }, Action::Delete) => {
            Decision::allow_if(owner || uploaded_by == Some(actor), DENY_FILE_DELETE)
        }
        (Resource::File { .. }, _) => Decision::Deny(DENY_FILE_MODIFY.to_string()),
    }
}
