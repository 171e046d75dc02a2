//! Activity events and how each one renders into activity rows.

use pmtrack_core::access::ProjectScope;
use pmtrack_core::risk_issue::RiskIssueKind;
use pmtrack_core::task::AssignmentChange;
use pmtrack_core::types::DbId;

pub const ACTION_ADDED_TO_PROJECT: &str = "added_to_project";
pub const ACTION_REMOVED_FROM_PROJECT: &str = "removed_from_project";
pub const ACTION_RISK_ISSUE_CREATED: &str = "risk_issue_created";
pub const ACTION_RISK_ISSUE_UPDATED: &str = "risk_issue_updated";
pub const ACTION_TASK_ASSIGNED: &str = "task_assigned";
pub const ACTION_TASK_REASSIGNED: &str = "task_reassigned";
pub const ACTION_TASK_UNASSIGNED: &str = "task_unassigned";
pub const ACTION_FILE_UPLOADED: &str = "file_uploaded";

/// Something that happened and that users should hear about.
///
/// Each variant carries the names needed to render its description, so the
/// text is fixed at write time and later renames do not rewrite history.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityEvent {
    MemberAdded {
        project_id: DbId,
        project_name: String,
        user_id: DbId,
    },
    MemberRemoved {
        project_id: DbId,
        project_name: String,
        user_id: DbId,
    },
    RiskIssueCreated {
        project_id: DbId,
        project_name: String,
        kind: RiskIssueKind,
        title: String,
        audience: Vec<DbId>,
    },
    RiskIssueUpdated {
        project_id: DbId,
        project_name: String,
        kind: RiskIssueKind,
        title: String,
        audience: Vec<DbId>,
    },
    TaskAssigned {
        project_id: DbId,
        task_id: DbId,
        task_title: String,
        user_id: DbId,
    },
    TaskReassigned {
        project_id: DbId,
        task_id: DbId,
        task_title: String,
        user_id: DbId,
    },
    TaskUnassigned {
        project_id: DbId,
        task_id: DbId,
        task_title: String,
        user_id: DbId,
    },
    FileUploaded {
        project_id: DbId,
        task_id: DbId,
        task_title: String,
        filename: String,
        user_id: DbId,
    },
}

impl ActivityEvent {
    /// Event announcing a new risk/issue to everyone on the project.
    pub fn risk_issue_created(
        project_id: DbId,
        scope: &ProjectScope,
        project_name: &str,
        kind: RiskIssueKind,
        title: &str,
    ) -> Self {
        Self::RiskIssueCreated {
            project_id,
            project_name: project_name.to_string(),
            kind,
            title: title.to_string(),
            audience: scope.audience().collect(),
        }
    }

    /// Event announcing a changed risk/issue to everyone on the project.
    pub fn risk_issue_updated(
        project_id: DbId,
        scope: &ProjectScope,
        project_name: &str,
        kind: RiskIssueKind,
        title: &str,
    ) -> Self {
        Self::RiskIssueUpdated {
            project_id,
            project_name: project_name.to_string(),
            kind,
            title: title.to_string(),
            audience: scope.audience().collect(),
        }
    }

    /// The notification for an assignment change, or `None` if the assignee
    /// did not change.
    pub fn for_assignment(
        change: AssignmentChange,
        project_id: DbId,
        task_id: DbId,
        task_title: &str,
    ) -> Option<Self> {
        let task_title = task_title.to_string();
        match change {
            AssignmentChange::Unchanged => None,
            AssignmentChange::Assigned(user_id) => Some(Self::TaskAssigned {
                project_id,
                task_id,
                task_title,
                user_id,
            }),
            AssignmentChange::Reassigned { to, .. } => Some(Self::TaskReassigned {
                project_id,
                task_id,
                task_title,
                user_id: to,
            }),
            AssignmentChange::Unassigned(user_id) => Some(Self::TaskUnassigned {
                project_id,
                task_id,
                task_title,
                user_id,
            }),
        }
    }

    /// Action tag stored on each activity row.
    pub fn action(&self) -> &'static str {
        match self {
            Self::MemberAdded { .. } => ACTION_ADDED_TO_PROJECT,
            Self::MemberRemoved { .. } => ACTION_REMOVED_FROM_PROJECT,
            Self::RiskIssueCreated { .. } => ACTION_RISK_ISSUE_CREATED,
            Self::RiskIssueUpdated { .. } => ACTION_RISK_ISSUE_UPDATED,
            Self::TaskAssigned { .. } => ACTION_TASK_ASSIGNED,
            Self::TaskReassigned { .. } => ACTION_TASK_REASSIGNED,
            Self::TaskUnassigned { .. } => ACTION_TASK_UNASSIGNED,
            Self::FileUploaded { .. } => ACTION_FILE_UPLOADED,
        }
    }

    /// Human-readable description, rendered once at write time.
    pub fn description(&self) -> String {
        match self {
            Self::MemberAdded { project_name, .. } => {
                format!("You have been added to the project: {project_name}")
            }
            Self::MemberRemoved { project_name, .. } => {
                format!("You have been removed from the project: {project_name}")
            }
            Self::RiskIssueCreated {
                project_name,
                kind,
                title,
                ..
            } => format!(
                "A new {} was reported: '{title}' in project '{project_name}'",
                kind.as_str()
            ),
            Self::RiskIssueUpdated {
                project_name,
                kind,
                title,
                ..
            } => format!(
                "The {} '{title}' has been updated in project '{project_name}'",
                kind.as_str()
            ),
            Self::TaskAssigned { task_title, .. } => {
                format!("You were assigned to task \"{task_title}\"")
            }
            Self::TaskReassigned { task_title, .. } => {
                format!("You were reassigned to task \"{task_title}\"")
            }
            Self::TaskUnassigned { task_title, .. } => {
                format!("You were unassigned from task \"{task_title}\"")
            }
            Self::FileUploaded {
                filename,
                task_title,
                ..
            } => format!("Uploaded file \"{filename}\" to task \"{task_title}\""),
        }
    }

    /// Users who receive a row, without duplicates, in ascending id order.
    pub fn recipients(&self) -> Vec<DbId> {
        let mut recipients = match self {
            Self::MemberAdded { user_id, .. }
            | Self::MemberRemoved { user_id, .. }
            | Self::TaskAssigned { user_id, .. }
            | Self::TaskReassigned { user_id, .. }
            | Self::TaskUnassigned { user_id, .. }
            | Self::FileUploaded { user_id, .. } => vec![*user_id],
            Self::RiskIssueCreated { audience, .. } | Self::RiskIssueUpdated { audience, .. } => {
                audience.clone()
            }
        };
        recipients.sort_unstable();
        recipients.dedup();
        recipients
    }

    pub fn project_id(&self) -> DbId {
        match self {
            Self::MemberAdded { project_id, .. }
            | Self::MemberRemoved { project_id, .. }
            | Self::RiskIssueCreated { project_id, .. }
            | Self::RiskIssueUpdated { project_id, .. }
            | Self::TaskAssigned { project_id, .. }
            | Self::TaskReassigned { project_id, .. }
            | Self::TaskUnassigned { project_id, .. }
            | Self::FileUploaded { project_id, .. } => *project_id,
        }
    }

    /// The task the event concerns, if any.
    pub fn task_id(&self) -> Option<DbId> {
        match self {
            Self::TaskAssigned { task_id, .. }
            | Self::TaskReassigned { task_id, .. }
            | Self::TaskUnassigned { task_id, .. }
            | Self::FileUploaded { task_id, .. } => Some(*task_id),
            _ => None,
        }
    }
}
