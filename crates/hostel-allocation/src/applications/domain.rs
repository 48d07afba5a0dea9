use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{HostelId, RoomType};
use crate::error::FieldError;
use crate::identity::UserId;
use crate::rooms::RoomId;

/// Identifier wrapper for applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semester {
    First,
    Second,
}

impl Semester {
    pub const fn label(self) -> &'static str {
        match self {
            Semester::First => "first",
            Semester::Second => "second",
        }
    }
}

/// Reviewer stamp recorded on approve/reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub reviewed_by: UserId,
    pub reviewed_at: DateTime<Utc>,
    pub comments: String,
}

/// Application lifecycle. Review data exists only after a decision and a
/// room reference only while assigned, by construction.
///
/// `Approved { review: None }` arises in exactly one way: a release of a
/// student whose application was assigned straight from pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved { review: Option<Review> },
    Rejected { review: Review },
    Assigned { review: Option<Review>, room: RoomId },
}

impl ApplicationStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved { .. } => "approved",
            ApplicationStatus::Rejected { .. } => "rejected",
            ApplicationStatus::Assigned { .. } => "assigned",
        }
    }

    pub fn review(&self) -> Option<&Review> {
        match self {
            ApplicationStatus::Pending => None,
            ApplicationStatus::Approved { review } | ApplicationStatus::Assigned { review, .. } => {
                review.as_ref()
            }
            ApplicationStatus::Rejected { review } => Some(review),
        }
    }

    pub fn assigned_room(&self) -> Option<&RoomId> {
        match self {
            ApplicationStatus::Assigned { room, .. } => Some(room),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ApplicationStatus::Pending)
    }
}

/// Illegal transitions, raised before any state mutation.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("application is {current}, only pending applications can be reviewed")]
    NotPending { current: &'static str },
    #[error("application is {current} and cannot be assigned a room")]
    NotAssignable { current: &'static str },
    #[error("application is {current}, only assigned applications can be unassigned")]
    NotAssigned { current: &'static str },
    #[error("review comments must not be empty")]
    EmptyComments,
}

/// Applicant contact details, required and format-validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub phone: String,
    pub address: String,
}

/// Guardian/next-of-kin details, required and format-validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianInfo {
    pub name: String,
    pub phone: String,
}

/// Advisory hostel/room-type preference. Recorded and reported, never
/// enforced by assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(default)]
    pub hostel: Option<HostelId>,
    pub room_type: RoomType,
}

/// One student's housing request for one `(academic_year, semester)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub student: UserId,
    pub academic_year: String,
    pub semester: Semester,
    pub personal: PersonalInfo,
    pub guardian: GuardianInfo,
    pub preference: Preference,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Application {
    /// Only from pending.
    pub fn approve(
        &mut self,
        reviewer: UserId,
        comments: String,
        at: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        if !self.status.is_pending() {
            return Err(TransitionError::NotPending {
                current: self.status.label(),
            });
        }
        self.status = ApplicationStatus::Approved {
            review: Some(Review {
                reviewed_by: reviewer,
                reviewed_at: at,
                comments,
            }),
        };
        Ok(())
    }

    /// Only from pending; comments are mandatory and checked before any
    /// mutation. Terminal.
    pub fn reject(
        &mut self,
        reviewer: UserId,
        comments: String,
        at: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        let comments = comments.trim().to_string();
        if comments.is_empty() {
            return Err(TransitionError::EmptyComments);
        }
        if !self.status.is_pending() {
            return Err(TransitionError::NotPending {
                current: self.status.label(),
            });
        }
        self.status = ApplicationStatus::Rejected {
            review: Review {
                reviewed_by: reviewer,
                reviewed_at: at,
                comments,
            },
        };
        Ok(())
    }

    /// From pending or approved. Admins may skip the explicit approve step;
    /// rejected and already-assigned applications cannot be assigned.
    pub fn assign_room(&mut self, room: RoomId) -> Result<(), TransitionError> {
        let review = match &self.status {
            ApplicationStatus::Pending => None,
            ApplicationStatus::Approved { review } => review.clone(),
            other => {
                return Err(TransitionError::NotAssignable {
                    current: other.label(),
                })
            }
        };
        self.status = ApplicationStatus::Assigned { review, room };
        Ok(())
    }

    /// Compensating transition driven by room release: the room reference is
    /// cleared and the application returns to approved.
    pub fn reset_to_approved(&mut self) -> Result<(), TransitionError> {
        match &self.status {
            ApplicationStatus::Assigned { review, .. } => {
                self.status = ApplicationStatus::Approved {
                    review: review.clone(),
                };
                Ok(())
            }
            other => Err(TransitionError::NotAssigned {
                current: other.label(),
            }),
        }
    }
}

/// Submission/update payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationForm {
    pub academic_year: String,
    pub semester: Semester,
    pub personal: PersonalInfo,
    pub guardian: GuardianInfo,
    pub preference: Preference,
}

impl ApplicationForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if !valid_academic_year(&self.academic_year) {
            errors.push(FieldError::new(
                "academic_year",
                "academic year must be consecutive years formatted YYYY/YYYY",
            ));
        }
        if !valid_phone(&self.personal.phone) {
            errors.push(FieldError::new(
                "personal.phone",
                "phone must be 7-15 digits, optionally prefixed with +",
            ));
        }
        if self.personal.address.trim().is_empty() {
            errors.push(FieldError::new("personal.address", "address is required"));
        }
        if self.guardian.name.trim().is_empty() {
            errors.push(FieldError::new("guardian.name", "guardian name is required"));
        }
        if !valid_phone(&self.guardian.phone) {
            errors.push(FieldError::new(
                "guardian.phone",
                "phone must be 7-15 digits, optionally prefixed with +",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn valid_academic_year(value: &str) -> bool {
    let Some((start, end)) = value.trim().split_once('/') else {
        return false;
    };
    if start.len() != 4 || end.len() != 4 {
        return false;
    }
    match (start.parse::<u32>(), end.parse::<u32>()) {
        (Ok(first), Ok(second)) => second == first + 1,
        _ => false,
    }
}

fn valid_phone(value: &str) -> bool {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Serializable application snapshot for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub student: UserId,
    pub academic_year: String,
    pub semester: Semester,
    pub status: &'static str,
    pub preference: Preference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_room: Option<RoomId>,
    pub submitted_at: DateTime<Utc>,
}

impl From<&Application> for ApplicationView {
    fn from(application: &Application) -> Self {
        Self {
            id: application.id.clone(),
            student: application.student.clone(),
            academic_year: application.academic_year.clone(),
            semester: application.semester,
            status: application.status.label(),
            preference: application.preference.clone(),
            review: application.status.review().cloned(),
            assigned_room: application.status.assigned_room().cloned(),
            submitted_at: application.submitted_at,
        }
    }
}
