use std::sync::Arc;

use chrono::Utc;

use super::domain::{Application, ApplicationForm, ApplicationId, TransitionError};
use super::repository::{ApplicationFilter, ApplicationRepository};
use crate::error::{AppError, RepositoryError};
use crate::identity::{AuthError, User, UserId};
use crate::rooms::RoomRepository;

/// Application lifecycle outside of room assignment: submission, review,
/// owner edits, deletion.
pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    rooms: Arc<dyn RoomRepository>,
}

impl ApplicationService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        rooms: Arc<dyn RoomRepository>,
    ) -> Self {
        Self {
            applications,
            rooms,
        }
    }

    /// Create a pending application. Blocked if the student already holds a
    /// room or already applied for this term.
    pub fn submit(&self, student: &User, form: ApplicationForm) -> Result<Application, AppError> {
        form.validate().map_err(AppError::validation)?;

        if self.rooms.room_of(&student.id)?.is_some() {
            return Err(AppError::state(
                "student already holds a room assignment",
            ));
        }

        let academic_year = form.academic_year.trim().to_string();
        let semester = form.semester;

        let application = Application {
            id: ApplicationId::generate(),
            student: student.id.clone(),
            academic_year: academic_year.clone(),
            semester,
            personal: form.personal,
            guardian: form.guardian,
            preference: form.preference,
            status: super::domain::ApplicationStatus::Pending,
            submitted_at: Utc::now(),
        };

        // The store enforces term uniqueness atomically with the write;
        // translate its conflict into the term-specific message.
        self.applications.insert(application).map_err(|err| match err {
            RepositoryError::Conflict => AppError::conflict(format!(
                "an application for {academic_year} ({}) already exists",
                semester.label()
            )),
            other => other.into(),
        })
    }

    pub fn approve(
        &self,
        id: &ApplicationId,
        reviewer: &User,
        comments: String,
    ) -> Result<Application, AppError> {
        let mut application = self.fetch(id)?;
        application.approve(reviewer.id.clone(), comments, Utc::now())?;
        self.applications.update(application.clone())?;
        tracing::info!(application = %application.id.0, reviewer = %reviewer.email, "application approved");
        Ok(application)
    }

    pub fn reject(
        &self,
        id: &ApplicationId,
        reviewer: &User,
        comments: String,
    ) -> Result<Application, AppError> {
        // Comment validation happens inside the transition, before any
        // mutation; map the failure to a field-level error.
        if comments.trim().is_empty() {
            return Err(TransitionError::EmptyComments.into());
        }
        let mut application = self.fetch(id)?;
        application.reject(reviewer.id.clone(), comments, Utc::now())?;
        self.applications.update(application.clone())?;
        tracing::info!(application = %application.id.0, reviewer = %reviewer.email, "application rejected");
        Ok(application)
    }

    /// Owner-only edit, permitted only while pending. Term changes re-run the
    /// uniqueness check.
    pub fn update(
        &self,
        id: &ApplicationId,
        actor: &User,
        form: ApplicationForm,
    ) -> Result<Application, AppError> {
        form.validate().map_err(AppError::validation)?;

        let mut application = self.fetch(id)?;
        if application.student != actor.id {
            return Err(AuthError::Forbidden.into());
        }
        if !application.status.is_pending() {
            return Err(AppError::state(
                "only pending applications can be updated",
            ));
        }

        let academic_year = form.academic_year.trim().to_string();
        let term_changed = academic_year != application.academic_year
            || form.semester != application.semester;
        if term_changed
            && self
                .applications
                .find_for_term(&actor.id, &academic_year, form.semester)?
                .is_some()
        {
            return Err(AppError::conflict(format!(
                "an application for {academic_year} ({}) already exists",
                form.semester.label()
            )));
        }

        application.academic_year = academic_year;
        application.semester = form.semester;
        application.personal = form.personal;
        application.guardian = form.guardian;
        application.preference = form.preference;
        self.applications.update(application.clone())?;
        Ok(application)
    }

    /// Owners may delete only while pending; admins at any time. Deleting an
    /// assigned application does not free the room.
    pub fn delete(&self, id: &ApplicationId, actor: &User) -> Result<(), AppError> {
        let application = self.fetch(id)?;

        if !actor.is_admin() {
            if application.student != actor.id {
                return Err(AuthError::Forbidden.into());
            }
            if !application.status.is_pending() {
                return Err(AppError::state(
                    "only pending applications can be withdrawn",
                ));
            }
        }

        self.applications.delete(id)?;
        Ok(())
    }

    pub fn fetch(&self, id: &ApplicationId) -> Result<Application, AppError> {
        self.applications
            .fetch(id)?
            .ok_or_else(|| AppError::not_found("application"))
    }

    pub fn list(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, AppError> {
        Ok(self.applications.list(filter)?)
    }

    pub fn list_for(&self, student: &UserId) -> Result<Vec<Application>, AppError> {
        Ok(self.applications.list_for(student)?)
    }
}
