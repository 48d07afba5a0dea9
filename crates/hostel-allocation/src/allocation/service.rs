use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Deserialize;

use crate::applications::{Application, ApplicationId, ApplicationRepository};
use crate::error::AppError;
use crate::identity::{UserId, UserRepository};
use crate::rooms::{Room, RoomId, RoomRepository};

/// Admin payload for the assignment endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentRequest {
    pub student: UserId,
    pub room: RoomId,
    #[serde(default)]
    pub application: Option<ApplicationId>,
}

/// Post-state returned after a successful assignment.
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    pub room: Room,
    pub bed_number: u8,
    pub application: Option<Application>,
}

/// Post-state returned after a successful release.
#[derive(Debug, Clone)]
pub struct ReleaseOutcome {
    pub room: Room,
    pub reset_application: Option<Application>,
}

/// Serializes every occupancy mutation behind one lock so that concurrent
/// requests for a room's last free bed cannot both pass the availability
/// check. All validation happens inside the critical section, against
/// current state, before anything is persisted.
pub struct AllocationService {
    users: Arc<dyn UserRepository>,
    rooms: Arc<dyn RoomRepository>,
    applications: Arc<dyn ApplicationRepository>,
    lock: Mutex<()>,
}

impl AllocationService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        rooms: Arc<dyn RoomRepository>,
        applications: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            users,
            rooms,
            applications,
            lock: Mutex::new(()),
        }
    }

    /// Assign a student to a room, optionally marking an application as
    /// assigned in the same step. No entity is persisted until every check
    /// and every in-memory transition has succeeded.
    pub fn assign(&self, request: AssignmentRequest) -> Result<AssignmentOutcome, AppError> {
        let _guard = self.lock.lock().map_err(|_| {
            AppError::internal("allocation lock poisoned")
        })?;

        let student = self
            .users
            .fetch(&request.student)?
            .ok_or_else(|| AppError::not_found("student"))?;
        if !student.is_student() {
            return Err(AppError::state("only students can be assigned rooms"));
        }

        if let Some(held) = self.rooms.room_of(&student.id)? {
            return Err(AppError::state(format!(
                "student already occupies room {}",
                held.number
            )));
        }

        let mut room = self
            .rooms
            .fetch(&request.room)?
            .ok_or_else(|| AppError::not_found("room"))?;

        // Transition the application first so a bad application id cannot
        // leave the room half-applied.
        let mut application = match &request.application {
            Some(id) => {
                let mut application = self
                    .applications
                    .fetch(id)?
                    .ok_or_else(|| AppError::not_found("application"))?;
                if application.student != student.id {
                    return Err(AppError::state(
                        "application does not belong to this student",
                    ));
                }
                application.assign_room(room.id.clone())?;
                Some(application)
            }
            None => None,
        };

        let bed_number = room.assign(student.id.clone(), student.gender, Utc::now())?;

        self.rooms.update(room.clone())?;
        if let Some(application) = application.take() {
            self.applications.update(application.clone())?;
            tracing::info!(
                student = %student.email,
                room = %room.number,
                bed = bed_number,
                application = %application.id.0,
                "student assigned"
            );
            return Ok(AssignmentOutcome {
                room,
                bed_number,
                application: Some(application),
            });
        }

        tracing::info!(student = %student.email, room = %room.number, bed = bed_number, "student assigned");
        Ok(AssignmentOutcome {
            room,
            bed_number,
            application: None,
        })
    }

    /// Remove a student from a room and reset any application assigned to
    /// that room back to approved.
    pub fn release(&self, room_id: &RoomId, student_id: &UserId) -> Result<ReleaseOutcome, AppError> {
        let _guard = self.lock.lock().map_err(|_| {
            AppError::internal("allocation lock poisoned")
        })?;

        let mut room = self
            .rooms
            .fetch(room_id)?
            .ok_or_else(|| AppError::not_found("room"))?;

        room.release(student_id)?;
        self.rooms.update(room.clone())?;

        let mut reset_application = None;
        for mut application in self.applications.assigned_to_room(&room.id)? {
            if &application.student == student_id {
                application.reset_to_approved()?;
                self.applications.update(application.clone())?;
                reset_application = Some(application);
                break;
            }
        }

        tracing::info!(
            student = %student_id.0,
            room = %room.number,
            compensated = reset_application.is_some(),
            "student released"
        );

        Ok(ReleaseOutcome {
            room,
            reset_application,
        })
    }
}
